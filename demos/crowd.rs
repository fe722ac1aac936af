//! Crowd demo: many agents request paths on a small level while the main
//! loop keeps ticking.
//!
//! Run: RUST_LOG=trace cargo run --bin crowd -- [agents]

use std::time::{Duration, Instant};

use rand::{RngExt, SeedableRng};
use tilenav_core::{Grid, Point, WorldPoint};
use tilenav_planner::{PathBuffer, Planner, PlannerConfig};

const TILE: f32 = 32.0;
const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 600;

const LEVEL: &str = "\
########################################
#......#...............#...............#
#......#...............#.......#.......#
#......#.......####....#.......#.......#
#..............#..#............#.......#
#......#.......#..#....#########.......#
########.......#..#....#...............#
#..............####....#.......#########
#......................#...............#
#......########........#...............#
#......#......#....................#...#
#......#......#........#############...#
#......#...............#...............#
#..............................#.......#
########################################";

struct Agent {
    pos: Point,
    goal: Point,
    path: PathBuffer,
    frames: usize,
}

fn main() {
    env_logger::init();

    let agents: usize = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(32);

    if let Err(e) = run(agents) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let grid = Grid::from_ascii(LEVEL, TILE, WorldPoint::new(TILE / 2.0, TILE / 2.0))?;
    let open: Vec<Point> = grid.bounds().iter().filter(|&p| !grid.is_blocked(p)).collect();
    log::info!(
        "level {}x{} with {} solid tiles",
        grid.width(),
        grid.height(),
        grid.solids().len()
    );

    let mut planner = Planner::new(PlannerConfig::default())?;
    planner.load_grid(grid);

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut agents: Vec<Agent> = (0..count)
        .map(|_| Agent {
            pos: open[rng.random_range(0..open.len())],
            goal: open[rng.random_range(0..open.len())],
            path: PathBuffer::new(),
            frames: 0,
        })
        .collect();

    let started = Instant::now();
    for agent in &agents {
        let (from, to) = world(&planner, agent.pos, agent.goal);
        planner.submit(from, to, &agent.path);
    }

    // Simulation loop: poll buffers once per frame, never block on the worker.
    let mut frame = 0;
    while agents.iter().any(|a| !a.path.is_ready()) && frame < MAX_FRAMES {
        for agent in agents.iter_mut().filter(|a| !a.path.is_ready()) {
            agent.frames += 1;
        }
        std::thread::sleep(FRAME);
        frame += 1;
    }

    let mut reached = 0;
    let mut visible = 0;
    for (i, agent) in agents.iter().enumerate() {
        let (from, to) = world(&planner, agent.pos, agent.goal);
        if planner.is_visible(from, to) {
            visible += 1;
        }
        match agent.path.reached() {
            Some(true) => reached += 1,
            Some(false) => log::warn!("agent {i}: goal {} unreachable, stub path", agent.goal),
            None => log::warn!("agent {i}: no path after {} frames", agent.frames),
        }
        log::debug!(
            "agent {i}: {} -> {}: {} waypoints after {} frames",
            agent.pos,
            agent.goal,
            agent.path.len(),
            agent.frames
        );
    }

    println!(
        "{count} agents: {reached} paths complete in {:?} ({frame} frames), {visible} goals in sight",
        started.elapsed()
    );

    if let Some(first) = agents.first() {
        let (from, to) = world(&planner, first.pos, first.goal);
        let sync = planner.plot_path_sync(from, to);
        println!("sync path for agent 0: {} waypoints", sync.len());
    }

    planner.shutdown();
    Ok(())
}

fn world(planner: &Planner, a: Point, b: Point) -> (WorldPoint, WorldPoint) {
    match planner.grid() {
        Some(grid) => (grid.tile_to_world(a), grid.tile_to_world(b)),
        None => (WorldPoint::ZERO, WorldPoint::ZERO),
    }
}
