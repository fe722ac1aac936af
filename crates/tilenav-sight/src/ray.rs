//! Supercover grid traversal.

use tilenav_core::Point;

/// Iterator over every tile a straight segment between two tile centers
/// passes through, from `from` to `to` inclusive.
///
/// Integer DDA: at each step the axis whose next tile boundary the segment
/// crosses first is advanced. When both boundaries are crossed at once
/// (the segment passes exactly through a tile corner) both axes advance
/// together and the two side tiles are not visited.
#[derive(Debug, Clone)]
pub struct SupercoverRay {
    cur: Point,
    step: Point,
    nx: i64,
    ny: i64,
    ix: i64,
    iy: i64,
    done: bool,
}

impl SupercoverRay {
    pub fn new(from: Point, to: Point) -> Self {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        Self {
            cur: from,
            step: Point::new(dx.signum() as i32, dy.signum() as i32),
            nx: dx.abs(),
            ny: dy.abs(),
            ix: 0,
            iy: 0,
            done: false,
        }
    }
}

impl Iterator for SupercoverRay {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if self.ix >= self.nx && self.iy >= self.ny {
            self.done = true;
            return Some(p);
        }
        // Signed error: negative when the vertical boundary comes first.
        let err = i128::from(1 + 2 * self.ix) * i128::from(self.ny)
            - i128::from(1 + 2 * self.iy) * i128::from(self.nx);
        if err <= 0 {
            self.cur.x += self.step.x;
            self.ix += 1;
        }
        if err >= 0 {
            self.cur.y += self.step.y;
            self.iy += 1;
        }
        Some(p)
    }
}

impl std::iter::FusedIterator for SupercoverRay {}
