use tilenav_core::Point;

/// Manhattan (L1) distance between two points, saturating at `i32::MAX`.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    clamp(a.x.abs_diff(b.x).saturating_add(a.y.abs_diff(b.y)))
}

/// Chebyshev (L∞) distance between two points, saturating at `i32::MAX`.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    clamp(a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)))
}

#[inline]
fn clamp(d: u32) -> i32 {
    i32::try_from(d).unwrap_or(i32::MAX)
}
