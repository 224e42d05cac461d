use gridnav_core::Point;

/// Cost of one orthogonal step.
pub const ORTHOGONAL_COST: i32 = 10;
/// Cost of one diagonal step, 10·√2 rounded down.
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance between two cells in integer cost units.
///
/// Exact step cost on an obstacle-free 8-connected grid, so it serves both as
/// the edge cost and as an admissible, consistent A* heuristic.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let d = (a - b).abs();
    let (lo, hi) = if d.x < d.y { (d.x, d.y) } else { (d.y, d.x) };
    DIAGONAL_COST * lo + ORTHOGONAL_COST * (hi - lo)
}
