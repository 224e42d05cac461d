use gridnav_core::Point;

/// Unit steps to the 8 surrounding cells, bottom row first.
pub const DIRECTIONS_8: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

/// Scratch space for neighbor queries, reused across expansions so the
/// search loop does not allocate.
#[derive(Debug, Clone)]
pub struct Neighbors {
    found: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self {
            found: Vec::with_capacity(DIRECTIONS_8.len()),
        }
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cells around `p` accepted by `keep`, in [`DIRECTIONS_8`] order.
    pub fn around(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.found.clear();
        self.found
            .extend(DIRECTIONS_8.iter().map(|&d| p + d).filter(|&n| keep(n)));
        &self.found
    }
}
