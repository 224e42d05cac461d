//! Infinite lines on the world plane, used as turn boundaries.
//!
//! A [`Line`] is built from a point it passes through and a second point
//! lying "behind" it along the line's normal. The second point fixes both the
//! orientation (the line is perpendicular to the segment joining the two
//! points) and the approach side, so callers can ask whether something moving
//! along the segment has crossed the line yet.

use crate::vec2::Vec2;

/// Gradient substituted for vertical lines, which have no finite slope.
const VERTICAL_LINE_GRADIENT: f64 = 1e5;

/// A line in slope-intercept form with a recorded approach side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    gradient: f64,
    y_intercept: f64,
    gradient_perpendicular: f64,
    point_on_line_1: (f64, f64),
    point_on_line_2: (f64, f64),
    approach_side: bool,
}

impl Line {
    /// Line through `point_on_line`, perpendicular to the direction from
    /// `point_perpendicular_to_line` to `point_on_line`. The approach side is
    /// the side `point_perpendicular_to_line` is on.
    pub fn new(point_on_line: Vec2, point_perpendicular_to_line: Vec2) -> Self {
        let (px, py) = (point_on_line.x as f64, point_on_line.y as f64);
        let dx = px - point_perpendicular_to_line.x as f64;
        let dy = py - point_perpendicular_to_line.y as f64;

        let gradient_perpendicular = if dx == 0.0 {
            VERTICAL_LINE_GRADIENT
        } else {
            dy / dx
        };
        let gradient = if gradient_perpendicular == 0.0 {
            VERTICAL_LINE_GRADIENT
        } else {
            -1.0 / gradient_perpendicular
        };

        let mut line = Self {
            gradient,
            y_intercept: py - gradient * px,
            gradient_perpendicular,
            point_on_line_1: (px, py),
            point_on_line_2: (px + 1.0, py + gradient),
            approach_side: false,
        };
        line.approach_side = line.side(point_perpendicular_to_line);
        line
    }

    /// Which half-plane `point` lies in. Points exactly on the line report
    /// `false`.
    pub fn side(&self, point: Vec2) -> bool {
        let (x1, y1) = self.point_on_line_1;
        let (x2, y2) = self.point_on_line_2;
        (point.x as f64 - x1) * (y2 - y1) > (point.y as f64 - y1) * (x2 - x1)
    }

    /// Whether `point` is on the opposite side from the approach side.
    #[inline]
    pub fn has_crossed(&self, point: Vec2) -> bool {
        self.side(point) != self.approach_side
    }

    /// Perpendicular distance from `point` to the line.
    pub fn distance_from_point(&self, point: Vec2) -> f32 {
        let (x, y) = (point.x as f64, point.y as f64);
        let y_intercept_perpendicular = y - self.gradient_perpendicular * x;
        let intersect_x = (y_intercept_perpendicular - self.y_intercept)
            / (self.gradient - self.gradient_perpendicular);
        let intersect_y = self.gradient * intersect_x + self.y_intercept;
        (x - intersect_x).hypot(y - intersect_y) as f32
    }

    /// A point the line passes through.
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.point_on_line_1.0 as f32, self.point_on_line_1.1 as f32)
    }

    /// Slope of the line (the substitute constant for vertical lines).
    #[inline]
    pub fn gradient(&self) -> f64 {
        self.gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn horizontal_boundary_for_upward_travel() {
        // Travelling +y towards (0, 5): the boundary is the line y = 5.
        let line = Line::new(Vec2::new(0.0, 5.0), Vec2::new(0.0, 4.0));
        assert!(!line.has_crossed(Vec2::new(0.0, 0.0)));
        assert!(!line.has_crossed(Vec2::new(3.0, 4.9)));
        assert!(line.has_crossed(Vec2::new(-3.0, 5.1)));
        assert!(line.has_crossed(Vec2::new(100.0, 50.0)));
        assert!(approx(line.distance_from_point(Vec2::new(2.0, 8.0)), 3.0));
    }

    #[test]
    fn vertical_boundary_for_rightward_travel() {
        // Travelling +x towards (2, 1): the boundary is the line x = 2.
        let line = Line::new(Vec2::new(2.0, 1.0), Vec2::new(0.0, 1.0));
        assert_eq!(line.gradient(), VERTICAL_LINE_GRADIENT);
        assert!(!line.has_crossed(Vec2::new(1.5, 7.0)));
        assert!(line.has_crossed(Vec2::new(2.5, -7.0)));
        assert!(approx(line.distance_from_point(Vec2::new(-1.0, 1.0)), 3.0));
    }

    #[test]
    fn diagonal_boundary() {
        // Travelling along +x+y towards (1, 1): boundary is x + y = 2.
        let line = Line::new(Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0));
        assert!(approx(line.gradient() as f32, -1.0));
        assert!(!line.has_crossed(Vec2::new(0.5, 0.5)));
        assert!(!line.has_crossed(Vec2::new(1.9, 0.0)));
        assert!(line.has_crossed(Vec2::new(2.1, 0.0)));
        let d = line.distance_from_point(Vec2::new(0.0, 0.0));
        assert!(approx(d, 2.0_f32.sqrt()));
    }

    #[test]
    fn approach_side_follows_perpendicular_point() {
        // Same line, opposite approach.
        let from_below = Line::new(Vec2::new(0.0, 5.0), Vec2::new(0.0, 4.0));
        let from_above = Line::new(Vec2::new(0.0, 5.0), Vec2::new(0.0, 6.0));
        let p = Vec2::new(1.0, 7.0);
        assert!(from_below.has_crossed(p));
        assert!(!from_above.has_crossed(p));
        assert_eq!(from_below.anchor(), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn degenerate_points_stay_finite() {
        let line = Line::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        assert!(line.gradient().is_finite());
        assert!(line.distance_from_point(Vec2::new(4.0, 4.0)).is_finite());
    }
}
