//! Path post-processing: waypoint simplification and steering geometry.

use gridnav_core::{Line, Point, Vec2};

use crate::config::NavConfig;
use crate::grid::NavGrid;

/// The cells of `cells` where the step direction changes, followed by the
/// last cell.
///
/// Straight runs, orthogonal or diagonal, collapse to their end point. The
/// output is never longer than the input.
pub fn corner_cells(cells: &[Point]) -> Vec<Point> {
    let Some(&last) = cells.last() else {
        return Vec::new();
    };
    let mut corners = Vec::new();
    let mut previous_dir = None;
    for w in cells.windows(2) {
        let dir = w[1] - w[0];
        if previous_dir.is_some_and(|d| d != dir) {
            corners.push(w[0]);
        }
        previous_dir = Some(dir);
    }
    corners.push(last);
    corners
}

/// World-space waypoints for a start-to-goal cell sequence, see
/// [`corner_cells`].
pub fn simplify(grid: &NavGrid, cells: &[Point]) -> Vec<Vec2> {
    corner_cells(cells)
        .into_iter()
        .filter_map(|p| grid.world_position(p))
        .collect()
}

/// A simplified path with the geometry a steering controller needs.
///
/// Each look point has a turn boundary: a line across the incoming segment,
/// `turn_distance` before the look point. Crossing it means the controller
/// should start heading for the next look point. The boundary of the last
/// look point sits on the goal itself and is the finish line.
#[derive(Debug, Clone)]
pub struct Path {
    look_points: Vec<Vec2>,
    turn_boundaries: Vec<Line>,
    finish_line_index: usize,
    slow_down_index: usize,
    stopping_distance: f32,
}

impl Path {
    /// Build the steering geometry for `waypoints`, travelled from `start`.
    ///
    /// Returns `None` for an empty waypoint list, i.e. a failed search.
    pub fn new(
        waypoints: Vec<Vec2>,
        start: Vec2,
        turn_distance: f32,
        stopping_distance: f32,
    ) -> Option<Self> {
        let finish_line_index = waypoints.len().checked_sub(1)?;

        let mut turn_boundaries = Vec::with_capacity(waypoints.len());
        let mut previous = start;
        let mut last_dir = Vec2::new(0.0, 1.0);
        for (i, &point) in waypoints.iter().enumerate() {
            let segment = point - previous;
            let mut dir = segment.normalize_or_zero();
            if dir == Vec2::ZERO {
                // Look point on top of its predecessor: borrow a neighbouring
                // segment's direction so the boundary keeps an orientation.
                dir = waypoints
                    .get(i + 1)
                    .map(|&next| (next - point).normalize_or_zero())
                    .filter(|d| *d != Vec2::ZERO)
                    .unwrap_or(last_dir);
            }
            let boundary_point = if i == finish_line_index {
                point
            } else {
                point - dir * turn_distance.min(segment.length())
            };
            turn_boundaries.push(Line::new(boundary_point, boundary_point - dir));
            previous = point;
            last_dir = dir;
        }

        let mut slow_down_index = finish_line_index;
        let mut remaining = 0.0;
        for i in (0..finish_line_index).rev() {
            remaining += waypoints[i].distance(waypoints[i + 1]);
            if remaining > stopping_distance {
                break;
            }
            slow_down_index = i;
        }

        Some(Self {
            look_points: waypoints,
            turn_boundaries,
            finish_line_index,
            slow_down_index,
            stopping_distance,
        })
    }

    /// [`Path::new`] with the distances from `config`.
    pub fn from_config(waypoints: Vec<Vec2>, start: Vec2, config: &NavConfig) -> Option<Self> {
        Self::new(
            waypoints,
            start,
            config.turn_distance,
            config.stopping_distance,
        )
    }

    #[inline]
    pub fn look_points(&self) -> &[Vec2] {
        &self.look_points
    }

    #[inline]
    pub fn turn_boundaries(&self) -> &[Line] {
        &self.turn_boundaries
    }

    #[inline]
    pub fn finish_line_index(&self) -> usize {
        self.finish_line_index
    }

    #[inline]
    pub fn finish_line(&self) -> &Line {
        &self.turn_boundaries[self.finish_line_index]
    }

    /// First look point whose remaining distance along the path is within
    /// the stopping distance.
    #[inline]
    pub fn slow_down_index(&self) -> usize {
        self.slow_down_index
    }

    #[inline]
    pub fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.look_points.len()
    }

    /// Always false; a `Path` has at least one look point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.look_points.is_empty()
    }
}
