//! Tick-by-tick consumption of a [`Path`].

use gridnav_core::Vec2;

use crate::path::Path;

/// Speed factors below this count as stopped.
const STOP_THRESHOLD: f32 = 0.01;

/// What an agent should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Look point to head for.
    pub target: Vec2,
    /// Fraction of full speed, in `[0, 1]`.
    pub speed_factor: f32,
    pub finished: bool,
}

impl Steering {
    /// Velocity towards the target at `max_speed` scaled by the speed factor.
    pub fn velocity(&self, position: Vec2, max_speed: f32) -> Vec2 {
        (self.target - position).normalize_or_zero() * (max_speed * self.speed_factor)
    }
}

/// Walks an agent along a [`Path`].
///
/// Call [`update`](Self::update) once per tick with the agent's position.
/// The follower moves on to the next look point whenever the agent crosses
/// the current turn boundary, and scales speed down over the last stretch.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    index: usize,
    finished: bool,
}

impl PathFollower {
    pub fn new(path: Path) -> Self {
        Self {
            path,
            index: 0,
            finished: false,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the look point currently steered towards.
    #[inline]
    pub fn look_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance past every crossed boundary and compute this tick's steering.
    ///
    /// Once finished, every later call reports `finished` with zero speed.
    pub fn update(&mut self, position: Vec2) -> Steering {
        while !self.finished && self.path.turn_boundaries()[self.index].has_crossed(position) {
            if self.index == self.path.finish_line_index() {
                log::trace!("crossed finish line at {position}");
                self.finished = true;
            } else {
                self.index += 1;
            }
        }

        let mut speed_factor = 1.0;
        let stopping = self.path.stopping_distance();
        if !self.finished && self.index >= self.path.slow_down_index() && stopping > 0.0 {
            let remaining = self.path.finish_line().distance_from_point(position);
            speed_factor = (remaining / stopping).clamp(0.0, 1.0);
            if speed_factor < STOP_THRESHOLD {
                self.finished = true;
            }
        }
        if self.finished {
            speed_factor = 0.0;
        }

        Steering {
            target: self.path.look_points()[self.index],
            speed_factor,
            finished: self.finished,
        }
    }
}
