//! Navigation configuration.
//!
//! A [`NavConfig`] describes the world rectangle, the grid resolution, the
//! terrain cost model, and the steering distances used when turning raw
//! paths into [`Path`](crate::Path)s. Build one with the `with_*` setters or,
//! with the `serde` feature, load it from any serde format. Missing fields
//! take their [`Default`] values.

use std::collections::BTreeMap;

use gridnav_core::{Point, Vec2};

use crate::error::{NavError, Result};

/// Configuration for grid construction and path post-processing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// World-space centre of the navigable rectangle.
    pub origin: Vec2,
    /// Extent of the navigable rectangle along X and Y.
    pub world_size: Vec2,
    /// Half the side length of one cell. Must be positive.
    pub cell_radius: f32,
    /// Movement penalty per terrain category. Unlisted categories cost 0.
    pub terrain_penalties: BTreeMap<String, i32>,
    /// Penalty added to unwalkable cells before smoothing, so that paths keep
    /// some distance from obstacle edges.
    pub obstacle_proximity_penalty: i32,
    /// Box-blur kernel radius applied to the penalty field. 0 disables
    /// smoothing.
    pub blur_radius: usize,
    /// How far before a waypoint steering switches to the next one.
    pub turn_distance: f32,
    /// Remaining path length at which agents start slowing down.
    pub stopping_distance: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            world_size: Vec2::new(30.0, 30.0),
            cell_radius: 0.5,
            terrain_penalties: BTreeMap::new(),
            obstacle_proximity_penalty: 10,
            blur_radius: 3,
            turn_distance: 5.0,
            stopping_distance: 10.0,
        }
    }
}

impl NavConfig {
    pub fn with_world(mut self, origin: Vec2, world_size: Vec2) -> Self {
        self.origin = origin;
        self.world_size = world_size;
        self
    }

    pub fn with_cell_radius(mut self, cell_radius: f32) -> Self {
        self.cell_radius = cell_radius;
        self
    }

    /// Add or replace the penalty for one terrain category.
    pub fn with_terrain_penalty(mut self, category: impl Into<String>, penalty: i32) -> Self {
        self.terrain_penalties.insert(category.into(), penalty);
        self
    }

    pub fn with_obstacle_proximity_penalty(mut self, penalty: i32) -> Self {
        self.obstacle_proximity_penalty = penalty;
        self
    }

    pub fn with_blur_radius(mut self, blur_radius: usize) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    pub fn with_turn_distance(mut self, turn_distance: f32) -> Self {
        self.turn_distance = turn_distance;
        self
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance;
        self
    }

    /// Cell side length.
    #[inline]
    pub fn cell_diameter(&self) -> f32 {
        self.cell_radius * 2.0
    }

    /// Number of cells along each axis: `round(world_size / diameter)`.
    pub fn grid_dimensions(&self) -> Point {
        let d = self.cell_diameter();
        Point::new(
            (self.world_size.x / d).round() as i32,
            (self.world_size.y / d).round() as i32,
        )
    }

    /// Lower-left corner of the world rectangle.
    #[inline]
    pub fn world_bottom_left(&self) -> Vec2 {
        self.origin - self.world_size * 0.5
    }

    /// Check every value and fail on the first one out of range.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_radius.is_finite() && self.cell_radius > 0.0) {
            return Err(NavError::invalid_config(format!(
                "cell_radius must be positive, got {}",
                self.cell_radius
            )));
        }
        if !self.origin.is_finite() {
            return Err(NavError::invalid_config("origin must be finite"));
        }
        if !(self.world_size.is_finite() && self.world_size.x > 0.0 && self.world_size.y > 0.0) {
            return Err(NavError::invalid_config(format!(
                "world_size must be positive on both axes, got {}",
                self.world_size
            )));
        }
        let dims = self.grid_dimensions();
        if dims.x < 1 || dims.y < 1 {
            return Err(NavError::invalid_config(format!(
                "world_size {} with cell_radius {} yields an empty {}x{} grid",
                self.world_size, self.cell_radius, dims.x, dims.y
            )));
        }
        let longest = dims.x.max(dims.y) as usize;
        if self.blur_radius > longest {
            return Err(NavError::invalid_config(format!(
                "blur_radius {} exceeds the longest grid side {longest}",
                self.blur_radius
            )));
        }
        if let Some((name, penalty)) = self.terrain_penalties.iter().find(|(_, p)| **p < 0) {
            return Err(NavError::invalid_config(format!(
                "terrain penalty for {name:?} must not be negative, got {penalty}"
            )));
        }
        if self.obstacle_proximity_penalty < 0 {
            return Err(NavError::invalid_config(format!(
                "obstacle_proximity_penalty must not be negative, got {}",
                self.obstacle_proximity_penalty
            )));
        }
        if !(self.turn_distance.is_finite() && self.turn_distance >= 0.0) {
            return Err(NavError::invalid_config(format!(
                "turn_distance must be non-negative, got {}",
                self.turn_distance
            )));
        }
        if !(self.stopping_distance.is_finite() && self.stopping_distance >= 0.0) {
            return Err(NavError::invalid_config(format!(
                "stopping_distance must be non-negative, got {}",
                self.stopping_distance
            )));
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_document_uses_defaults() {
        let json = r#"{
            "cell_radius": 0.25,
            "terrain_penalties": { "grass": 5, "road": 0 }
        }"#;
        let cfg: NavConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.cell_radius, 0.25);
        assert_eq!(cfg.terrain_penalties.get("grass"), Some(&5));
        assert_eq!(cfg.blur_radius, NavConfig::default().blur_radius);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn round_trip() {
        let cfg = NavConfig::default()
            .with_world(Vec2::new(1.0, -2.0), Vec2::new(8.0, 6.0))
            .with_terrain_penalty("mud", 20);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: NavConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
