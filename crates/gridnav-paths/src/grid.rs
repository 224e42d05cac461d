//! The navigation grid: walkability and smoothed movement penalties.
//!
//! A [`NavGrid`] discretizes the world rectangle of a [`NavConfig`] into
//! square cells of side `2 · cell_radius`. Cells are stored row-major, row 0
//! being the row with the smallest world Y. The grid is built once and is
//! read-only afterwards; per-search state lives in
//! [`PathFinder`](crate::PathFinder), never in the cells.

use gridnav_core::{Point, Range, Vec2};

use crate::blur;
use crate::config::NavConfig;
use crate::error::Result;
use crate::neighbors::Neighbors;
use crate::traits::{ObstacleSampler, TerrainClassifier};

/// One grid cell. Immutable once the grid is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub walkable: bool,
    /// World-space centre of the cell.
    pub world_position: Vec2,
    pub coord: Point,
    /// Terrain plus obstacle-proximity penalty, after smoothing.
    pub penalty: i32,
}

/// Rectangular grid of [`Cell`]s.
///
/// The [`Default`] grid is empty and stands for "not built yet".
#[derive(Debug, Clone, Default)]
pub struct NavGrid {
    cells: Vec<Cell>,
    range: Range,
    bottom_left: Vec2,
    world_size: Vec2,
    cell_radius: f32,
    min_penalty: i32,
    max_penalty: i32,
}

impl NavGrid {
    /// Sample the world and build the grid.
    ///
    /// Fails only on an invalid `config`; see [`NavConfig::validate`].
    pub fn build<S, T>(config: &NavConfig, obstacles: &S, terrain: &T) -> Result<Self>
    where
        S: ObstacleSampler + ?Sized,
        T: TerrainClassifier + ?Sized,
    {
        config.validate()?;

        let dims = config.grid_dimensions();
        let range = Range::sized(dims.x, dims.y);
        let radius = config.cell_radius;
        let diameter = config.cell_diameter();
        let bottom_left = config.world_bottom_left();

        let mut cells = Vec::with_capacity(range.len());
        for coord in range.iter() {
            let world_position = bottom_left
                + Vec2::new(
                    coord.x as f32 * diameter + radius,
                    coord.y as f32 * diameter + radius,
                );
            let walkable = !obstacles.overlaps(world_position, radius);

            let mut penalty = 0;
            if walkable {
                if let Some(category) = terrain.classify(world_position) {
                    penalty = config.terrain_penalties.get(category).copied().unwrap_or(0);
                }
            } else {
                penalty += config.obstacle_proximity_penalty;
            }

            cells.push(Cell {
                walkable,
                world_position,
                coord,
                penalty,
            });
        }

        let mut penalties: Vec<i32> = cells.iter().map(|c| c.penalty).collect();
        blur::box_blur(
            &mut penalties,
            dims.x as usize,
            dims.y as usize,
            config.blur_radius,
        );
        for (cell, penalty) in cells.iter_mut().zip(penalties) {
            cell.penalty = penalty;
        }

        let mut grid = Self {
            cells,
            range,
            bottom_left,
            world_size: config.world_size,
            cell_radius: radius,
            min_penalty: 0,
            max_penalty: 0,
        };
        (grid.min_penalty, grid.max_penalty) = grid.scan_penalty_range();

        log::debug!(
            "built {}x{} navigation grid ({} walkable), penalties {}..={}",
            dims.x,
            dims.y,
            grid.cells.iter().filter(|c| c.walkable).count(),
            grid.min_penalty,
            grid.max_penalty,
        );
        Ok(grid)
    }

    fn scan_penalty_range(&self) -> (i32, i32) {
        self.cells
            .iter()
            .fold(None, |acc: Option<(i32, i32)>, c| match acc {
                None => Some((c.penalty, c.penalty)),
                Some((lo, hi)) => Some((lo.min(c.penalty), hi.max(c.penalty))),
            })
            .unwrap_or((0, 0))
    }

    // -----------------------------------------------------------------------
    // Dimensions
    // -----------------------------------------------------------------------

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// Total number of cells; also the most keys a search heap can hold.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has not been built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cell_radius(&self) -> f32 {
        self.cell_radius
    }

    /// Smallest and largest smoothed penalty, e.g. for normalizing a cost
    /// overlay.
    #[inline]
    pub fn penalty_range(&self) -> (i32, i32) {
        (self.min_penalty, self.max_penalty)
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// Flat index of `p`, or `None` outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Grid coordinate of flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].coord
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.walkable)
    }

    /// Smoothed penalty at `p`; 0 outside the grid.
    #[inline]
    pub fn penalty(&self, p: Point) -> i32 {
        self.cell(p).map_or(0, |c| c.penalty)
    }

    /// World-space centre of `p`.
    #[inline]
    pub fn world_position(&self, p: Point) -> Option<Vec2> {
        self.cell(p).map(|c| c.world_position)
    }

    /// The in-bounds 8-connected neighbors of `p`, walkable or not.
    #[inline]
    pub fn neighbors<'a>(&self, p: Point, buf: &'a mut Neighbors) -> &'a [Point] {
        buf.around(p, |n| self.range.contains(n))
    }

    /// The cell containing world point `v`.
    ///
    /// Points outside the world rectangle map to the nearest border cell.
    /// Returns `None` only for an unbuilt grid.
    pub fn cell_from_world_point(&self, v: Vec2) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let percent_x = ((v.x - self.bottom_left.x) / self.world_size.x).clamp(0.0, 1.0);
        let percent_y = ((v.y - self.bottom_left.y) / self.world_size.y).clamp(0.0, 1.0);
        let x = (percent_x * self.width() as f32).floor() as i32;
        let y = (percent_y * self.height() as f32).floor() as i32;
        Some(self.range.clamp(Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::traits::{NoObstacles, NoTerrain};

    fn ten_by_ten() -> NavConfig {
        NavConfig::default()
            .with_world(Vec2::ZERO, Vec2::new(10.0, 10.0))
            .with_cell_radius(0.5)
    }

    #[test]
    fn build_dimensions_and_positions() {
        let grid = NavGrid::build(&ten_by_ten(), &NoObstacles, &NoTerrain).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.world_position(Point::new(0, 0)), Some(Vec2::new(-4.5, -4.5)));
        assert_eq!(grid.world_position(Point::new(9, 0)), Some(Vec2::new(4.5, -4.5)));
        assert_eq!(grid.world_position(Point::new(3, 7)), Some(Vec2::new(-1.5, 2.5)));
        assert!(grid.cells().iter().all(|c| c.walkable && c.penalty == 0));
        assert_eq!(grid.penalty_range(), (0, 0));
    }

    #[test]
    fn index_round_trip() {
        let grid = NavGrid::build(&ten_by_ten(), &NoObstacles, &NoTerrain).unwrap();
        for p in grid.range() {
            let i = grid.idx(p).unwrap();
            assert_eq!(grid.point(i), p);
        }
        assert_eq!(grid.idx(Point::new(10, 0)), None);
        assert_eq!(grid.idx(Point::new(0, -1)), None);
    }

    #[test]
    fn obstacles_are_unwalkable_and_penalized() {
        let cfg = ten_by_ten().with_blur_radius(0).with_obstacle_proximity_penalty(50);
        let wall = |c: Vec2, _r: f32| c.x > 0.0 && c.x < 1.0;
        let grid = NavGrid::build(&cfg, &wall, &NoTerrain).unwrap();
        for y in 0..10 {
            assert!(!grid.is_walkable(Point::new(5, y)));
            assert_eq!(grid.penalty(Point::new(5, y)), 50);
            assert!(grid.is_walkable(Point::new(4, y)));
            assert_eq!(grid.penalty(Point::new(4, y)), 0);
        }
        assert_eq!(grid.penalty_range(), (0, 50));
    }

    #[test]
    fn terrain_penalties_map_categories() {
        let cfg = ten_by_ten()
            .with_blur_radius(0)
            .with_terrain_penalty("mud", 30)
            .with_terrain_penalty("road", 0);
        let terrain = |p: Vec2| -> Option<&'static str> {
            if p.y < 0.0 {
                Some("mud")
            } else if p.x < 0.0 {
                Some("lava")
            } else {
                None
            }
        };
        let grid = NavGrid::build(&cfg, &NoObstacles, &terrain).unwrap();
        assert_eq!(grid.penalty(Point::new(2, 2)), 30);
        // Unmapped category and no hit both cost nothing.
        assert_eq!(grid.penalty(Point::new(2, 7)), 0);
        assert_eq!(grid.penalty(Point::new(7, 7)), 0);
    }

    #[test]
    fn terrain_is_not_sampled_under_obstacles() {
        let cfg = ten_by_ten()
            .with_blur_radius(0)
            .with_terrain_penalty("mud", 30)
            .with_obstacle_proximity_penalty(5);
        let everywhere = |_p: Vec2, _r: f32| true;
        let mud = |_p: Vec2| -> Option<&'static str> { Some("mud") };
        let grid = NavGrid::build(&cfg, &everywhere, &mud).unwrap();
        assert!(grid.cells().iter().all(|c| !c.walkable && c.penalty == 5));
    }

    #[test]
    fn blur_spreads_obstacle_penalty() {
        let cfg = ten_by_ten().with_blur_radius(1).with_obstacle_proximity_penalty(90);
        let pillar = |c: Vec2, _r: f32| c.distance(Vec2::new(0.5, 0.5)) < 0.1;
        let grid = NavGrid::build(&cfg, &pillar, &NoTerrain).unwrap();
        assert!(!grid.is_walkable(Point::new(5, 5)));
        assert_eq!(grid.penalty(Point::new(5, 5)), 10);
        assert_eq!(grid.penalty(Point::new(4, 6)), 10);
        assert_eq!(grid.penalty(Point::new(3, 5)), 0);
        assert_eq!(grid.penalty_range(), (0, 10));
    }

    #[test]
    fn widest_blur_keeps_wall_penalty() {
        let wall = |c: Vec2, _r: f32| c.x > 0.0 && c.x < 1.0;
        let cfg = ten_by_ten().with_obstacle_proximity_penalty(100);

        // Every window spans the whole row, so the wall column counts once
        // in 21: 100 / 21 rounds to 5 everywhere.
        let widest = cfg.clone().with_blur_radius(10);
        let grid = NavGrid::build(&widest, &wall, &NoTerrain).unwrap();
        assert_eq!(grid.penalty_range(), (5, 5));

        for r in [11, 1 << 32, usize::MAX] {
            let too_wide = cfg.clone().with_blur_radius(r);
            let err = NavGrid::build(&too_wide, &wall, &NoTerrain).unwrap_err();
            assert!(matches!(err, NavError::InvalidConfig(_)), "radius {r}");
        }
    }

    #[test]
    fn uniform_penalty_survives_blur() {
        let cfg = ten_by_ten().with_blur_radius(4).with_terrain_penalty("grass", 7);
        let grass = |_p: Vec2| -> Option<&'static str> { Some("grass") };
        let grid = NavGrid::build(&cfg, &NoObstacles, &grass).unwrap();
        assert!(grid.cells().iter().all(|c| c.penalty == 7));
        assert_eq!(grid.penalty_range(), (7, 7));
    }

    #[test]
    fn neighbors_are_bounds_checked() {
        let grid = NavGrid::build(&ten_by_ten(), &NoObstacles, &NoTerrain).unwrap();
        let mut nb = Neighbors::new();
        assert_eq!(grid.neighbors(Point::new(0, 0), &mut nb).len(), 3);
        assert_eq!(grid.neighbors(Point::new(5, 0), &mut nb).len(), 5);
        assert_eq!(grid.neighbors(Point::new(5, 5), &mut nb).len(), 8);
        assert_eq!(grid.neighbors(Point::new(9, 9), &mut nb).len(), 3);
    }

    #[test]
    fn world_point_maps_to_containing_cell() {
        let grid = NavGrid::build(&ten_by_ten(), &NoObstacles, &NoTerrain).unwrap();
        assert_eq!(grid.cell_from_world_point(Vec2::new(-4.5, -4.5)), Some(Point::new(0, 0)));
        assert_eq!(grid.cell_from_world_point(Vec2::new(0.1, 0.1)), Some(Point::new(5, 5)));
        assert_eq!(grid.cell_from_world_point(Vec2::new(-0.1, 3.9)), Some(Point::new(4, 8)));
        // The far edge belongs to the last cell.
        assert_eq!(grid.cell_from_world_point(Vec2::new(5.0, 5.0)), Some(Point::new(9, 9)));
    }

    #[test]
    fn world_point_outside_is_clamped() {
        let grid = NavGrid::build(&ten_by_ten(), &NoObstacles, &NoTerrain).unwrap();
        assert_eq!(grid.cell_from_world_point(Vec2::new(-100.0, 2.3)), Some(Point::new(0, 7)));
        assert_eq!(grid.cell_from_world_point(Vec2::new(1e6, -1e6)), Some(Point::new(9, 0)));
    }

    #[test]
    fn world_point_respects_origin() {
        let cfg = ten_by_ten().with_world(Vec2::new(100.0, -20.0), Vec2::new(10.0, 10.0));
        let grid = NavGrid::build(&cfg, &NoObstacles, &NoTerrain).unwrap();
        let p = grid.cell_from_world_point(Vec2::new(100.1, -24.9)).unwrap();
        assert_eq!(p, Point::new(5, 0));
        assert_eq!(grid.world_position(p), Some(Vec2::new(100.5, -24.5)));
    }

    #[test]
    fn unbuilt_grid_has_no_cells() {
        let grid = NavGrid::default();
        assert!(grid.is_empty());
        assert_eq!(grid.cell_from_world_point(Vec2::ZERO), None);
        assert!(!grid.is_walkable(Point::ZERO));
    }

    #[test]
    fn invalid_config_fails_fast() {
        let cfg = ten_by_ten().with_cell_radius(0.0);
        let sampled = std::cell::Cell::new(0);
        let counting = |_c: Vec2, _r: f32| {
            sampled.set(sampled.get() + 1);
            false
        };
        assert!(NavGrid::build(&cfg, &counting, &NoTerrain).is_err());
        assert_eq!(sampled.get(), 0);
    }
}
