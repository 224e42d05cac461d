//! Grid navigation for agents moving over a 2D world.
//!
//! The pipeline, in the order a host uses it:
//!
//! | Step | Type | Role |
//! |---|---|---|
//! | Configure | [`NavConfig`] | world rectangle, resolution, terrain costs, steering distances |
//! | Build | [`NavGrid::build`] | sample obstacles and terrain, smooth penalties with a box blur |
//! | Search | [`PathFinder`], [`Search`] | A* over the grid, run to completion or stepped |
//! | Simplify | [`simplify`], [`Path`] | keep direction changes, add turn boundaries and slow-down point |
//! | Follow | [`PathFollower`] | per-tick target and speed factor for an agent |
//!
//! [`PathRequestQueue`] serializes many world-space requests through one
//! finder. The host supplies obstacle and terrain sampling through
//! [`ObstacleSampler`] and [`TerrainClassifier`].
//!
//! Movement is 8-connected with octile step costs (10 orthogonal, 14
//! diagonal), plus the penalty of every cell entered.

mod blur;
mod config;
mod distance;
mod error;
mod follow;
mod grid;
mod heap;
mod neighbors;
mod path;
mod queue;
mod search;
mod traits;

pub use blur::box_blur;
pub use config::NavConfig;
pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, octile};
pub use error::{NavError, Result};
pub use follow::{PathFollower, Steering};
pub use grid::{Cell, NavGrid};
pub use heap::{HeapSlots, IndexedHeap};
pub use neighbors::{DIRECTIONS_8, Neighbors};
pub use path::{Path, corner_cells, simplify};
pub use queue::PathRequestQueue;
pub use search::{CellPath, PathFinder, PathResult, Search, SearchState, UNREACHABLE};
pub use traits::{NoObstacles, NoTerrain, ObstacleSampler, TerrainClassifier};
