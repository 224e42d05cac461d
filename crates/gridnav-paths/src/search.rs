//! A* search over a [`NavGrid`].
//!
//! [`PathFinder`] owns the per-search scratch state: one node per grid
//! cell and the open-set heap. Nodes carry a generation stamp; starting a
//! search bumps the generation, which invalidates every node left over from
//! earlier searches in O(1) instead of resetting the whole arena.
//!
//! A search is a [`Search`] value that can be driven to completion with
//! [`Search::run`] or one expansion at a time with [`Search::step`], for
//! hosts that spread the work over several frames.

use std::cmp::Ordering;

use gridnav_core::{Point, Vec2};

use crate::distance::octile;
use crate::error::{NavError, Result};
use crate::grid::NavGrid;
use crate::heap::{HeapSlots, IndexedHeap};
use crate::neighbors::Neighbors;
use crate::path::simplify;

/// Cost of a cell not yet reached by the current search.
pub const UNREACHABLE: i64 = i64::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Node arena
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) parent: usize,
    pub(crate) heap_index: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            parent: NO_PARENT,
            heap_index: usize::MAX,
            generation: 0,
            closed: false,
        }
    }
}

impl Node {
    #[inline]
    fn f(&self) -> i64 {
        self.g.saturating_add(self.h)
    }
}

/// Node storage keyed by flat cell index.
#[derive(Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    generation: u32,
}

impl NodeArena {
    fn ensure_len(&mut self, len: usize) {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
    }

    /// Start a new search generation, invalidating every node.
    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 searches ago would look current.
            for n in &mut self.nodes {
                n.generation = 0;
            }
            self.generation = 1;
        }
    }

    /// The node at `idx`, reset first if it belongs to an older search.
    #[inline]
    fn touch(&mut self, idx: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::default()
            };
        }
        n
    }

    #[inline]
    fn is_current(&self, idx: usize) -> bool {
        self.nodes[idx].generation == self.generation
    }
}

impl HeapSlots<usize> for NodeArena {
    /// Lower f first, then lower h.
    fn compare(&self, a: usize, b: usize) -> Ordering {
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        a.f().cmp(&b.f()).then(a.h.cmp(&b.h))
    }

    #[inline]
    fn heap_index(&self, key: usize) -> usize {
        self.nodes[key].heap_index
    }

    #[inline]
    fn set_heap_index(&mut self, key: usize, index: usize) {
        self.nodes[key].heap_index = index;
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Raw search output: every cell from start to goal, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPath {
    pub cells: Vec<Point>,
    /// Accumulated step cost plus the penalties of every entered cell.
    pub cost: i64,
}

/// Answer to a world-space path request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathResult {
    /// Simplified waypoints from start to goal; empty on failure.
    pub waypoints: Vec<Vec2>,
    pub success: bool,
}

impl PathResult {
    /// The result reported for an unreachable goal.
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Succeeded,
    Failed,
}

impl SearchState {
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable A* engine.
///
/// Holds scratch state sized for one grid; reuse the same finder for every
/// request against that grid so repeated searches do not allocate.
#[derive(Default)]
pub struct PathFinder {
    arena: NodeArena,
    open: IndexedHeap<usize>,
    nbuf: Neighbors,
}

impl PathFinder {
    /// Create a finder with scratch space for `grid`.
    pub fn new(grid: &NavGrid) -> Self {
        let mut arena = NodeArena::default();
        arena.ensure_len(grid.len());
        Self {
            arena,
            open: IndexedHeap::with_capacity(grid.len()),
            nbuf: Neighbors::new(),
        }
    }

    /// Begin a search from cell `start` to cell `goal`.
    ///
    /// Nothing happens until the returned [`Search`] is stepped or run.
    /// Out-of-range cells make the search fail on its first step.
    pub fn search<'a>(&'a mut self, grid: &'a NavGrid, start: Point, goal: Point) -> Search<'a> {
        self.arena.ensure_len(grid.len());
        Search {
            finder: self,
            grid,
            start,
            goal,
            state: SearchState::Idle,
            expanded: 0,
        }
    }

    /// Find a path between two world points and simplify it into waypoints.
    ///
    /// An unreachable goal yields `Ok` with `success == false`. The only
    /// error is [`NavError::GridNotReady`] for an unbuilt grid.
    pub fn find_path(&mut self, grid: &NavGrid, start: Vec2, goal: Vec2) -> Result<PathResult> {
        let (Some(from), Some(to)) = (
            grid.cell_from_world_point(start),
            grid.cell_from_world_point(goal),
        ) else {
            return Err(NavError::GridNotReady);
        };

        let mut search = self.search(grid, from, to);
        let path = search.run_to_end();
        let expanded = search.expanded();

        match path {
            Some(path) => {
                log::debug!(
                    "path {from} -> {to}: {} cells, cost {}, {expanded} expanded",
                    path.cells.len(),
                    path.cost
                );
                Ok(PathResult {
                    waypoints: simplify(grid, &path.cells),
                    success: true,
                })
            }
            None => {
                log::debug!("no path {from} -> {to} ({expanded} expanded)");
                Ok(PathResult::failed())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One in-flight A* search.
///
/// Borrows the finder mutably, so a finder runs at most one search at a
/// time, and the grid immutably for the whole search.
pub struct Search<'a> {
    finder: &'a mut PathFinder,
    grid: &'a NavGrid,
    start: Point,
    goal: Point,
    state: SearchState,
    expanded: usize,
}

impl Search<'_> {
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of cells taken off the open set so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Advance the search by one transition: seeding from `Idle`, or one
    /// expansion while `Searching`. Terminal states are left unchanged.
    pub fn step(&mut self) -> SearchState {
        match self.state {
            SearchState::Idle => self.begin(),
            SearchState::Searching => self.expand_next(),
            SearchState::Succeeded | SearchState::Failed => {}
        }
        self.state
    }

    /// Step until the search finishes, then return the path if one exists.
    pub fn run(mut self) -> Option<CellPath> {
        self.run_to_end()
    }

    fn run_to_end(&mut self) -> Option<CellPath> {
        while !self.is_finished() {
            self.step();
        }
        self.path()
    }

    /// The start-to-goal path once the search has succeeded.
    pub fn path(&self) -> Option<CellPath> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        let grid = self.grid;
        let nodes = &self.finder.arena.nodes;
        let goal_idx = grid.idx(self.goal)?;

        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            cells.push(grid.point(ci));
            ci = nodes[ci].parent;
        }
        cells.reverse();
        Some(CellPath {
            cells,
            cost: nodes[goal_idx].g,
        })
    }

    fn begin(&mut self) {
        let grid = self.grid;
        let (Some(start_idx), Some(_)) = (grid.idx(self.start), grid.idx(self.goal)) else {
            self.state = SearchState::Failed;
            return;
        };
        if !grid.is_walkable(self.start) || !grid.is_walkable(self.goal) {
            self.state = SearchState::Failed;
            return;
        }

        let PathFinder { arena, open, .. } = &mut *self.finder;
        arena.next_generation();
        open.clear();

        let start = arena.touch(start_idx);
        start.g = 0;
        start.h = octile(self.start, self.goal).into();
        open.push(arena, start_idx);

        self.state = SearchState::Searching;
    }

    fn expand_next(&mut self) {
        let grid = self.grid;
        let goal = self.goal;
        let PathFinder { arena, open, nbuf } = &mut *self.finder;

        let Some(ci) = open.pop(arena) else {
            self.state = SearchState::Failed;
            return;
        };
        self.expanded += 1;
        arena.nodes[ci].closed = true;

        let current = grid.point(ci);
        if current == goal {
            self.state = SearchState::Succeeded;
            return;
        }
        let current_g = arena.nodes[ci].g;

        for &np in grid.neighbors(current, nbuf) {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if !grid.cell_at(ni).walkable {
                continue;
            }
            if arena.is_current(ni) && arena.nodes[ni].closed {
                continue;
            }

            let step = i64::from(octile(current, np)) + i64::from(grid.cell_at(ni).penalty);
            let tentative_g = current_g.saturating_add(step);
            let in_open = arena.is_current(ni) && open.contains(arena, ni);

            let n = arena.touch(ni);
            if tentative_g < n.g || !in_open {
                n.g = tentative_g;
                n.h = octile(np, goal).into();
                n.parent = ci;
                if in_open {
                    open.decrease_key(arena, ni);
                } else {
                    open.push(arena, ni);
                }
            }
        }
    }
}
