//! FIFO path request queue.
//!
//! Hosts that receive many path requests in one frame can enqueue them and
//! drain the queue at their own pace. Requests are served strictly in
//! arrival order, one at a time, each by the queue's own [`PathFinder`].
//! A request's callback runs before the next request is started.

use std::collections::VecDeque;
use std::fmt;

use gridnav_core::Vec2;

use crate::error::Result;
use crate::grid::NavGrid;
use crate::search::{PathFinder, PathResult};

type Callback = Box<dyn FnOnce(PathResult)>;

struct PathRequest {
    start: Vec2,
    goal: Vec2,
    callback: Callback,
}

impl fmt::Debug for PathRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRequest")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .finish_non_exhaustive()
    }
}

/// Single-flight queue of world-space path requests.
#[derive(Default)]
pub struct PathRequestQueue {
    pending: VecDeque<PathRequest>,
    finder: PathFinder,
}

impl fmt::Debug for PathRequestQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRequestQueue")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl PathRequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue served by an existing finder, e.g. one pre-sized with
    /// [`PathFinder::new`].
    pub fn with_finder(finder: PathFinder) -> Self {
        Self {
            pending: VecDeque::new(),
            finder,
        }
    }

    /// Enqueue a request. `callback` receives the result once the request
    /// is processed.
    pub fn request(
        &mut self,
        start: Vec2,
        goal: Vec2,
        callback: impl FnOnce(PathResult) + 'static,
    ) {
        log::trace!("queued path request {start} -> {goal}");
        self.pending.push_back(PathRequest {
            start,
            goal,
            callback: Box::new(callback),
        });
    }

    /// Number of requests waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Serve the oldest request and run its callback.
    ///
    /// Returns `Ok(false)` when the queue is empty. On error the request
    /// stays at the front of the queue and its callback is not called.
    pub fn process_next(&mut self, grid: &NavGrid) -> Result<bool> {
        let Some(req) = self.pending.pop_front() else {
            return Ok(false);
        };
        match self.finder.find_path(grid, req.start, req.goal) {
            Ok(result) => {
                log::trace!(
                    "served path request {} -> {} (success: {}, {} left)",
                    req.start,
                    req.goal,
                    result.success,
                    self.pending.len()
                );
                (req.callback)(result);
                Ok(true)
            }
            Err(err) => {
                if err.is_transient() {
                    log::warn!("path request {} -> {} deferred: {err}", req.start, req.goal);
                }
                self.pending.push_front(req);
                Err(err)
            }
        }
    }

    /// Serve requests until the queue is empty or one fails. Returns how
    /// many were served.
    pub fn process_all(&mut self, grid: &NavGrid) -> Result<usize> {
        let mut served = 0;
        while self.process_next(grid)? {
            served += 1;
        }
        Ok(served)
    }
}
