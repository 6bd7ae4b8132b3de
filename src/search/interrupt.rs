//! Cooperative cancellation for the search tree.
//!
//! `alpha_beta`/`quiescence` poll `Interrupt::poll` every 64 nodes instead of
//! checking a plain `Instant` themselves, so the same signal can be driven by
//! a time budget *or* an external `stop` command delivered from another
//! thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub struct Interrupt {
    stop: Arc<AtomicBool>,
    nodes: Arc<AtomicU64>,
    start: Instant,
    allotted: Option<Duration>,
    max_nodes: Option<u64>,
}

impl Interrupt {
    pub fn new(allotted: Option<Duration>) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            nodes: Arc::new(AtomicU64::new(0)),
            start: Instant::now(),
            allotted,
            max_nodes: None,
        }
    }

    /// Builds an `Interrupt` sharing its stop flag with an external handle,
    /// so a UCI `stop` command can cut a search short from another thread.
    pub fn with_stop_flag(allotted: Option<Duration>, stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            nodes: Arc::new(AtomicU64::new(0)),
            start: Instant::now(),
            allotted,
            max_nodes: None,
        }
    }

    pub fn with_node_limit(mut self, max_nodes: Option<u64>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Counts one more node and, every 64 nodes, checks whether time or an
    /// external `stop` has elapsed. Cheap on the fast path: no syscall unless
    /// the counter wraps.
    #[inline(always)]
    pub fn poll(&self) {
        let n = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if n & 63 != 0 {
            return;
        }
        if self.stop.load(Ordering::Relaxed) {
            return;
        }
        if let Some(limit) = self.allotted
            && self.start.elapsed() >= limit
        {
            self.stop.store(true, Ordering::Relaxed);
            return;
        }
        if let Some(cap) = self.max_nodes
            && n >= cap
        {
            self.stop.store(true, Ordering::Relaxed);
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn allotted(&self) -> Option<Duration> {
        self.allotted
    }
}
