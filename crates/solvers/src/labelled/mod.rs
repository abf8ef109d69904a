use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bitgraph::prelude::*;

pub mod lcco;
pub mod tlcco;

pub use lcco::lcco_max_labelled_clique;
pub use tlcco::tlcco_max_labelled_clique;

/// Called on every lexicographic improvement with `(size, cost)`.
pub type LabelledIncumbentCallback = Arc<dyn Fn(u32, u32) + Send + Sync>;

pub struct MaxLabelledCliqueParams {
    /// One label per vertex; label ids must be below 64.
    pub labels: Vec<u8>,
    pub initial_bound: u32,
    pub n_threads: usize,
    pub split_depth: usize,
    pub ordering: VertexOrdering,
    pub abort: Arc<AtomicBool>,
    pub start_time: Instant,
    pub on_incumbent: Option<LabelledIncumbentCallback>,
}

impl MaxLabelledCliqueParams {
    pub fn new(labels: Vec<u8>) -> Self {
        Self {
            labels,
            initial_bound: 0,
            n_threads: num_cpus::get(),
            split_depth: 5,
            ordering: VertexOrdering::Degree,
            abort: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            on_incumbent: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct MaxLabelledCliqueResult {
    /// Size of the best clique found.
    pub size: u32,
    /// Number of distinct labels it uses.
    pub cost: u32,
    /// Members as original vertex ids.
    pub members: BTreeSet<usize>,
    pub nodes: u64,
    pub times: Vec<Duration>,
    pub aborted: bool,
}

impl MaxLabelledCliqueResult {
    /// Folds a worker-local result in, lexicographically: size up, cost down.
    pub fn merge(&mut self, other: MaxLabelledCliqueResult) {
        if other.size > self.size || (other.size == self.size && other.cost < self.cost) {
            self.size = other.size;
            self.cost = other.cost;
            self.members = other.members;
        }
        self.nodes += other.nodes;
        self.aborted |= other.aborted;
    }
}
