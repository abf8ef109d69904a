use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bitgraph::prelude::*;

pub mod cb;
mod regin;

use cb::CbConfig;

pub struct SubgraphIsomorphismParams {
    /// Also require non-edges of the pattern to map to non-edges.
    pub induced: bool,
    pub abort: Arc<AtomicBool>,
}

impl Default for SubgraphIsomorphismParams {
    fn default() -> Self {
        Self {
            induced: false,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Clone, Default)]
pub struct SubgraphIsomorphismResult {
    /// Pattern vertex to original target vertex; empty when unsatisfiable.
    pub isomorphism: BTreeMap<usize, usize>,
    pub nodes: u64,
    pub aborted: bool,
}

/// Full-strength variant: distance-3 supplemental graphs, three count
/// classes, Régin all-different tightening.
pub fn cbjd_subgraph_isomorphism(
    graphs: (&Graph, &Graph),
    params: &SubgraphIsomorphismParams,
) -> Result<SubgraphIsomorphismResult, Error> {
    cb::run(graphs, params, CbConfig::new(3, 3, true, false))
}

/// Cheap variant: base graph only, no all-different pass.
pub fn cbjdfast_subgraph_isomorphism(
    graphs: (&Graph, &Graph),
    params: &SubgraphIsomorphismParams,
) -> Result<SubgraphIsomorphismResult, Error> {
    cb::run(graphs, params, CbConfig::new(1, 1, false, false))
}

/// As [`cbjd_subgraph_isomorphism`], preceded by a node-limited probe on the
/// base graph that may settle the instance before the supplemental graphs
/// are even built.
pub fn cbjdprobe_subgraph_isomorphism(
    graphs: (&Graph, &Graph),
    params: &SubgraphIsomorphismParams,
) -> Result<SubgraphIsomorphismResult, Error> {
    cb::run(graphs, params, CbConfig::new(3, 3, true, true))
}
