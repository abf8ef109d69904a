//! Exact solvers for NP-hard problems on simple undirected graphs: maximum
//! clique, maximum balanced biclique, maximum labelled clique, and subgraph
//! isomorphism.
//!
//! The workhorses are bit-parallel branch-and-bound searches over the
//! fixed-capacity substrate of the [`bitgraph`] crate:
//!
//! - the colour-ordered clique search ([`clique`]), with pluggable
//!   permutation, inference and incumbent-merge policies;
//! - a work-stealing [`parallel`] driver that lifts the sequential searches
//!   onto threads around a shared CAS-updated incumbent;
//! - a two-sided variant for balanced bicliques ([`biclique`]);
//! - a two-objective variant for labelled cliques ([`labelled`]);
//! - a forward-checking subgraph-isomorphism engine with supplemental-graph
//!   filtering, Régin all-different tightening, domination and
//!   conflict-directed backjumping ([`sgi`]).
//!
//! Algorithms are registered by name in [`registry`]; the binaries in the
//! companion application crate resolve names from there.
//!
//! # Example
//!
//! ```
//! use bitgraph::prelude::*;
//! use graph_solvers::prelude::*;
//!
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
//! let result = cco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default())
//!     .unwrap();
//!
//! assert_eq!(result.size, 3);
//! ```

pub mod biclique;
pub mod clique;
pub mod colour;
pub mod inference;
pub mod labelled;
pub mod merge;
pub mod parallel;
pub mod prelude;
pub mod registry;
pub mod sgi;
