use std::path::Path;

use crate::graph::Graph;
use crate::Error;

pub mod dimacs;
pub mod lad;

pub use dimacs::read_dimacs;
pub use lad::read_lad;

/// Supported input formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    Dimacs,
    Lad,
}

impl GraphFormat {
    pub const NAMES: &'static [(&'static str, GraphFormat)] =
        &[("dimacs", GraphFormat::Dimacs), ("lad", GraphFormat::Lad)];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, f)| f)
    }
}

pub fn read_graph<P: AsRef<Path>>(path: P, format: GraphFormat) -> Result<Graph, Error> {
    match format {
        GraphFormat::Dimacs => read_dimacs(path),
        GraphFormat::Lad => read_lad(path),
    }
}

/// Splits a raw input line into whitespace-separated fields.
fn fields(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|f| !f.is_empty())
}
