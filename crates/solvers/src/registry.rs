use bitgraph::prelude::*;

use crate::biclique::{
    cc_max_biclique, ccd_max_biclique, naive_max_biclique, MaxBicliqueParams, MaxBicliqueResult,
};
use crate::clique::{
    cco_max_clique, naive_max_clique, tcco_max_clique, CcoConfig, CcoMerge, MaxCliqueParams,
    MaxCliqueResult,
};
use crate::colour::CcoPermutations;
use crate::inference::CcoInference;
use crate::labelled::{
    lcco_max_labelled_clique, tlcco_max_labelled_clique, MaxLabelledCliqueParams,
    MaxLabelledCliqueResult,
};
use crate::sgi::{
    cbjd_subgraph_isomorphism, cbjdfast_subgraph_isomorphism, cbjdprobe_subgraph_isomorphism,
    SubgraphIsomorphismParams, SubgraphIsomorphismResult,
};

pub type MaxCliqueFn = fn(&Graph, &MaxCliqueParams) -> Result<MaxCliqueResult, Error>;
pub type MaxBicliqueFn = fn(&Graph, &MaxBicliqueParams) -> Result<MaxBicliqueResult, Error>;
pub type MaxLabelledCliqueFn =
    fn(&Graph, &MaxLabelledCliqueParams) -> Result<MaxLabelledCliqueResult, Error>;
pub type SubgraphIsomorphismFn =
    fn((&Graph, &Graph), &SubgraphIsomorphismParams) -> Result<SubgraphIsomorphismResult, Error>;

macro_rules! cco_entry {
    ($name:ident, $solver:ident, $perm:ident, $inference:ident, $merge:ident) => {
        fn $name(graph: &Graph, params: &MaxCliqueParams) -> Result<MaxCliqueResult, Error> {
            $solver(
                graph,
                params,
                CcoConfig {
                    permutations: CcoPermutations::$perm,
                    inference: CcoInference::$inference,
                    merge: CcoMerge::$merge,
                },
            )
        }
    };
}

cco_entry!(ccon, cco_max_clique, None, None, None);
cco_entry!(ccod, cco_max_clique, Defer1, None, None);
cco_entry!(ccos, cco_max_clique, Sort, None, None);
cco_entry!(ccora, cco_max_clique, RepairAll, None, None);
cco_entry!(ccors, cco_max_clique, RepairSelected, None, None);
cco_entry!(ccoraf, cco_max_clique, RepairAllFast, None, None);
cco_entry!(ccorsf, cco_max_clique, RepairSelectedFast, None, None);
cco_entry!(ccongd, cco_max_clique, None, GlobalDomination, None);
cco_entry!(ccodgd, cco_max_clique, Defer1, GlobalDomination, None);
cco_entry!(ccosgd, cco_max_clique, Sort, GlobalDomination, None);
cco_entry!(ccongds, cco_max_clique, None, GlobalDominationSkip, None);
cco_entry!(ccodgds, cco_max_clique, Defer1, GlobalDominationSkip, None);
cco_entry!(ccosgds, cco_max_clique, Sort, GlobalDominationSkip, None);
cco_entry!(ccongdl, cco_max_clique, None, LazyGlobalDomination, None);
cco_entry!(ccodgdl, cco_max_clique, Defer1, LazyGlobalDomination, None);
cco_entry!(cconmp, cco_max_clique, None, None, Previous);
cco_entry!(ccodmp, cco_max_clique, Defer1, None, Previous);
cco_entry!(cconma, cco_max_clique, None, None, All);
cco_entry!(ccodma, cco_max_clique, Defer1, None, All);
cco_entry!(tccon, tcco_max_clique, None, None, None);
cco_entry!(tccod, tcco_max_clique, Defer1, None, None);
cco_entry!(tccos, tcco_max_clique, Sort, None, None);
cco_entry!(tcconma, tcco_max_clique, None, None, All);

fn naive(graph: &Graph, params: &MaxCliqueParams) -> Result<MaxCliqueResult, Error> {
    naive_max_clique(graph, params)
}

/// Every registered max-clique algorithm. Sequential CCO names follow the
/// pattern `cco` + permutation (`n`/`d`/`s`/`ra`/`rs`/`raf`/`rsf`) +
/// inference (`gd`/`gds`/`gdl`) + merge (`mp`/`ma`); a `t` prefix marks the
/// threaded versions.
pub const MAX_CLIQUE_ALGORITHMS: &[(&str, MaxCliqueFn)] = &[
    ("naive", naive),
    ("ccon", ccon),
    ("ccod", ccod),
    ("ccos", ccos),
    ("ccora", ccora),
    ("ccors", ccors),
    ("ccoraf", ccoraf),
    ("ccorsf", ccorsf),
    ("ccongd", ccongd),
    ("ccodgd", ccodgd),
    ("ccosgd", ccosgd),
    ("ccongds", ccongds),
    ("ccodgds", ccodgds),
    ("ccosgds", ccosgds),
    ("ccongdl", ccongdl),
    ("ccodgdl", ccodgdl),
    ("cconmp", cconmp),
    ("ccodmp", ccodmp),
    ("cconma", cconma),
    ("ccodma", ccodma),
    ("tccon", tccon),
    ("tccod", tccod),
    ("tccos", tccos),
    ("tcconma", tcconma),
];

pub const MAX_BICLIQUE_ALGORITHMS: &[(&str, MaxBicliqueFn)] = &[
    ("naive", naive_max_biclique as MaxBicliqueFn),
    ("cc", cc_max_biclique as MaxBicliqueFn),
    ("ccd", ccd_max_biclique as MaxBicliqueFn),
];

fn lccon(
    graph: &Graph,
    params: &MaxLabelledCliqueParams,
) -> Result<MaxLabelledCliqueResult, Error> {
    lcco_max_labelled_clique(graph, params, CcoPermutations::None)
}

fn lccod(
    graph: &Graph,
    params: &MaxLabelledCliqueParams,
) -> Result<MaxLabelledCliqueResult, Error> {
    lcco_max_labelled_clique(graph, params, CcoPermutations::Defer1)
}

fn tlccon(
    graph: &Graph,
    params: &MaxLabelledCliqueParams,
) -> Result<MaxLabelledCliqueResult, Error> {
    tlcco_max_labelled_clique(graph, params, CcoPermutations::None)
}

fn tlccod(
    graph: &Graph,
    params: &MaxLabelledCliqueParams,
) -> Result<MaxLabelledCliqueResult, Error> {
    tlcco_max_labelled_clique(graph, params, CcoPermutations::Defer1)
}

pub const MAX_LABELLED_CLIQUE_ALGORITHMS: &[(&str, MaxLabelledCliqueFn)] = &[
    ("lccon", lccon),
    ("lccod", lccod),
    ("tlccon", tlccon),
    ("tlccod", tlccod),
];

pub const SUBGRAPH_ISOMORPHISM_ALGORITHMS: &[(&str, SubgraphIsomorphismFn)] = &[
    ("cbjd", cbjd_subgraph_isomorphism as SubgraphIsomorphismFn),
    ("cbjdfast", cbjdfast_subgraph_isomorphism as SubgraphIsomorphismFn),
    ("cbjdprobe", cbjdprobe_subgraph_isomorphism as SubgraphIsomorphismFn),
];

pub fn lookup<F: Copy>(table: &[(&str, F)], name: &str) -> Option<F> {
    table.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_names() {
        assert!(lookup(MAX_CLIQUE_ALGORITHMS, "ccod").is_some());
        assert!(lookup(MAX_CLIQUE_ALGORITHMS, "tccon").is_some());
        assert!(lookup(MAX_CLIQUE_ALGORITHMS, "bogus").is_none());
        assert!(lookup(MAX_BICLIQUE_ALGORITHMS, "ccd").is_some());
        assert!(lookup(SUBGRAPH_ISOMORPHISM_ALGORITHMS, "cbjdprobe").is_some());
        assert!(lookup(MAX_LABELLED_CLIQUE_ALGORITHMS, "tlccod").is_some());
    }

    #[test]
    fn every_clique_algorithm_solves_a_small_instance() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4)]);
        for (name, algorithm) in MAX_CLIQUE_ALGORITHMS {
            let result = algorithm(&graph, &MaxCliqueParams::default()).unwrap();
            assert_eq!(result.size, 3, "{name}");
        }
    }
}
