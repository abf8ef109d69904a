pub use crate::biclique::{
    cc_max_biclique, ccd_max_biclique, naive_max_biclique, BicliqueSymmetryRemoval,
    MaxBicliqueParams, MaxBicliqueResult,
};
pub use crate::clique::{
    cco_max_clique, naive_max_clique, tcco_max_clique, CcoConfig, CcoMerge, IncumbentCallback,
    MaxCliqueParams, MaxCliqueResult,
};
pub use crate::colour::CcoPermutations;
pub use crate::inference::CcoInference;
pub use crate::labelled::{
    lcco_max_labelled_clique, tlcco_max_labelled_clique, MaxLabelledCliqueParams,
    MaxLabelledCliqueResult,
};
pub use crate::merge::merge_cliques;
pub use crate::parallel::AtomicIncumbent;
pub use crate::registry::{
    lookup, MAX_BICLIQUE_ALGORITHMS, MAX_CLIQUE_ALGORITHMS, MAX_LABELLED_CLIQUE_ALGORITHMS,
    SUBGRAPH_ISOMORPHISM_ALGORITHMS,
};
pub use crate::sgi::{
    cbjd_subgraph_isomorphism, cbjdfast_subgraph_isomorphism, cbjdprobe_subgraph_isomorphism,
    SubgraphIsomorphismParams, SubgraphIsomorphismResult,
};
