use std::sync::atomic::Ordering;

use bitgraph::prelude::*;
use log::debug;
use rayon::prelude::*;

use super::regin::regin_all_different;
use super::{SubgraphIsomorphismParams, SubgraphIsomorphismResult};

/// Upper bound on `1 + (l-1)·k`, so per-node bookkeeping lives in fixed
/// arrays.
pub(crate) const MAX_AUX_GRAPHS: usize = 13;

/// Shape of the filtering machinery for one registered variant.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CbConfig {
    /// Count classes per walk length.
    pub k: usize,
    /// Longest counted walk; `1` means the base graph only.
    pub l: usize,
    /// Run the Régin all-different pass after domain initialisation.
    pub all_different: bool,
    /// Run a node-limited probe on the base graph first.
    pub probe: bool,
}

impl CbConfig {
    pub(crate) fn new(k: usize, l: usize, all_different: bool, probe: bool) -> Self {
        assert!(k >= 1 && k <= 3 && l >= 1 && l <= 4);
        Self {
            k,
            l,
            all_different,
            probe,
        }
    }

    fn max_graphs(self) -> usize {
        1 + (self.l - 1) * self.k
    }
}

#[derive(Clone)]
pub(crate) struct Domain<const W: usize> {
    /// The pattern vertex this domain belongs to.
    pub v: usize,
    /// Cached popcount of `values`.
    pub popcount: u32,
    /// Allowed target vertices.
    pub values: FixedBitSet<W>,
    /// Pattern vertices whose assignments contributed to tightening this
    /// domain; this is what backjumping propagates.
    pub conflicts: FixedBitSet<W>,
}

enum Search {
    Aborted,
    Unsatisfiable,
    Satisfiable,
}

pub(crate) fn run(
    graphs: (&Graph, &Graph),
    params: &SubgraphIsomorphismParams,
    config: CbConfig,
) -> Result<SubgraphIsomorphismResult, Error> {
    struct Run<'a> {
        pattern: &'a Graph,
        target: &'a Graph,
        params: &'a SubgraphIsomorphismParams,
        config: CbConfig,
    }

    impl SizedRun for Run<'_> {
        type Output = SubgraphIsomorphismResult;

        fn run<const W: usize>(self) -> SubgraphIsomorphismResult {
            Cb::<W>::new(self.pattern, self.target, self.params, self.config).run()
        }
    }

    let (pattern, target) = graphs;
    dispatch_graph_size(
        target.size().max(pattern.size()),
        Run {
            pattern,
            target,
            params,
            config,
        },
    )
}

struct Cb<'a, const W: usize> {
    params: &'a SubgraphIsomorphismParams,
    config: CbConfig,
    pattern_size: usize,
    target_size: usize,
    /// Base graph at index 0, supplemental graphs after it.
    pattern_graphs: Vec<FixedBitGraph<W>>,
    target_graphs: Vec<FixedBitGraph<W>>,
    /// Search index to original target vertex.
    order: Vec<usize>,
    /// `pattern_dominations[w]` holds every `v` interchangeable with `w`.
    pattern_dominations: Vec<FixedBitSet<W>>,
    /// `target_dominations[v]` holds every `w` whose neighbourhood `v`
    /// covers.
    target_dominations: Vec<FixedBitSet<W>>,
}

impl<'a, const W: usize> Cb<'a, W> {
    fn new(
        pattern: &'a Graph,
        target: &'a Graph,
        params: &'a SubgraphIsomorphismParams,
        config: CbConfig,
    ) -> Self {
        let pattern_size = pattern.size();
        let target_size = target.size();

        let mut order: Vec<usize> = (0..target_size).collect();
        bitgraph::order::degree_sort(target, &mut order);

        let mut pattern_base = FixedBitGraph::new(pattern_size);
        for i in 0..pattern_size {
            for j in i..pattern_size {
                if pattern.adjacent(i, j) {
                    pattern_base.add_edge(i, j);
                }
            }
        }

        let mut target_base = FixedBitGraph::new(target_size);
        for i in 0..target_size {
            for j in i..target_size {
                if target.adjacent(order[i], order[j]) {
                    target_base.add_edge(i, j);
                }
            }
        }

        Self {
            params,
            config,
            pattern_size,
            target_size,
            pattern_graphs: vec![pattern_base],
            target_graphs: vec![target_base],
            order,
            pattern_dominations: Vec::new(),
            target_dominations: Vec::new(),
        }
    }

    fn run(mut self) -> SubgraphIsomorphismResult {
        let mut result = SubgraphIsomorphismResult::default();

        // fixed-capacity bookkeeping is sized for the target side
        if self.pattern_size > self.target_size {
            return result;
        }

        self.initialise_dominations();

        if self.config.probe {
            // one bounded attempt on the base graph; often settles the
            // instance before the supplemental graphs are built
            let mut domains = self.fresh_domains();
            if !self.initialise_domains(&mut domains, 1) {
                return result;
            }
            self.prepare_for_search(&mut domains);

            let mut assignments = vec![usize::MAX; self.pattern_size];
            let mut conflicts = FixedBitSet::new(self.pattern_size);
            let limit = (self.pattern_size * self.pattern_size) as u64;
            match self.search(
                &mut assignments,
                &mut domains,
                &mut result.nodes,
                &mut conflicts,
                limit,
                1,
            ) {
                Search::Satisfiable => {
                    self.extract(&assignments, &mut result);
                    return result;
                }
                Search::Unsatisfiable => return result,
                Search::Aborted => debug!("probe hit its node limit"),
            }
        }

        self.build_supplemental_graphs();

        let g_end = self.config.max_graphs();
        let mut domains = self.fresh_domains();
        if !self.initialise_domains(&mut domains, g_end) {
            return result;
        }
        if self.config.all_different
            && !regin_all_different(&mut domains, self.pattern_size, self.target_size)
        {
            return result;
        }
        self.prepare_for_search(&mut domains);

        let mut assignments = vec![usize::MAX; self.pattern_size];
        let mut conflicts = FixedBitSet::new(self.pattern_size);
        if let Search::Satisfiable = self.search(
            &mut assignments,
            &mut domains,
            &mut result.nodes,
            &mut conflicts,
            0,
            g_end,
        ) {
            self.extract(&assignments, &mut result);
        }

        result.aborted = self.params.abort.load(Ordering::SeqCst);
        result
    }

    fn extract(&self, assignments: &[usize], result: &mut SubgraphIsomorphismResult) {
        for (v, &f) in assignments.iter().enumerate() {
            result.isomorphism.insert(v, self.order[f]);
        }
    }

    fn fresh_domains(&self) -> Vec<Domain<W>> {
        (0..self.pattern_size)
            .map(|v| Domain {
                v,
                popcount: 0,
                values: FixedBitSet::new(self.target_size),
                conflicts: FixedBitSet::new(self.pattern_size),
            })
            .collect()
    }

    fn prepare_for_search(&self, domains: &mut [Domain<W>]) {
        for d in domains.iter_mut() {
            d.conflicts.unset_all();
            d.popcount = d.values.popcount();
        }
    }

    /// Neighbourhood-degree-sequence filtering, repeated to fixpoint over the
    /// allowed target vertices.
    fn initialise_domains(&self, domains: &mut [Domain<W>], g_end: usize) -> bool {
        let mut allowed = FixedBitSet::<W>::new(self.target_size);
        allowed.set_all();
        let mut remaining_target_vertices = self.target_size as u32;

        loop {
            // degree sequences; target degrees only count allowed vertices
            let mut patterns_ndss: Vec<Vec<Vec<u32>>> = Vec::with_capacity(g_end);
            for g in 0..g_end {
                let degrees: Vec<u32> = (0..self.pattern_size)
                    .map(|i| self.pattern_graphs[g].degree(i))
                    .collect();
                let ndss: Vec<Vec<u32>> = (0..self.pattern_size)
                    .map(|i| {
                        let mut nds: Vec<u32> = self.pattern_graphs[g]
                            .neighbourhood(i)
                            .iter()
                            .map(|j| degrees[j])
                            .collect();
                        nds.sort_unstable_by(|a, b| b.cmp(a));
                        nds
                    })
                    .collect();
                patterns_ndss.push(ndss);
            }

            let mut targets_ndss: Vec<Vec<Vec<u32>>> = Vec::with_capacity(g_end);
            for g in 0..g_end {
                let degrees: Vec<u32> = (0..self.target_size)
                    .into_par_iter()
                    .map(|i| {
                        let mut remaining = allowed;
                        self.target_graphs[g].intersect_with_row(i, &mut remaining);
                        remaining.popcount()
                    })
                    .collect();
                let ndss: Vec<Vec<u32>> = (0..self.target_size)
                    .into_par_iter()
                    .map(|i| {
                        let mut nds: Vec<u32> = self.target_graphs[g]
                            .neighbourhood(i)
                            .iter()
                            .map(|j| degrees[j])
                            .collect();
                        nds.sort_unstable_by(|a, b| b.cmp(a));
                        nds
                    })
                    .collect();
                targets_ndss.push(ndss);
            }

            for i in 0..self.pattern_size {
                let d = &mut domains[i];
                d.v = i;
                d.values.unset_all();

                'target: for j in 0..self.target_size {
                    if !allowed.test(j) {
                        continue;
                    }
                    for g in 0..g_end {
                        let pattern_loop = self.pattern_graphs[g].adjacent(i, i);
                        let target_loop = self.target_graphs[g].adjacent(j, j);
                        if pattern_loop && !target_loop {
                            continue 'target;
                        }
                        if self.params.induced && target_loop && !pattern_loop {
                            continue 'target;
                        }
                        let pattern_nds = &patterns_ndss[g][i];
                        let target_nds = &targets_ndss[g][j];
                        if target_nds.len() < pattern_nds.len() {
                            continue 'target;
                        }
                        for (p, t) in pattern_nds.iter().zip(target_nds.iter()) {
                            if t < p {
                                continue 'target;
                            }
                        }
                    }
                    d.values.set(j);
                }

                d.popcount = d.values.popcount();
            }

            let mut domains_union = FixedBitSet::<W>::new(self.target_size);
            for d in domains.iter() {
                domains_union.union_with(&d.values);
            }

            let union_popcount = domains_union.popcount();
            if union_popcount < self.pattern_size as u32 {
                return false;
            } else if union_popcount == remaining_target_vertices {
                return true;
            }

            allowed.intersect_with(&domains_union);
            remaining_target_vertices = allowed.popcount();
        }
    }

    /// Pattern side: `w` and `v` are interchangeable when their
    /// neighbourhoods agree once each is removed from the other's. Target
    /// side: `v` dominates `w` when `N(w) ⊆ N(v)`.
    fn initialise_dominations(&mut self) {
        let pattern = &self.pattern_graphs[0];
        self.pattern_dominations = (0..self.pattern_size)
            .map(|w| {
                let mut row = FixedBitSet::new(self.pattern_size);
                for v in 0..self.pattern_size {
                    if v != w {
                        let mut n_v = *pattern.neighbourhood(v);
                        let mut n_w = *pattern.neighbourhood(w);
                        n_v.unset(w);
                        n_w.unset(v);
                        if n_v == n_w {
                            row.set(v);
                        }
                    }
                }
                row
            })
            .collect();

        let target = &self.target_graphs[0];
        self.target_dominations = (0..self.target_size)
            .into_par_iter()
            .map(|v| {
                let mut row = FixedBitSet::new(self.target_size);
                for w in 0..self.target_size {
                    if v != w {
                        let mut n_w = *target.neighbourhood(w);
                        n_w.intersect_with_complement(target.neighbourhood(v));
                        if n_w.is_empty() {
                            row.set(w);
                        }
                    }
                }
                row
            })
            .collect();
    }

    fn build_supplemental_graphs(&mut self) {
        let max_graphs = self.config.max_graphs();
        let (k, l) = (self.config.k, self.config.l);
        build_supplemental(&mut self.pattern_graphs, self.pattern_size, k, l, max_graphs);
        build_supplemental(&mut self.target_graphs, self.target_size, k, l, max_graphs);
    }

    /// After assigning `branch_v ↦ f_v`: drop `f_v` everywhere, intersect the
    /// domains of pattern neighbours with the target row of `f_v` per graph,
    /// and fail fast on an incremental Hall violation.
    fn propagate(
        &self,
        new_domains: &mut [Domain<W>],
        branch_v: usize,
        f_v: usize,
        conflicts: &mut FixedBitSet<W>,
        g_end: usize,
    ) -> bool {
        let mut unassigned_neighbours = [0u32; MAX_AUX_GRAPHS];
        let mut unions = [FixedBitSet::<W>::new(self.target_size); MAX_AUX_GRAPHS];
        let mut union_conflicts = [FixedBitSet::<W>::new(self.pattern_size); MAX_AUX_GRAPHS];
        let mut hall_mask = FixedBitSet::<W>::new(self.target_size);

        // smallest domains first, so failures surface before the work
        let mut domains_order: Vec<usize> = (0..new_domains.len()).collect();
        domains_order.sort_by(|&a, &b| {
            new_domains[a]
                .popcount
                .cmp(&new_domains[b].popcount)
                .then_with(|| {
                    self.target_graphs[0]
                        .degree(b)
                        .cmp(&self.target_graphs[0].degree(a))
                })
        });

        for &index in &domains_order {
            let d = &mut new_domains[index];
            d.values.unset(f_v);

            let mut future_hall_set = None;

            for g in 0..g_end {
                if !self.pattern_graphs[g].adjacent(branch_v, d.v) {
                    continue;
                }

                self.target_graphs[g].intersect_with_row(f_v, &mut d.values);
                d.values.intersect_with_complement(&hall_mask);

                unions[g].union_with(&d.values);
                union_conflicts[g].union_with(&d.conflicts);
                let union_popcount = unions[g].popcount();
                unassigned_neighbours[g] += 1;

                if unassigned_neighbours[g] > union_popcount {
                    // not enough values to go around
                    if union_popcount == 0 || d.values.popcount() == 0 {
                        *conflicts = d.conflicts;
                    } else {
                        conflicts.union_with(&union_conflicts[g]);
                        conflicts.union_with(&d.conflicts);
                    }
                    return false;
                } else if unassigned_neighbours[g] == union_popcount {
                    future_hall_set = Some(unions[g]);
                }
            }

            if let Some(hall) = future_hall_set {
                // a tight set: its values are spoken for, so mask them away
                // from the neighbours still to come
                hall_mask.union_with(&hall);
                for g in 0..g_end {
                    unassigned_neighbours[g] = 0;
                    unions[g].unset_all();
                }
            }

            let old_popcount = d.popcount;
            d.popcount = d.values.popcount();

            if d.popcount == 0 {
                *conflicts = d.conflicts;
                return false;
            }
            if d.popcount != old_popcount {
                d.conflicts.set(branch_v);
            }
        }

        true
    }

    fn search(
        &self,
        assignments: &mut Vec<usize>,
        domains: &mut Vec<Domain<W>>,
        nodes: &mut u64,
        conflicts: &mut FixedBitSet<W>,
        probe_limit: u64,
        g_end: usize,
    ) -> Search {
        if self.params.abort.load(Ordering::Relaxed) {
            return Search::Aborted;
        }

        *nodes += 1;
        if probe_limit != 0 && *nodes > probe_limit {
            return Search::Aborted;
        }

        let branch_index = match domains
            .iter()
            .enumerate()
            .min_by_key(|(_, d)| (d.popcount, d.v))
        {
            Some((index, _)) => index,
            None => return Search::Satisfiable,
        };

        let branch_v = domains[branch_index].v;
        let mut remaining = domains[branch_index].values;
        let branch_conflicts = domains[branch_index].conflicts;
        conflicts.union_with(&branch_conflicts);

        while let Some(f_v) = remaining.first_set_bit() {
            remaining.unset(f_v);

            // try assigning f_v to v
            assignments[branch_v] = f_v;

            // if v cannot take f_v, it cannot take anything f_v dominates
            remaining.intersect_with_complement(&self.target_dominations[f_v]);

            let mut new_domains: Vec<Domain<W>> = domains
                .iter()
                .filter(|d| d.v != branch_v)
                .cloned()
                .collect();

            let mut propagate_conflicts = FixedBitSet::new(self.pattern_size);
            if !self.propagate(
                &mut new_domains,
                branch_v,
                f_v,
                &mut propagate_conflicts,
                g_end,
            ) {
                conflicts.union_with(&propagate_conflicts);
                continue;
            }

            let mut search_conflicts = FixedBitSet::new(self.pattern_size);
            match self.search(
                assignments,
                &mut new_domains,
                nodes,
                &mut search_conflicts,
                probe_limit,
                g_end,
            ) {
                Search::Satisfiable => return Search::Satisfiable,
                Search::Aborted => return Search::Aborted,
                Search::Unsatisfiable => {}
            }

            conflicts.union_with(&search_conflicts);

            // the whole subtree failed without ever blaming us: no other
            // value of ours can help, so jump
            if !search_conflicts.test(branch_v) {
                return Search::Unsatisfiable;
            }

            // no sibling dominated by v can take f_v or anything it dominates
            for d in domains.iter_mut() {
                if self.pattern_dominations[branch_v].test(d.v) {
                    d.values.unset(f_v);
                    d.values.intersect_with_complement(&self.target_dominations[f_v]);
                }
            }
        }

        Search::Unsatisfiable
    }
}

fn bump_walk_count<const W: usize>(
    graphs: &mut [FixedBitGraph<W>],
    base: usize,
    k: usize,
    v: usize,
    w: usize,
) {
    if k >= 3 && graphs[base + 2].adjacent(v, w) {
        graphs[base + 3].add_edge(v, w);
    } else if k >= 2 && graphs[base + 1].adjacent(v, w) {
        graphs[base + 2].add_edge(v, w);
    } else {
        graphs[base + 1].add_edge(v, w);
    }
}

/// Builds the counted-walk graphs on top of `graphs[0]`: aux graph `base + i`
/// holds an edge `(v, w)` when at least `i` distinct walks of the given
/// length connect them (walks never immediately backtrack).
fn build_supplemental<const W: usize>(
    graphs: &mut Vec<FixedBitGraph<W>>,
    n: usize,
    k: usize,
    l: usize,
    max_graphs: usize,
) {
    for _ in 1..max_graphs {
        graphs.push(FixedBitGraph::new(n));
    }

    if l >= 2 {
        for v in 0..n {
            let nv = *graphs[0].neighbourhood(v);
            for c in nv.iter() {
                let nc = *graphs[0].neighbourhood(c);
                for w in nc.iter() {
                    if w > v {
                        break;
                    }
                    bump_walk_count(graphs, 0, k, v, w);
                }
            }
        }
    }

    if l >= 3 {
        for v in 0..n {
            let nv = *graphs[0].neighbourhood(v);
            for c in nv.iter() {
                let nc = *graphs[0].neighbourhood(c);
                for d in nc.iter() {
                    if d == v {
                        continue;
                    }
                    let nd = *graphs[0].neighbourhood(d);
                    for w in nd.iter() {
                        if w > v {
                            break;
                        }
                        if w == c {
                            continue;
                        }
                        bump_walk_count(graphs, k, k, v, w);
                    }
                }
            }
        }
    }

    if l >= 4 {
        for v in 0..n {
            let nv = *graphs[0].neighbourhood(v);
            for c in nv.iter() {
                let nc = *graphs[0].neighbourhood(c);
                for d in nc.iter() {
                    if d == v {
                        continue;
                    }
                    let nd = *graphs[0].neighbourhood(d);
                    for e in nd.iter() {
                        if e == c {
                            continue;
                        }
                        let ne = *graphs[0].neighbourhood(e);
                        for w in ne.iter() {
                            if w > v {
                                break;
                            }
                            if w == d {
                                continue;
                            }
                            bump_walk_count(graphs, 2 * k, k, v, w);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgi::{
        cbjd_subgraph_isomorphism, cbjdfast_subgraph_isomorphism, cbjdprobe_subgraph_isomorphism,
    };

    type Solver = fn(
        (&Graph, &Graph),
        &SubgraphIsomorphismParams,
    ) -> Result<SubgraphIsomorphismResult, Error>;

    const SOLVERS: &[(&str, Solver)] = &[
        ("cbjd", cbjd_subgraph_isomorphism),
        ("cbjdfast", cbjdfast_subgraph_isomorphism),
        ("cbjdprobe", cbjdprobe_subgraph_isomorphism),
    ];

    fn check_mapping(
        pattern: &Graph,
        target: &Graph,
        result: &SubgraphIsomorphismResult,
        induced: bool,
    ) {
        assert_eq!(result.isomorphism.len(), pattern.size());
        let map = &result.isomorphism;

        // injective
        let mut images: Vec<usize> = map.values().copied().collect();
        images.sort_unstable();
        images.dedup();
        assert_eq!(images.len(), pattern.size());

        for u in 0..pattern.size() {
            for v in 0..pattern.size() {
                if u == v {
                    continue;
                }
                if pattern.adjacent(u, v) {
                    assert!(target.adjacent(map[&u], map[&v]));
                } else if induced {
                    assert!(!target.adjacent(map[&u], map[&v]));
                }
            }
        }
    }

    fn c4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    fn k33() -> Graph {
        Graph::from_edges(
            6,
            &[(0, 3), (0, 4), (0, 5), (1, 3), (1, 4), (1, 5), (2, 3), (2, 4), (2, 5)],
        )
    }

    #[test]
    fn c4_embeds_into_k33() {
        let pattern = c4();
        let target = k33();
        for (name, solver) in SOLVERS {
            let result = solver((&pattern, &target), &SubgraphIsomorphismParams::default())
                .unwrap();
            assert!(!result.isomorphism.is_empty(), "{name}");
            check_mapping(&pattern, &target, &result, false);
        }
    }

    #[test]
    fn triangle_does_not_embed_into_bipartite_target() {
        let pattern = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let target = k33();
        for (name, solver) in SOLVERS {
            let result = solver((&pattern, &target), &SubgraphIsomorphismParams::default())
                .unwrap();
            assert!(result.isomorphism.is_empty(), "{name}");
        }
    }

    #[test]
    fn induced_forbids_extra_edges() {
        // a path on three vertices embeds into a triangle, but not once
        // non-edges must be preserved
        let pattern = Graph::from_edges(3, &[(0, 1), (1, 2)]);
        let target = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);

        let relaxed = cbjd_subgraph_isomorphism(
            (&pattern, &target),
            &SubgraphIsomorphismParams::default(),
        )
        .unwrap();
        assert!(!relaxed.isomorphism.is_empty());
        check_mapping(&pattern, &target, &relaxed, false);

        let induced = cbjd_subgraph_isomorphism(
            (&pattern, &target),
            &SubgraphIsomorphismParams {
                induced: true,
                ..SubgraphIsomorphismParams::default()
            },
        )
        .unwrap();
        assert!(induced.isomorphism.is_empty());
    }

    #[test]
    fn oversized_pattern_fails_without_searching() {
        let pattern = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let target = Graph::from_edges(2, &[(0, 1)]);
        let result = cbjd_subgraph_isomorphism(
            (&pattern, &target),
            &SubgraphIsomorphismParams::default(),
        )
        .unwrap();
        assert!(result.isomorphism.is_empty());
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn empty_pattern_maps_trivially() {
        let result = cbjd_subgraph_isomorphism(
            (&Graph::new(0), &c4()),
            &SubgraphIsomorphismParams::default(),
        )
        .unwrap();
        assert!(result.isomorphism.is_empty());
    }

    #[test]
    fn petersen_contains_c5_but_not_c3() {
        let petersen = Graph::from_edges(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
                (5, 7),
                (7, 9),
                (9, 6),
                (6, 8),
                (8, 5),
            ],
        );
        let c5 = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let c3 = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);

        for (name, solver) in SOLVERS {
            let hit = solver((&c5, &petersen), &SubgraphIsomorphismParams::default()).unwrap();
            assert!(!hit.isomorphism.is_empty(), "{name}");
            check_mapping(&c5, &petersen, &hit, false);

            let miss = solver((&c3, &petersen), &SubgraphIsomorphismParams::default()).unwrap();
            assert!(miss.isomorphism.is_empty(), "{name}");
        }
    }

    #[test]
    fn self_loop_in_pattern_requires_one_in_target() {
        let mut pattern = Graph::new(1);
        pattern.add_edge(0, 0);
        let target_without = Graph::from_edges(2, &[(0, 1)]);
        let result = cbjd_subgraph_isomorphism(
            (&pattern, &target_without),
            &SubgraphIsomorphismParams::default(),
        )
        .unwrap();
        assert!(result.isomorphism.is_empty());

        let mut target_with = Graph::from_edges(2, &[(0, 1)]);
        target_with.add_edge(1, 1);
        let result = cbjd_subgraph_isomorphism(
            (&pattern, &target_with),
            &SubgraphIsomorphismParams::default(),
        )
        .unwrap();
        assert_eq!(result.isomorphism.len(), 1);
    }

    #[test]
    fn random_pattern_extracted_from_target_is_found() {
        for seed in 0..3 {
            let target = gnp(14, 0.5, 700 + seed);
            // the subgraph induced on vertices 0..5 is trivially present
            let mut pattern = Graph::new(5);
            for u in 0..5 {
                for v in (u + 1)..5 {
                    if target.adjacent(u, v) {
                        pattern.add_edge(u, v);
                    }
                }
            }
            for (name, solver) in SOLVERS {
                let result = solver((&pattern, &target), &SubgraphIsomorphismParams::default())
                    .unwrap();
                assert!(!result.isomorphism.is_empty(), "{name} seed {seed}");
                check_mapping(&pattern, &target, &result, false);
            }
        }
    }
}
