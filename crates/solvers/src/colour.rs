use bitgraph::prelude::*;

/// Permutation applied to the greedy colour-class order.
///
/// All variants produce a valid greedy colouring: `colours` is non-decreasing
/// along `p_order` and its last entry is an upper bound on the clique number
/// of the candidate subgraph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CcoPermutations {
    /// Classes in discovery order, vertices in bit order within a class.
    None,
    /// Singleton colour classes are deferred to the end of the order, one
    /// class each, so they are branched on first.
    Defer1,
    /// Vertices are sorted by non-decreasing degree within each class.
    Sort,
    /// After colouring, every vertex gets a repair attempt.
    RepairAll,
    /// Repair attempts are restricted to vertices in singleton classes.
    RepairSelected,
    /// As `RepairAll`, displacement restricted to earlier classes.
    RepairAllFast,
    /// As `RepairSelected`, displacement restricted to earlier classes.
    RepairSelectedFast,
}

impl CcoPermutations {
    fn repairs(self) -> bool {
        matches!(
            self,
            CcoPermutations::RepairAll
                | CcoPermutations::RepairSelected
                | CcoPermutations::RepairAllFast
                | CcoPermutations::RepairSelectedFast
        )
    }

    fn selected_only(self) -> bool {
        matches!(
            self,
            CcoPermutations::RepairSelected | CcoPermutations::RepairSelectedFast
        )
    }

    fn fast(self) -> bool {
        matches!(
            self,
            CcoPermutations::RepairAllFast | CcoPermutations::RepairSelectedFast
        )
    }
}

/// Greedy colour-class ordering with a permutation policy fixed at
/// construction.
///
/// The repair variants keep one bitset per colour class as scratch; that is
/// allocated once here and reused on every call, so colouring stays free of
/// per-node heap traffic.
pub(crate) struct ColourClassOrder<const W: usize> {
    permutations: CcoPermutations,
    classes: Vec<FixedBitSet<W>>,
}

impl<const W: usize> ColourClassOrder<W> {
    pub(crate) fn new(permutations: CcoPermutations, n: usize) -> Self {
        let classes = if permutations.repairs() {
            vec![FixedBitSet::new(n); n]
        } else {
            Vec::new()
        };
        Self {
            permutations,
            classes,
        }
    }

    /// Fills `p_order` with the members of `p` ascending by colour class and
    /// `colours` with each one's class number.
    pub(crate) fn colour_class_order(
        &mut self,
        graph: &FixedBitGraph<W>,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    ) {
        match self.permutations {
            CcoPermutations::None => greedy(graph, p, p_order, colours),
            CcoPermutations::Defer1 => greedy_defer1(graph, p, p_order, colours),
            CcoPermutations::Sort => greedy_sort(graph, p, p_order, colours),
            _ => self.greedy_repair(graph, p, p_order, colours),
        }
    }

    fn greedy_repair(
        &mut self,
        graph: &FixedBitGraph<W>,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    ) {
        let class_count = fill_classes(graph, p, &mut self.classes);
        let selected_only = self.permutations.selected_only();
        let fast = self.permutations.fast();

        for cv in (1..class_count).rev() {
            if self.classes[cv].is_empty() {
                continue;
            }
            if selected_only && self.classes[cv].popcount() != 1 {
                continue;
            }
            let mut members = self.classes[cv];
            while let Some(v) = members.first_set_bit() {
                members.unset(v);
                self.try_repair(graph, v, cv, class_count, fast);
            }
        }

        // dump surviving classes back to back, skipping emptied ones
        let mut i = 0usize;
        let mut colour = 0u32;
        for class in self.classes[..class_count].iter() {
            if class.is_empty() {
                continue;
            }
            colour += 1;
            for v in class.iter() {
                p_order[i] = v as u32;
                colours[i] = colour;
                i += 1;
            }
        }
    }

    /// Tries to move `v` from class `cv` into an earlier class that holds
    /// exactly one conflicting vertex, displacing that vertex into another
    /// class where it has no conflicts.
    fn try_repair(
        &mut self,
        graph: &FixedBitGraph<W>,
        v: usize,
        cv: usize,
        class_count: usize,
        fast: bool,
    ) {
        for k1 in 0..cv {
            let mut conflicts = *graph.neighbourhood(v);
            conflicts.intersect_with(&self.classes[k1]);
            if conflicts.popcount() != 1 {
                continue;
            }
            let w = conflicts.first_set_bit().unwrap();

            let k2_end = if fast { cv } else { class_count };
            for k2 in 0..k2_end {
                if k2 == k1 || k2 == cv {
                    continue;
                }
                let mut w_conflicts = *graph.neighbourhood(w);
                w_conflicts.intersect_with(&self.classes[k2]);
                if w_conflicts.is_empty() {
                    self.classes[k1].unset(w);
                    self.classes[k2].set(w);
                    self.classes[cv].unset(v);
                    self.classes[k1].set(v);
                    return;
                }
            }
        }
    }
}

/// Greedy colouring: open a class, fill it with mutually non-adjacent
/// vertices in bit order, dump it into the output, repeat.
fn greedy<const W: usize>(
    graph: &FixedBitGraph<W>,
    p: &FixedBitSet<W>,
    p_order: &mut VertexArray<W>,
    colours: &mut VertexArray<W>,
) {
    let mut p_left = *p;
    let mut colour = 0u32;
    let mut i = 0usize;
    while !p_left.is_empty() {
        colour += 1;
        let mut q = p_left;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            graph.intersect_with_row_complement(v, &mut q);
            p_order[i] = v as u32;
            colours[i] = colour;
            i += 1;
        }
    }
}

fn greedy_defer1<const W: usize>(
    graph: &FixedBitGraph<W>,
    p: &FixedBitSet<W>,
    p_order: &mut VertexArray<W>,
    colours: &mut VertexArray<W>,
) {
    let mut p_left = *p;
    let mut colour = 0u32;
    let mut i = 0usize;
    let mut deferred = VertexArray::<W>::new();
    let mut n_deferred = 0usize;

    while !p_left.is_empty() {
        colour += 1;
        let mut q = p_left;
        let mut in_this_class = 0usize;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            graph.intersect_with_row_complement(v, &mut q);
            p_order[i] = v as u32;
            colours[i] = colour;
            i += 1;
            in_this_class += 1;
        }
        if in_this_class == 1 {
            i -= 1;
            colour -= 1;
            deferred[n_deferred] = p_order[i];
            n_deferred += 1;
        }
    }

    for d in 0..n_deferred {
        colour += 1;
        p_order[i] = deferred[d];
        colours[i] = colour;
        i += 1;
    }
}

fn greedy_sort<const W: usize>(
    graph: &FixedBitGraph<W>,
    p: &FixedBitSet<W>,
    p_order: &mut VertexArray<W>,
    colours: &mut VertexArray<W>,
) {
    let mut p_left = *p;
    let mut colour = 0u32;
    let mut i = 0usize;
    while !p_left.is_empty() {
        colour += 1;
        let class_start = i;
        let mut q = p_left;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            graph.intersect_with_row_complement(v, &mut q);
            p_order[i] = v as u32;
            colours[i] = colour;
            i += 1;
        }
        sort_class_by_degree(graph, p_order, class_start, i);
    }
}

/// Insertion sort of `p_order[start..end]` by non-decreasing degree. Classes
/// are short, and `VertexArray` has no contiguous slice view.
fn sort_class_by_degree<const W: usize>(
    graph: &FixedBitGraph<W>,
    p_order: &mut VertexArray<W>,
    start: usize,
    end: usize,
) {
    for i in (start + 1)..end {
        let mut j = i;
        while j > start && graph.degree(p_order[j - 1] as usize) > graph.degree(p_order[j] as usize)
        {
            let tmp = p_order[j - 1];
            p_order[j - 1] = p_order[j];
            p_order[j] = tmp;
            j -= 1;
        }
    }
}

/// Builds the greedy classes into `classes`, returning how many were used.
fn fill_classes<const W: usize>(
    graph: &FixedBitGraph<W>,
    p: &FixedBitSet<W>,
    classes: &mut [FixedBitSet<W>],
) -> usize {
    let mut p_left = *p;
    let mut count = 0usize;
    while !p_left.is_empty() {
        classes[count].unset_all();
        let mut q = p_left;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            graph.intersect_with_row_complement(v, &mut q);
            classes[count].set(v);
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(graph: &Graph) -> FixedBitGraph<1> {
        let order: Vec<usize> = (0..graph.size()).collect();
        FixedBitGraph::from_graph_with_order(graph, &order)
    }

    fn all_of<const W: usize>(n: usize) -> FixedBitSet<W> {
        let mut p = FixedBitSet::new(n);
        p.set_all();
        p
    }

    fn check_valid_colouring(
        graph: &FixedBitGraph<1>,
        p: &FixedBitSet<1>,
        p_order: &VertexArray<1>,
        colours: &VertexArray<1>,
    ) -> u32 {
        let count = p.popcount() as usize;

        // a permutation of p
        let mut seen = FixedBitSet::<1>::new(p.len());
        for i in 0..count {
            seen.set(p_order[i] as usize);
        }
        assert_eq!(seen, *p);

        // non-decreasing colours, classes independent
        for i in 0..count {
            if i > 0 {
                assert!(colours[i] >= colours[i - 1]);
            }
            for j in 0..i {
                if colours[i] == colours[j] {
                    assert!(!graph.adjacent(p_order[i] as usize, p_order[j] as usize));
                }
            }
        }
        colours[count - 1]
    }

    fn variants() -> Vec<CcoPermutations> {
        vec![
            CcoPermutations::None,
            CcoPermutations::Defer1,
            CcoPermutations::Sort,
            CcoPermutations::RepairAll,
            CcoPermutations::RepairSelected,
            CcoPermutations::RepairAllFast,
            CcoPermutations::RepairSelectedFast,
        ]
    }

    #[test]
    fn all_variants_produce_valid_colourings() {
        let graph = Graph::from_edges(
            7,
            &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (5, 6), (3, 6)],
        );
        let bits = encode(&graph);
        let p = all_of::<1>(7);

        for permutations in variants() {
            let mut colour = ColourClassOrder::new(permutations, 7);
            let mut p_order = VertexArray::new();
            let mut colours = VertexArray::new();
            colour.colour_class_order(&bits, &p, &mut p_order, &mut colours);
            let bound = check_valid_colouring(&bits, &p, &p_order, &colours);
            // the graph holds a triangle, so any proper colouring needs >= 3
            assert!(bound >= 3, "{permutations:?} gave bound {bound}");
        }
    }

    #[test]
    fn independent_set_gets_one_colour() {
        let graph = Graph::from_edges(4, &[]);
        let bits = encode(&graph);
        let p = all_of::<1>(4);
        let mut colour = ColourClassOrder::new(CcoPermutations::None, 4);
        let mut p_order = VertexArray::new();
        let mut colours = VertexArray::new();
        colour.colour_class_order(&bits, &p, &mut p_order, &mut colours);
        assert_eq!(colours[3], 1);
    }

    #[test]
    fn complete_graph_needs_all_colours() {
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let bits = encode(&graph);
        let p = all_of::<1>(4);
        for permutations in variants() {
            let mut colour = ColourClassOrder::new(permutations, 4);
            let mut p_order = VertexArray::new();
            let mut colours = VertexArray::new();
            colour.colour_class_order(&bits, &p, &mut p_order, &mut colours);
            assert_eq!(colours[3], 4, "{permutations:?}");
        }
    }

    #[test]
    fn defer1_moves_singletons_to_the_end() {
        // star: hub 0 conflicts with everything, so it colours alone
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        let bits = encode(&graph);
        let p = all_of::<1>(4);
        let mut colour = ColourClassOrder::new(CcoPermutations::Defer1, 4);
        let mut p_order = VertexArray::new();
        let mut colours = VertexArray::new();
        colour.colour_class_order(&bits, &p, &mut p_order, &mut colours);
        assert_eq!(p_order[3], 0);
        check_valid_colouring(&bits, &p, &p_order, &colours);
    }

    #[test]
    fn colouring_respects_subset() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let bits = encode(&graph);
        let mut p = FixedBitSet::<1>::new(5);
        p.set(1);
        p.set(3);
        p.set(4);
        let mut colour = ColourClassOrder::new(CcoPermutations::None, 5);
        let mut p_order = VertexArray::new();
        let mut colours = VertexArray::new();
        colour.colour_class_order(&bits, &p, &mut p_order, &mut colours);
        check_valid_colouring(&bits, &p, &p_order, &colours);
    }
}
