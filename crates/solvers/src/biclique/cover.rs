use bitgraph::prelude::*;

/// Greedy clique cover of `p`: the same loop as the colour-class order, but a
/// class collects mutually *adjacent* vertices.
///
/// `p_order` gets the members of `p` ascending by class, `cliques[i]` the
/// class number of `p_order[i]`. At most one vertex per clique class fits in
/// an independent set, so `cliques[n]` bounds the independent vertices among
/// `p_order[0..=n]`, and with them the side of a biclique.
pub(crate) fn clique_cover_order<const W: usize>(
    graph: &FixedBitGraph<W>,
    p: &FixedBitSet<W>,
    p_order: &mut VertexArray<W>,
    cliques: &mut VertexArray<W>,
) {
    let mut p_left = *p;
    let mut clique = 0u32;
    let mut i = 0usize;
    while !p_left.is_empty() {
        clique += 1;
        let mut q = p_left;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            graph.intersect_with_row(v, &mut q);
            p_order[i] = v as u32;
            cliques[i] = clique;
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_two_triangles_with_two_cliques() {
        let graph = Graph::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
        let order: Vec<usize> = (0..6).collect();
        let bits: FixedBitGraph<1> = FixedBitGraph::from_graph_with_order(&graph, &order);
        let mut p = FixedBitSet::<1>::new(6);
        p.set_all();
        let mut p_order = VertexArray::new();
        let mut cliques = VertexArray::new();
        clique_cover_order(&bits, &p, &mut p_order, &mut cliques);
        assert_eq!(cliques[5], 2);

        // classes really are cliques
        for i in 0..6 {
            for j in 0..i {
                if cliques[i] == cliques[j] {
                    assert!(bits.adjacent(p_order[i] as usize, p_order[j] as usize));
                }
            }
        }
    }

    #[test]
    fn independent_set_needs_one_class_each() {
        let graph = Graph::from_edges(4, &[]);
        let order: Vec<usize> = (0..4).collect();
        let bits: FixedBitGraph<1> = FixedBitGraph::from_graph_with_order(&graph, &order);
        let mut p = FixedBitSet::<1>::new(4);
        p.set_all();
        let mut p_order = VertexArray::new();
        let mut cliques = VertexArray::new();
        clique_cover_order(&bits, &p, &mut p_order, &mut cliques);
        assert_eq!(cliques[3], 4);
    }
}
