use crate::bitset::{FixedBitSet, BITS_PER_WORD};

/// A simple undirected graph over `{0..n-1}`, stored as a dense symmetric
/// adjacency bitmatrix with dynamically sized rows.
///
/// This is the loaded-instance representation: the file readers produce it,
/// the transforms consume and produce it, and every solver re-encodes it into
/// a [`FixedBitGraph`] in its chosen vertex order before searching.
#[derive(Clone)]
pub struct Graph {
    n: usize,
    words_per_row: usize,
    rows: Vec<u64>,
    degrees: Vec<u32>,
    names: Option<Vec<String>>,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        let words_per_row = n / BITS_PER_WORD + 1;
        Self {
            n,
            words_per_row,
            rows: vec![0; words_per_row * n.max(1)],
            degrees: vec![0; n],
            names: None,
        }
    }

    /// Builds a graph from an edge list, mostly for tests.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(n);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Adds the undirected edge `(u, v)`. Adding an edge twice is a no-op.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n && v < self.n);
        if !self.adjacent(u, v) {
            self.set_bit(u, v);
            self.degrees[u] += 1;
            if u != v {
                self.set_bit(v, u);
                self.degrees[v] += 1;
            }
        }
    }

    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        self.rows[u * self.words_per_row + v / BITS_PER_WORD] & (1 << (v % BITS_PER_WORD)) != 0
    }

    pub fn degree(&self, v: usize) -> u32 {
        self.degrees[v]
    }

    /// Degree plus the sum of neighbour degrees.
    pub fn exdegree(&self, v: usize) -> u64 {
        let mut sum = self.degrees[v] as u64;
        for u in self.neighbours(v) {
            sum += self.degrees[u] as u64;
        }
        sum
    }

    pub fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&u| self.adjacent(v, u))
    }

    /// Number of undirected edges, self-loops counted once.
    pub fn edge_count(&self) -> usize {
        let loops = (0..self.n).filter(|&v| self.adjacent(v, v)).count();
        let total: usize = self.degrees.iter().map(|&d| d as usize).sum();
        (total - loops) / 2 + loops
    }

    pub fn set_vertex_names(&mut self, names: Vec<String>) {
        assert_eq!(names.len(), self.n);
        self.names = Some(names);
    }

    /// The display name of a vertex: the name carried through from the input
    /// file, or the vertex id itself.
    pub fn vertex_name(&self, v: usize) -> String {
        match &self.names {
            Some(names) => names[v].clone(),
            None => v.to_string(),
        }
    }

    fn set_bit(&mut self, u: usize, v: usize) {
        self.rows[u * self.words_per_row + v / BITS_PER_WORD] |= 1 << (v % BITS_PER_WORD);
    }
}

/// An `n × n` adjacency matrix over fixed-capacity bitset rows, with a
/// per-vertex degree cache.
///
/// Rows are indexed by *search index*: solvers build one of these in their
/// chosen vertex order so that row intersections walk the candidate set in
/// branching order. Symmetry is maintained by [`add_edge`](Self::add_edge);
/// self-loops only appear when a caller adds one explicitly (the supplemental
/// graphs of the isomorphism solver do).
#[derive(Clone)]
pub struct FixedBitGraph<const W: usize> {
    n: usize,
    rows: Vec<FixedBitSet<W>>,
    degrees: Vec<u32>,
}

impl<const W: usize> FixedBitGraph<W> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            rows: vec![FixedBitSet::new(n); n],
            degrees: vec![0; n],
        }
    }

    /// Re-encodes `graph` with vertex `order[i]` at search index `i`.
    pub fn from_graph_with_order(graph: &Graph, order: &[usize]) -> Self {
        let mut result = Self::new(graph.size());
        for i in 0..graph.size() {
            for j in 0..graph.size() {
                if i != j && graph.adjacent(order[i], order[j]) {
                    result.add_edge(i, j);
                }
            }
        }
        result
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Adds the undirected edge `(i, j)`. Idempotent; keeps the degree cache
    /// consistent.
    pub fn add_edge(&mut self, i: usize, j: usize) {
        if !self.rows[i].test(j) {
            self.rows[i].set(j);
            self.degrees[i] += 1;
            if i != j {
                self.rows[j].set(i);
                self.degrees[j] += 1;
            }
        }
    }

    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        self.rows[i].test(j)
    }

    pub fn degree(&self, v: usize) -> u32 {
        self.degrees[v]
    }

    pub fn neighbourhood(&self, v: usize) -> &FixedBitSet<W> {
        &self.rows[v]
    }

    /// `s &= N(v)`.
    pub fn intersect_with_row(&self, v: usize, s: &mut FixedBitSet<W>) {
        s.intersect_with(&self.rows[v]);
    }

    /// `s &= !N(v)`.
    pub fn intersect_with_row_complement(&self, v: usize, s: &mut FixedBitSet<W>) {
        s.intersect_with_complement(&self.rows[v]);
    }
}
