use crate::error::Result;
use crate::list::ListGraph;
use crate::matrix::MatrixGraph;
use crate::vertex::Vertex;

/// Directed, unweighted graph over [`Vertex`] identities.
///
/// Graphs only grow: there is no removal. Adding an existing vertex or edge
/// is a no-op. Every vertex-keyed operation fails with
/// [`GraphError::UnknownVertex`](crate::GraphError::UnknownVertex) when given
/// a vertex that was never added.
///
/// Query results are owned copies; mutating them never affects the graph.
/// The trait is object-safe so a backend can be picked at runtime.
pub trait Graph {
    /// Insert `v` if no equal vertex is present.
    fn add_vertex(&mut self, v: &Vertex);

    /// Record the directed edge `from -> to`. Both endpoints must exist.
    fn add_edge(&mut self, from: &Vertex, to: &Vertex) -> Result<()>;

    /// True iff the directed edge `from -> to` was added.
    fn edge_exists(&self, from: &Vertex, to: &Vertex) -> Result<bool>;

    /// All `w` with an edge `v -> w`.
    fn downstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>>;

    /// All `u` with an edge `u -> v`.
    fn upstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>>;

    /// Every vertex currently in the graph.
    fn vertices(&self) -> Vec<Vertex>;

    fn contains_vertex(&self, v: &Vertex) -> bool;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Approximate heap usage in bytes.
    fn memory_usage(&self) -> usize;
}

/// Storage representation, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    List,
    Matrix,
}

impl Backend {
    /// Parse a backend name. Accepts "list"/"adjacency-list" and
    /// "matrix"/"adjacency-matrix" (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "list" | "adjacency-list" => Some(Backend::List),
            "matrix" | "adjacency-matrix" => Some(Backend::Matrix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::List => "list",
            Backend::Matrix => "matrix",
        }
    }

    /// An empty graph using this representation.
    pub fn new_graph(&self) -> Box<dyn Graph> {
        match self {
            Backend::List => Box::new(ListGraph::new()),
            Backend::Matrix => Box::new(MatrixGraph::new()),
        }
    }

    /// An empty graph pre-allocated for `vertex_count` vertices.
    pub fn with_capacity(&self, vertex_count: usize) -> Box<dyn Graph> {
        match self {
            Backend::List => Box::new(ListGraph::with_capacity(vertex_count)),
            Backend::Matrix => Box::new(MatrixGraph::with_capacity(vertex_count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("list"), Some(Backend::List));
        assert_eq!(Backend::parse("Matrix"), Some(Backend::Matrix));
        assert_eq!(Backend::parse("adjacency-matrix"), Some(Backend::Matrix));
        assert_eq!(Backend::parse("csr"), None);
    }

    #[test]
    fn test_backend_new_graph_is_empty() {
        for backend in [Backend::List, Backend::Matrix] {
            let g = backend.new_graph();
            assert_eq!(g.vertex_count(), 0);
            assert_eq!(g.edge_count(), 0);
            assert!(g.vertices().is_empty());
        }
    }

    #[test]
    fn test_backend_with_capacity_behaves_like_new() {
        use crate::vertex::Vertex;

        for backend in [Backend::List, Backend::Matrix] {
            let mut g = backend.with_capacity(16);
            assert_eq!(g.vertex_count(), 0);
            let (a, b) = (Vertex::new("a"), Vertex::new("b"));
            g.add_vertex(&a);
            g.add_vertex(&b);
            g.add_edge(&a, &b).unwrap();
            assert_eq!(g.vertex_count(), 2);
            assert_eq!(g.downstream_neighbors(&a).unwrap(), vec![b.clone()]);
            assert_eq!(g.upstream_neighbors(&b).unwrap(), vec![a.clone()]);
        }
    }

    #[test]
    fn test_backend_round_trip_name() {
        for backend in [Backend::List, Backend::Matrix] {
            assert_eq!(Backend::parse(backend.as_str()), Some(backend));
        }
    }
}
