use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::vertex::Vertex;

/// Adjacency-list graph: each vertex maps to its downstream neighbors in
/// insertion order.
///
/// Downstream queries and `edge_exists` cost O(out-degree). Upstream
/// queries have no reverse index and scan every list, O(V + E).
#[derive(Debug, Clone, Default)]
pub struct ListGraph {
    adjacency: HashMap<Vertex, Vec<Vertex>>,
}

impl ListGraph {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(vertex_count),
        }
    }

    fn neighbors_of(&self, v: &Vertex) -> Result<&Vec<Vertex>> {
        self.adjacency
            .get(v)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }
}

impl Graph for ListGraph {
    fn add_vertex(&mut self, v: &Vertex) {
        self.adjacency.entry(v.clone()).or_default();
    }

    fn add_edge(&mut self, from: &Vertex, to: &Vertex) -> Result<()> {
        if !self.adjacency.contains_key(to) {
            return Err(GraphError::UnknownVertex(to.clone()));
        }
        let targets = self
            .adjacency
            .get_mut(from)
            .ok_or_else(|| GraphError::UnknownVertex(from.clone()))?;
        if !targets.contains(to) {
            targets.push(to.clone());
        }
        Ok(())
    }

    fn edge_exists(&self, from: &Vertex, to: &Vertex) -> Result<bool> {
        if !self.adjacency.contains_key(to) {
            return Err(GraphError::UnknownVertex(to.clone()));
        }
        Ok(self.neighbors_of(from)?.contains(to))
    }

    fn downstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>> {
        self.neighbors_of(v).cloned()
    }

    fn upstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>> {
        if !self.adjacency.contains_key(v) {
            return Err(GraphError::UnknownVertex(v.clone()));
        }
        Ok(self
            .adjacency
            .iter()
            .filter(|(_, targets)| targets.contains(v))
            .map(|(source, _)| source.clone())
            .collect())
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.adjacency.keys().cloned().collect()
    }

    fn contains_vertex(&self, v: &Vertex) -> bool {
        self.adjacency.contains_key(v)
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let labels: usize = self.adjacency.keys().map(|v| v.label().len()).sum();
        let keys = self.adjacency.len() * (size_of::<Vertex>() + size_of::<Vec<Vertex>>() + 16);
        let lists: usize = self
            .adjacency
            .values()
            .map(|v| v.capacity() * size_of::<Vertex>())
            .sum();

        labels + keys + lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(label: &str) -> Vertex {
        Vertex::new(label)
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g = ListGraph::new();
        g.add_vertex(&v("a"));
        g.add_vertex(&v("a"));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.vertices(), vec![v("a")]);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = ListGraph::new();
        g.add_vertex(&v("a"));
        g.add_vertex(&v("b"));
        g.add_edge(&v("a"), &v("b")).unwrap();
        g.add_edge(&v("a"), &v("b")).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.downstream_neighbors(&v("a")).unwrap(), vec![v("b")]);
    }

    #[test]
    fn test_downstream_keeps_insertion_order() {
        let mut g = ListGraph::new();
        for label in ["a", "d", "c", "b"] {
            g.add_vertex(&v(label));
        }
        g.add_edge(&v("a"), &v("d")).unwrap();
        g.add_edge(&v("a"), &v("b")).unwrap();
        g.add_edge(&v("a"), &v("c")).unwrap();
        assert_eq!(
            g.downstream_neighbors(&v("a")).unwrap(),
            vec![v("d"), v("b"), v("c")]
        );
    }

    #[test]
    fn test_upstream_scans_all_lists() {
        let mut g = ListGraph::new();
        for label in ["a", "b", "c"] {
            g.add_vertex(&v(label));
        }
        g.add_edge(&v("a"), &v("c")).unwrap();
        g.add_edge(&v("b"), &v("c")).unwrap();
        let mut up = g.upstream_neighbors(&v("c")).unwrap();
        up.sort();
        assert_eq!(up, vec![v("a"), v("b")]);
        assert!(g.upstream_neighbors(&v("a")).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_vertex_errors() {
        let mut g = ListGraph::new();
        g.add_vertex(&v("a"));
        assert_eq!(
            g.add_edge(&v("a"), &v("zz")),
            Err(GraphError::UnknownVertex(v("zz")))
        );
        assert_eq!(
            g.add_edge(&v("zz"), &v("a")),
            Err(GraphError::UnknownVertex(v("zz")))
        );
        assert!(g.edge_exists(&v("zz"), &v("a")).is_err());
        assert!(g.downstream_neighbors(&v("zz")).is_err());
        assert!(g.upstream_neighbors(&v("zz")).is_err());
        // Failed edge insertion leaves the graph untouched
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_returned_neighbors_are_copies() {
        let mut g = ListGraph::new();
        g.add_vertex(&v("a"));
        g.add_vertex(&v("b"));
        g.add_edge(&v("a"), &v("b")).unwrap();
        let mut out = g.downstream_neighbors(&v("a")).unwrap();
        out.clear();
        assert_eq!(g.downstream_neighbors(&v("a")).unwrap(), vec![v("b")]);
    }

    #[test]
    fn test_self_loop() {
        let mut g = ListGraph::new();
        g.add_vertex(&v("a"));
        g.add_edge(&v("a"), &v("a")).unwrap();
        assert!(g.edge_exists(&v("a"), &v("a")).unwrap());
        assert_eq!(g.downstream_neighbors(&v("a")).unwrap(), vec![v("a")]);
        assert_eq!(g.upstream_neighbors(&v("a")).unwrap(), vec![v("a")]);
    }

    #[test]
    fn test_memory_usage_grows() {
        let mut g = ListGraph::new();
        let empty = g.memory_usage();
        g.add_vertex(&v("a"));
        g.add_vertex(&v("b"));
        g.add_edge(&v("a"), &v("b")).unwrap();
        assert!(g.memory_usage() > empty);
    }
}
