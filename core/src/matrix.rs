use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::vertex::Vertex;

/// Adjacency-matrix graph: an ordered vertex list defines row/column
/// indices into a square 0/1 table, `matrix[i][j] == 1` iff there is an
/// edge from vertex `i` to vertex `j`.
///
/// Adding a vertex grows every row, so it is O(V) and building a graph is
/// O(V^2). Edge lookups are O(1). Downstream (row) and upstream (column)
/// scans are both O(V). A vertex -> index map avoids a linear search when
/// resolving vertices; it never changes iteration order, which is always
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MatrixGraph {
    vertices: Vec<Vertex>,
    index: HashMap<Vertex, usize>,
    matrix: Vec<Vec<u8>>,
    edge_count: usize,
}

impl MatrixGraph {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            matrix: Vec::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate the vertex list and index for a known vertex count.
    /// Rows are still grown one vertex at a time.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            matrix: Vec::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Owned copy of the raw incidence table, rows and columns in vertex
    /// insertion order. Intended for diagnostics.
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        self.matrix.clone()
    }

    fn index_of(&self, v: &Vertex) -> Result<usize> {
        self.index
            .get(v)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }
}

impl Graph for MatrixGraph {
    fn add_vertex(&mut self, v: &Vertex) {
        if self.index.contains_key(v) {
            return;
        }
        let new_index = self.vertices.len();
        self.vertices.push(v.clone());
        self.index.insert(v.clone(), new_index);

        for row in &mut self.matrix {
            row.push(0);
        }
        self.matrix.push(vec![0; new_index + 1]);
    }

    fn add_edge(&mut self, from: &Vertex, to: &Vertex) -> Result<()> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        if self.matrix[i][j] == 0 {
            self.matrix[i][j] = 1;
            self.edge_count += 1;
        }
        Ok(())
    }

    fn edge_exists(&self, from: &Vertex, to: &Vertex) -> Result<bool> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Ok(self.matrix[i][j] == 1)
    }

    fn downstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>> {
        let i = self.index_of(v)?;
        Ok(self.matrix[i]
            .iter()
            .zip(&self.vertices)
            .filter(|(&cell, _)| cell == 1)
            .map(|(_, w)| w.clone())
            .collect())
    }

    fn upstream_neighbors(&self, v: &Vertex) -> Result<Vec<Vertex>> {
        let j = self.index_of(v)?;
        Ok(self
            .matrix
            .iter()
            .zip(&self.vertices)
            .filter(|(row, _)| row[j] == 1)
            .map(|(_, u)| u.clone())
            .collect())
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }

    fn contains_vertex(&self, v: &Vertex) -> bool {
        self.index.contains_key(v)
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let labels: usize = self.vertices.iter().map(|v| v.label().len()).sum();
        let vertex_list = self.vertices.capacity() * size_of::<Vertex>();
        let index = self.index.len() * (size_of::<Vertex>() + size_of::<usize>() + 16);
        let cells: usize = self
            .matrix
            .iter()
            .map(|row| row.capacity() + size_of::<Vec<u8>>())
            .sum();

        labels + vertex_list + index + cells
    }
}
