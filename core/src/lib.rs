//! social-graph-core: directed graph abstraction with two storage backends.
//!
//! `ListGraph` keeps an adjacency list per vertex, `MatrixGraph` keeps a
//! dense 0/1 incidence table. Both implement the [`Graph`] trait and are
//! observably equivalent; the algorithms in this crate only ever see the
//! trait. No I/O happens here, so the crate is usable from the analysis
//! program, the benchmark and tests alike.

mod error;
mod graph;
mod list;
mod matrix;
mod traversal;
mod vertex;

pub use error::{GraphError, Result};
pub use graph::{Backend, Graph};
pub use list::ListGraph;
pub use matrix::MatrixGraph;
pub use traversal::{
    breadth_first_search, common_downstream_vertices, common_upstream_vertices,
    degree_centrality, depth_first_search, shortest_distance, shortest_path, DegreeResult,
};
pub use vertex::Vertex;
