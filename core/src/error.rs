use thiserror::Error;

use crate::vertex::Vertex;

/// Errors raised by graph operations and algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex-keyed operation referenced a vertex that was never added.
    #[error("unknown vertex '{0}'")]
    UnknownVertex(Vertex),

    /// No directed path connects `from` to `to`.
    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: Vertex, to: Vertex },
}

/// Convenience alias for results using `GraphError`.
pub type Result<T> = std::result::Result<T, GraphError>;
