use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a dataset or answering queries.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("io error: {source} (path: {})", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("graph error: {0}")]
    Graph(#[from] social_graph_core::GraphError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results using `AnalysisError`.
pub type Result<T> = std::result::Result<T, AnalysisError>;
