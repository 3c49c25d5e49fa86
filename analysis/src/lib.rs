//! twitter-analysis: answers social-graph queries over an edge-list dataset.
//!
//! Loads `A -> B` follow edges into a `social-graph-core` graph (list or
//! matrix backed), then answers `commonInfluencers` and `numRetweets`
//! queries, writing `<result>` blocks or JSON lines.

pub mod config;
pub mod error;
pub mod load;
pub mod output;
pub mod query;
pub mod run;
pub mod status;

pub use config::{load_config, AnalysisConfig, ConfigOverrides, OutputFormat};
pub use error::{AnalysisError, Result};
pub use run::{run, RunSummary};
pub use status::{stats, GraphStats};
