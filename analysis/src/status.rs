use std::fmt;

use serde::Serialize;
use social_graph_core::degree_centrality;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::load::{load_dataset, LoadedGraph};

/// Degree figures for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDegree {
    pub user: String,
    /// Accounts this user follows.
    pub following: u32,
    /// Accounts following this user.
    pub followers: u32,
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub source: String,
    pub backend: &'static str,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    pub top_users: Vec<UserDegree>,
}

impl GraphStats {
    pub fn collect(loaded: &LoadedGraph, top: usize) -> Self {
        let graph = loaded.graph.as_ref();
        let top_users = if top == 0 {
            Vec::new()
        } else {
            degree_centrality(graph, top)
                .into_iter()
                .map(|d| UserDegree {
                    user: d.vertex.label().to_string(),
                    following: d.out_degree,
                    followers: d.in_degree,
                })
                .collect()
        };

        GraphStats {
            source: loaded.source.display().to_string(),
            backend: loaded.backend.as_str(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            memory_bytes: graph.memory_usage(),
            load_time_ms: loaded.load_time_ms,
            top_users,
        }
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source:   {}", self.source)?;
        writeln!(f, "backend:  {}", self.backend)?;
        writeln!(f, "vertices: {}", self.vertex_count)?;
        writeln!(f, "edges:    {}", self.edge_count)?;
        writeln!(
            f,
            "memory:   ~{:.1}KB",
            self.memory_bytes as f64 / 1024.0
        )?;
        writeln!(f, "loaded in {:.1}ms", self.load_time_ms)?;

        if !self.top_users.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:<24} {:>10} {:>10}", "user", "following", "followers")?;
            writeln!(f, "{:-<24} {:->10} {:->10}", "", "", "")?;
            for u in &self.top_users {
                writeln!(f, "{:<24} {:>10} {:>10}", u.user, u.following, u.followers)?;
            }
        }
        Ok(())
    }
}

/// Load the configured dataset and summarize it.
pub fn stats(config: &AnalysisConfig, top: usize) -> Result<GraphStats> {
    let loaded = load_dataset(&config.dataset, &config.edge_separator, config.backend()?)?;
    Ok(GraphStats::collect(&loaded, top))
}
