use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use social_graph_core::{Backend, Graph, Vertex};
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};

/// A dataset loaded into a graph, plus where and how it was loaded.
pub struct LoadedGraph {
    pub graph: Box<dyn Graph>,
    pub source: PathBuf,
    pub backend: Backend,
    pub load_time_ms: f64,
}

/// Split one dataset line into its two users.
///
/// The separator is matched without its surrounding whitespace and both
/// sides are trimmed, so `a -> b` and `a->b` are the same edge.
pub fn parse_edge<'a>(line: &'a str, separator: &str) -> std::result::Result<(&'a str, &'a str), String> {
    let token = separator.trim();
    let (from, to) = line
        .split_once(token)
        .ok_or_else(|| format!("expected '<user>{}<user>', got '{}'", separator, line))?;
    if to.contains(token) {
        return Err(format!("more than one '{}' in '{}'", token, line));
    }
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(format!("empty user name in '{}'", line));
    }
    Ok((from, to))
}

/// Add every edge in `reader` to `graph`. Blank lines are skipped.
/// Returns the number of edge lines read.
pub fn read_edges<R: BufRead>(
    reader: R,
    source: &Path,
    separator: &str,
    graph: &mut dyn Graph,
) -> Result<usize> {
    let mut count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AnalysisError::io(source, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (from, to) = parse_edge(line, separator).map_err(|message| AnalysisError::Parse {
            line: index + 1,
            message,
        })?;
        let (from, to) = (Vertex::new(from), Vertex::new(to));
        graph.add_vertex(&from);
        graph.add_vertex(&to);
        graph.add_edge(&from, &to)?;
        count += 1;
    }

    Ok(count)
}

/// Load an edge-list file into a fresh graph of the chosen representation.
pub fn load_dataset(path: &Path, separator: &str, backend: Backend) -> Result<LoadedGraph> {
    let start = Instant::now();
    info!(path = %path.display(), backend = backend.as_str(), "loading dataset");

    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut graph = backend.new_graph();
    let lines = read_edges(BufReader::new(file), path, separator, graph.as_mut())?;

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(lines, "dataset lines read");
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        load_time_ms,
        "dataset loaded"
    );

    Ok(LoadedGraph {
        graph,
        source: path.to_path_buf(),
        backend,
        load_time_ms,
    })
}
