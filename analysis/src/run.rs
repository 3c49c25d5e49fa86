use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use social_graph_core::Graph;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::load::load_dataset;
use crate::output::AnswerWriter;
use crate::query::{answer, parse_query, SeenQueries, SkipReason};

/// Counts from one pass over a query file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub answered: usize,
    /// Repeats of an already answered (type, A, B) triple.
    pub duplicates: usize,
    pub skipped: usize,
}

/// Answer every query in `reader` against `graph`, writing results to
/// `writer` in file order. Each (type, A, B) triple is answered once.
pub fn answer_queries<R: BufRead, W: Write>(
    graph: &dyn Graph,
    reader: R,
    source: &Path,
    writer: &mut AnswerWriter<W>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut seen = SeenQueries::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AnalysisError::io(source, e))?;
        summary.lines += 1;

        let query = match parse_query(&line) {
            Ok(query) => query,
            Err(SkipReason::Blank) => continue,
            Err(reason @ (SkipReason::NotAQuestion | SkipReason::TooFewTokens(_))) => {
                debug!(line = index + 1, %reason, "query skipped");
                summary.skipped += 1;
                continue;
            }
            Err(reason) => {
                warn!(line = index + 1, %reason, "query skipped");
                summary.skipped += 1;
                continue;
            }
        };

        if !seen.insert(&query)? {
            debug!(line = index + 1, kind = %query.kind, "query already answered");
            summary.duplicates += 1;
            continue;
        }

        let result = answer(graph, &query);
        writer.write(&query, &result)?;
        summary.answered += 1;
    }

    Ok(summary)
}

/// Load the dataset, answer the query file, and write the output file.
pub fn run(config: &AnalysisConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let loaded = load_dataset(&config.dataset, &config.edge_separator, config.backend()?)?;

    let input = File::open(&config.queries).map_err(|e| AnalysisError::io(&config.queries, e))?;
    let output = File::create(&config.output).map_err(|e| AnalysisError::io(&config.output, e))?;

    info!(
        queries = %config.queries.display(),
        output = %config.output.display(),
        "answering queries"
    );

    let mut writer = AnswerWriter::new(BufWriter::new(output), config.format, &config.output);
    let summary = answer_queries(
        loaded.graph.as_ref(),
        BufReader::new(input),
        &config.queries,
        &mut writer,
    )?;
    writer.finish()?;

    info!(
        answered = summary.answered,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "queries answered"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use social_graph_core::{Backend, Vertex};

    fn graph(backend: Backend) -> Box<dyn Graph> {
        let mut g = backend.new_graph();
        for (from, to) in [("a", "x"), ("b", "x"), ("c", "a")] {
            let (from, to) = (Vertex::new(from), Vertex::new(to));
            g.add_vertex(&from);
            g.add_vertex(&to);
            g.add_edge(&from, &to).unwrap();
        }
        g
    }

    fn answer_text(backend: Backend, queries: &str) -> (RunSummary, String) {
        let g = graph(backend);
        let mut writer = AnswerWriter::new(Vec::new(), OutputFormat::Text, Path::new("out"));
        let summary = answer_queries(g.as_ref(), queries.as_bytes(), Path::new("in"), &mut writer).unwrap();
        (summary, String::from_utf8(writer.finish().unwrap()).unwrap())
    }

    #[test]
    fn test_answers_in_file_order() {
        for backend in [Backend::List, Backend::Matrix] {
            let (summary, out) = answer_text(
                backend,
                "commonInfluencers a b ?\nnumRetweets a c ?\nnumRetweets c a ?\n",
            );
            assert_eq!(summary.answered, 3);
            assert_eq!(
                out,
                "query: commonInfluencers a b\n<result>\nx\n</result>\n\n\
                 query: numRetweets a c\n<result>\n1\n</result>\n\n\
                 query: numRetweets c a\n<result>\nInfinity.\n</result>\n\n"
            );
        }
    }

    #[test]
    fn test_duplicates_answered_once() {
        let (summary, out) = answer_text(
            Backend::List,
            "commonInfluencers a b ?\ncommonInfluencers a b ?\nnumRetweets a b ?\n",
        );
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(out.matches("<result>").count(), 2);
    }

    #[test]
    fn test_skipped_lines_counted() {
        let (summary, out) = answer_text(
            Backend::List,
            "\ncommonInfluencers a b\nfollowers a b ?\nnumRetweets a\nnumRetweets a c ?\n",
        );
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.answered, 1);
        assert!(out.starts_with("query: numRetweets a c\n"));
    }
}
