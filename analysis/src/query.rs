use std::fmt;

use social_graph_core::{
    common_downstream_vertices, shortest_distance, Graph, GraphError, ListGraph, Vertex,
};
use tracing::debug;

/// The two questions the analysis answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Users followed by both A and B.
    CommonInfluencers,
    /// Hops for a tweet by A to reach B through retweets.
    NumRetweets,
}

impl QueryKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "commonInfluencers" => Some(QueryKind::CommonInfluencers),
            "numRetweets" => Some(QueryKind::NumRetweets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::CommonInfluencers => "commonInfluencers",
            QueryKind::NumRetweets => "numRetweets",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    pub user_a: Vertex,
    pub user_b: Vertex,
}

/// Why a query line was not answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    TooFewTokens(usize),
    /// The line is not exactly `<type> <userA> <userB> ?`.
    NotAQuestion,
    UnknownKind(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => f.write_str("blank line"),
            SkipReason::TooFewTokens(n) => write!(f, "expected at least 3 tokens, got {}", n),
            SkipReason::NotAQuestion => f.write_str("not terminated by '?'"),
            SkipReason::UnknownKind(kind) => write!(f, "unknown query type '{}'", kind),
        }
    }
}

/// Parse `<type> <userA> <userB> ?`.
pub fn parse_query(line: &str) -> Result<Query, SkipReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.len() {
        0 => return Err(SkipReason::Blank),
        n if n < 3 => return Err(SkipReason::TooFewTokens(n)),
        _ => {}
    }
    if tokens.len() != 4 || tokens[3] != "?" {
        return Err(SkipReason::NotAQuestion);
    }
    let kind = QueryKind::parse(tokens[0])
        .ok_or_else(|| SkipReason::UnknownKind(tokens[0].to_string()))?;

    Ok(Query {
        kind,
        user_a: Vertex::new(tokens[1]),
        user_b: Vertex::new(tokens[2]),
    })
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Common influencers, in A's follow order. Empty if none.
    Influencers(Vec<Vertex>),
    /// Retweet distance, `None` when the tweet can never reach B.
    Retweets(Option<u32>),
}

/// Answer a query against the dataset graph.
///
/// Users missing from the dataset are not an error: they have no
/// influencers in common with anyone and no tweet reaches them.
pub fn answer(graph: &dyn Graph, query: &Query) -> Answer {
    let (a, b) = (&query.user_a, &query.user_b);
    match query.kind {
        QueryKind::CommonInfluencers => match common_downstream_vertices(graph, a, b) {
            Ok(common) => Answer::Influencers(common),
            Err(e) => {
                debug!(%a, %b, error = %e, "common influencers: treating as empty");
                Answer::Influencers(Vec::new())
            }
        },
        // A's tweet reaches B when B is connected to A through follow edges
        QueryKind::NumRetweets => match shortest_distance(graph, b, a) {
            Ok(distance) => Answer::Retweets(Some(distance)),
            Err(GraphError::NoPath { .. }) => Answer::Retweets(None),
            Err(e) => {
                debug!(%a, %b, error = %e, "num retweets: treating as unreachable");
                Answer::Retweets(None)
            }
        },
    }
}

/// Per-kind record of which (A, B) pairs were already answered.
///
/// Each kind keeps its own graph whose edges are the answered pairs.
#[derive(Debug, Default)]
pub struct SeenQueries {
    common_influencers: ListGraph,
    num_retweets: ListGraph,
}

impl SeenQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `query`, returning true if this pair was not seen before for
    /// its kind.
    pub fn insert(&mut self, query: &Query) -> social_graph_core::Result<bool> {
        let seen = match query.kind {
            QueryKind::CommonInfluencers => &mut self.common_influencers,
            QueryKind::NumRetweets => &mut self.num_retweets,
        };
        seen.add_vertex(&query.user_a);
        seen.add_vertex(&query.user_b);
        if seen.edge_exists(&query.user_a, &query.user_b)? {
            return Ok(false);
        }
        seen.add_edge(&query.user_a, &query.user_b)?;
        Ok(true)
    }
}
