use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::vertex::Vertex;

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult {
    pub vertex: Vertex,
    pub out_degree: u32,
    pub in_degree: u32,
    pub total_degree: u32,
}

/// Which end of the frontier the next vertex is taken from.
#[derive(Debug, Clone, Copy)]
enum Frontier {
    Queue,
    Stack,
}

/// Downstream neighbors of a vertex already known to be in the graph.
///
/// Every vertex handed to this comes from `vertices()` or from a previous
/// neighbor query, so the lookup cannot miss.
fn known_downstream<G: Graph + ?Sized>(graph: &G, v: &Vertex) -> Vec<Vertex> {
    graph.downstream_neighbors(v).unwrap_or_default()
}

/// Visitation order of a search from `start` over downstream edges.
///
/// A vertex is marked discovered when it enters the frontier, so each
/// reachable vertex is visited exactly once even with cycles and self-loops.
fn visit_from<G: Graph + ?Sized>(graph: &G, start: &Vertex, frontier_kind: Frontier) -> Vec<Vertex> {
    let mut discovered: HashSet<Vertex> = HashSet::new();
    let mut frontier: VecDeque<Vertex> = VecDeque::new();
    let mut order = Vec::new();

    discovered.insert(start.clone());
    frontier.push_back(start.clone());

    loop {
        let next = match frontier_kind {
            Frontier::Queue => frontier.pop_front(),
            Frontier::Stack => frontier.pop_back(),
        };
        let Some(current) = next else { break };

        for neighbor in known_downstream(graph, &current) {
            if discovered.insert(neighbor.clone()) {
                frontier.push_back(neighbor);
            }
        }
        order.push(current);
    }

    order
}

fn search_all<G: Graph + ?Sized>(graph: &G, frontier_kind: Frontier) -> HashSet<Vec<Vertex>> {
    let starts = graph.vertices();
    let result: HashSet<Vec<Vertex>> = starts
        .iter()
        .map(|start| visit_from(graph, start, frontier_kind))
        .collect();

    debug!(
        starts = starts.len(),
        distinct_orders = result.len(),
        frontier = ?frontier_kind,
        "search complete"
    );
    result
}

/// Breadth-first search from every vertex of the graph.
///
/// Each entry is the visitation order of one queue-based search over
/// downstream edges. Every order begins with its own start vertex, so the
/// set holds one entry per vertex. An empty graph yields an empty set.
pub fn breadth_first_search<G: Graph + ?Sized>(graph: &G) -> HashSet<Vec<Vertex>> {
    search_all(graph, Frontier::Queue)
}

/// Depth-first search from every vertex of the graph.
///
/// Same shape as [`breadth_first_search`] but the frontier is a stack.
pub fn depth_first_search<G: Graph + ?Sized>(graph: &G) -> HashSet<Vec<Vertex>> {
    search_all(graph, Frontier::Stack)
}

/// Check the endpoints of a distance/path query.
///
/// A missing target is a `NoPath`; a missing source is an unknown vertex.
fn check_endpoints<G: Graph + ?Sized>(graph: &G, from: &Vertex, to: &Vertex) -> Result<()> {
    if !graph.contains_vertex(to) {
        return Err(GraphError::NoPath {
            from: from.clone(),
            to: to.clone(),
        });
    }
    if !graph.contains_vertex(from) {
        return Err(GraphError::UnknownVertex(from.clone()));
    }
    Ok(())
}

/// Number of edges on a shortest directed path from `from` to `to`.
///
/// Unweighted BFS; returns 0 when `from == to`. Fails with
/// [`GraphError::NoPath`] if `to` is absent or unreachable, and with
/// [`GraphError::UnknownVertex`] if only `from` is absent.
pub fn shortest_distance<G: Graph + ?Sized>(graph: &G, from: &Vertex, to: &Vertex) -> Result<u32> {
    check_endpoints(graph, from, to)?;
    if from == to {
        return Ok(0);
    }

    let mut discovered: HashSet<Vertex> = HashSet::new();
    let mut queue: VecDeque<(Vertex, u32)> = VecDeque::new();

    discovered.insert(from.clone());
    queue.push_back((from.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        for neighbor in known_downstream(graph, &current) {
            if neighbor == *to {
                trace!(%from, %to, distance = depth + 1, "target discovered");
                return Ok(depth + 1);
            }
            if discovered.insert(neighbor.clone()) {
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    debug!(%from, %to, visited = discovered.len(), "no path");
    Err(GraphError::NoPath {
        from: from.clone(),
        to: to.clone(),
    })
}

/// A shortest directed path from `from` to `to`, both endpoints included.
///
/// Stores parent pointers during the BFS and walks them back once the
/// target is found. `[from]` when `from == to`. Fails like
/// [`shortest_distance`].
pub fn shortest_path<G: Graph + ?Sized>(
    graph: &G,
    from: &Vertex,
    to: &Vertex,
) -> Result<Vec<Vertex>> {
    check_endpoints(graph, from, to)?;
    if from == to {
        return Ok(vec![from.clone()]);
    }

    // Sentinel: the source is its own parent
    let mut parents: HashMap<Vertex, Vertex> = HashMap::new();
    let mut queue: VecDeque<Vertex> = VecDeque::new();

    parents.insert(from.clone(), from.clone());
    queue.push_back(from.clone());

    while let Some(current) = queue.pop_front() {
        for neighbor in known_downstream(graph, &current) {
            if parents.contains_key(&neighbor) {
                continue;
            }
            parents.insert(neighbor.clone(), current.clone());
            if neighbor == *to {
                return Ok(reconstruct_path(&parents, from, to));
            }
            queue.push_back(neighbor);
        }
    }

    debug!(%from, %to, visited = parents.len(), "no path");
    Err(GraphError::NoPath {
        from: from.clone(),
        to: to.clone(),
    })
}

fn reconstruct_path(parents: &HashMap<Vertex, Vertex>, from: &Vertex, to: &Vertex) -> Vec<Vertex> {
    let mut path = vec![to.clone()];
    let mut current = to;

    while current != from {
        current = &parents[current];
        path.push(current.clone());
    }

    path.reverse();
    path
}

/// Vertices `u` with edges `u -> a` and `u -> b`.
///
/// Ordered as `a`'s upstream neighbors, filtered by membership in `b`'s.
pub fn common_upstream_vertices<G: Graph + ?Sized>(
    graph: &G,
    a: &Vertex,
    b: &Vertex,
) -> Result<Vec<Vertex>> {
    let upstream_b: HashSet<Vertex> = graph.upstream_neighbors(b)?.into_iter().collect();
    Ok(graph
        .upstream_neighbors(a)?
        .into_iter()
        .filter(|u| upstream_b.contains(u))
        .collect())
}

/// Vertices `w` with edges `a -> w` and `b -> w`.
///
/// Ordered as `a`'s downstream neighbors, filtered by membership in `b`'s.
pub fn common_downstream_vertices<G: Graph + ?Sized>(
    graph: &G,
    a: &Vertex,
    b: &Vertex,
) -> Result<Vec<Vertex>> {
    let downstream_b: HashSet<Vertex> = graph.downstream_neighbors(b)?.into_iter().collect();
    Ok(graph
        .downstream_neighbors(a)?
        .into_iter()
        .filter(|w| downstream_b.contains(w))
        .collect())
}

/// Vertices ranked by degree (in + out).
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// total degree (descending). Ties are broken by label (ascending).
/// In-degrees are accumulated from the downstream lists in one pass so the
/// list backend never pays for per-vertex upstream scans.
pub fn degree_centrality<G: Graph + ?Sized>(graph: &G, top_n: usize) -> Vec<DegreeResult> {
    let vertices = graph.vertices();
    let mut out_degrees: HashMap<Vertex, u32> = HashMap::with_capacity(vertices.len());
    let mut in_degrees: HashMap<Vertex, u32> = HashMap::with_capacity(vertices.len());

    for v in &vertices {
        let downstream = known_downstream(graph, v);
        out_degrees.insert(v.clone(), downstream.len() as u32);
        for w in downstream {
            *in_degrees.entry(w).or_default() += 1;
        }
    }

    let mut results: Vec<DegreeResult> = vertices
        .into_iter()
        .map(|vertex| {
            let out_degree = out_degrees.get(&vertex).copied().unwrap_or(0);
            let in_degree = in_degrees.get(&vertex).copied().unwrap_or(0);
            DegreeResult {
                vertex,
                out_degree,
                in_degree,
                total_degree: out_degree + in_degree,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then_with(|| a.vertex.cmp(&b.vertex))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
