use social_graph_core::{Backend, Graph, Vertex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Above this size the all-starts BFS is skipped: it is O(V * (V + E)).
const FULL_SEARCH_LIMIT: u64 = 2_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: social-graph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  cascade     Retweet cascade: branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (celebrity hubs)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  chain       Single directed chain (longest possible path)");
        println!();
        println!("Default vertex_count: 2000 (the matrix backend is O(V^2) in memory)");
        return;
    }

    if vertex_count < 2 {
        eprintln!("vertex_count must be at least 2");
        return;
    }

    println!("social-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(u64) -> EdgeList)> = match mode {
        "cascade" => vec![("Retweet cascade", gen_cascade)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "chain" => vec![("Directed chain", gen_chain)],
        "all" => vec![
            ("Retweet cascade", gen_cascade as fn(u64) -> EdgeList),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Directed chain", gen_chain),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn user(id: u64) -> Vertex {
    Vertex::new(format!("user{}", id))
}

/// Build a graph of the given representation from a generated edge list.
///
/// Returns the graph and the number of edges rejected because an endpoint
/// id was outside `0..vertex_count`.
fn load(backend: Backend, edges: &EdgeList) -> (Box<dyn Graph>, usize) {
    let mut graph = backend.with_capacity(edges.vertex_count as usize);
    for id in 0..edges.vertex_count {
        graph.add_vertex(&user(id));
    }
    let mut rejected = 0;
    for &(from, to) in &edges.edges {
        if graph.add_edge(&user(from), &user(to)).is_err() {
            rejected += 1;
        }
    }
    (graph, rejected)
}

fn run_benchmark(name: &str, generator: fn(u64) -> EdgeList, vertex_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let edges = generator(vertex_count);
    println!(
        "Generated in {:.1}ms — {} edge records",
        ms(t.elapsed()),
        edges.edges.len()
    );

    println!();
    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>12} {:>12} {:>10} {:>10}",
        "backend", "build", "edges", "memory", "downstream", "upstream", "distance", "bfs"
    );
    println!(
        "{:->8} {:->10} {:->10} {:->10} {:->12} {:->12} {:->10} {:->10}",
        "", "", "", "", "", "", "", ""
    );

    let first = user(0);
    let last = user(vertex_count - 1);

    for backend in [Backend::List, Backend::Matrix] {
        let t = Instant::now();
        let (graph, rejected) = load(backend, &edges);
        let build = t.elapsed();
        if rejected > 0 {
            eprintln!(
                "warning: {} generated edges referenced unknown vertices and were dropped",
                rejected
            );
        }

        let vertices = graph.vertices();

        let t = Instant::now();
        let mut downstream_total = 0usize;
        for v in &vertices {
            downstream_total += graph.downstream_neighbors(v).map(|n| n.len()).unwrap_or(0);
        }
        let downstream = t.elapsed();

        let t = Instant::now();
        let mut upstream_total = 0usize;
        for v in &vertices {
            upstream_total += graph.upstream_neighbors(v).map(|n| n.len()).unwrap_or(0);
        }
        let upstream = t.elapsed();
        debug_assert_eq!(downstream_total, upstream_total);

        let t = Instant::now();
        let distance = social_graph_core::shortest_distance(&*graph, &first, &last);
        let distance_time = t.elapsed();

        let bfs = if vertex_count <= FULL_SEARCH_LIMIT {
            let t = Instant::now();
            let orders = social_graph_core::breadth_first_search(&*graph);
            debug_assert_eq!(orders.len(), graph.vertex_count());
            format!("{:.1}ms", ms(t.elapsed()))
        } else {
            "skipped".to_string()
        };

        println!(
            "{:>8} {:>8.1}ms {:>10} {:>8.1}MB {:>10.1}ms {:>10.1}ms {:>8.2}ms {:>10}",
            backend.as_str(),
            ms(build),
            graph.edge_count(),
            graph.memory_usage() as f64 / 1_048_576.0,
            ms(downstream),
            ms(upstream),
            ms(distance_time),
            bfs
        );

        if backend == Backend::List {
            match distance {
                Ok(d) => println!("{:>8} shortest distance {} → {}: {} hops", "", first, last, d),
                Err(e) => println!("{:>8} shortest distance: {}", "", e),
            }
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators — all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Directed edges over vertex ids `0..vertex_count`.
struct EdgeList {
    vertex_count: u64,
    edges: Vec<(u64, u64)>,
}

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Retweet cascade: each user is retweeted by up to 3 new users.
///
/// Edges point from the retweeter to the original author, so distances
/// from a leaf back to the root grow logarithmically.
fn gen_cascade(vertex_count: u64) -> EdgeList {
    let mut rng = FastRng::new(42);
    let mut edges = Vec::with_capacity(vertex_count as usize);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * 3);
        for &author in &frontier {
            // 1-3 retweeters per author
            for _ in 0..(1 + rng.next(3)) {
                if next_id >= vertex_count {
                    break;
                }
                edges.push((next_id, author));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    EdgeList {
        vertex_count,
        edges,
    }
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge and following
/// one of its endpoints. Users with many followers attract more followers.
fn gen_scale_free(vertex_count: u64) -> EdgeList {
    let edges_per_vertex = 10u64;
    let mut rng = FastRng::new(12345);
    let mut edges = Vec::with_capacity((vertex_count * edges_per_vertex) as usize);

    // Edge list for O(1) preferential attachment sampling
    let mut endpoints: Vec<u64> = Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(vertex_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in seed..vertex_count {
        let attach = edges_per_vertex.min(new_vertex);
        for _ in 0..attach {
            let target = if endpoints.is_empty() {
                rng.next(new_vertex)
            } else {
                endpoints[rng.next(endpoints.len() as u64) as usize]
            };
            if target != new_vertex {
                edges.push((new_vertex, target));
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    EdgeList {
        vertex_count,
        edges,
    }
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each vertex follows its K clockwise neighbors on a ring, with each edge
/// rewired to a random target with probability p.
fn gen_small_world(vertex_count: u64) -> EdgeList {
    let k = 10u64.min(vertex_count - 1);
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);
    let mut edges = Vec::with_capacity((vertex_count * k) as usize);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    EdgeList {
        vertex_count,
        edges,
    }
}

/// Erdos-Renyi: ~10 uniform random edges per vertex, no structure.
fn gen_random(vertex_count: u64) -> EdgeList {
    let target_edges = vertex_count * 10;
    let mut rng = FastRng::new(54321);
    let mut edges = Vec::with_capacity(target_edges as usize);

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            edges.push((from, to));
        }
    }

    EdgeList {
        vertex_count,
        edges,
    }
}

/// Single chain 0 → 1 → … → n-1, with a handful of back-edges forming
/// cycles that searches must not loop on.
fn gen_chain(vertex_count: u64) -> EdgeList {
    let mut rng = FastRng::new(77777);
    let mut edges: Vec<(u64, u64)> = (1..vertex_count).map(|i| (i - 1, i)).collect();

    // Back-edges never shorten the forward path
    let mut recent: VecDeque<u64> = VecDeque::with_capacity(17);
    for i in 0..vertex_count {
        recent.push_back(i);
        if recent.len() > 16 {
            recent.pop_front();
        }
        if rng.next(50) == 0 {
            let back = recent[rng.next(recent.len() as u64) as usize];
            edges.push((i, back));
        }
    }

    EdgeList {
        vertex_count,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_counts_out_of_range_edges() {
        let edges = EdgeList {
            vertex_count: 3,
            edges: vec![(0, 1), (1, 2), (2, 7), (9, 0)],
        };
        for backend in [Backend::List, Backend::Matrix] {
            let (graph, rejected) = load(backend, &edges);
            assert_eq!(rejected, 2);
            assert_eq!(graph.vertex_count(), 3);
            assert_eq!(graph.edge_count(), 2);
        }
    }

    #[test]
    fn test_generators_stay_in_range() {
        let generators: [fn(u64) -> EdgeList; 5] =
            [gen_cascade, gen_scale_free, gen_small_world, gen_random, gen_chain];
        for generator in generators {
            let edges = generator(200);
            let (_, rejected) = load(Backend::List, &edges);
            assert_eq!(rejected, 0);
        }
    }
}
