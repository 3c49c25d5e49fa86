//! Property-based tests: the list and matrix backends are observably
//! equivalent, mutation is idempotent, and distances behave like BFS.

use std::collections::HashSet;

use proptest::prelude::*;
use social_graph_core::{
    breadth_first_search, depth_first_search, shortest_distance, shortest_path, Graph, GraphError,
    ListGraph, MatrixGraph, Vertex,
};

#[derive(Debug, Clone)]
enum Op {
    AddVertex(u8),
    AddEdge(u8, u8),
}

fn label(id: u8) -> Vertex {
    Vertex::new(format!("user{id}"))
}

// Small label pool so edges frequently hit existing vertices and repeats
fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..8u8).prop_map(Op::AddVertex),
        (0..8u8, 0..8u8).prop_map(|(a, b)| Op::AddEdge(a, b)),
    ]
}

fn apply<G: Graph>(graph: &mut G, ops: &[Op]) -> Vec<bool> {
    ops.iter()
        .map(|op| match *op {
            Op::AddVertex(id) => {
                graph.add_vertex(&label(id));
                true
            }
            Op::AddEdge(a, b) => graph.add_edge(&label(a), &label(b)).is_ok(),
        })
        .collect()
}

fn as_set(vertices: Vec<Vertex>) -> HashSet<Vertex> {
    vertices.into_iter().collect()
}

proptest! {
    #[test]
    fn backends_agree(ops in prop::collection::vec(op(), 0..60)) {
        let mut list = ListGraph::new();
        let mut matrix = MatrixGraph::new();
        let list_outcomes = apply(&mut list, &ops);
        let matrix_outcomes = apply(&mut matrix, &ops);
        prop_assert_eq!(list_outcomes, matrix_outcomes);

        prop_assert_eq!(as_set(list.vertices()), as_set(matrix.vertices()));
        prop_assert_eq!(list.vertex_count(), matrix.vertex_count());
        prop_assert_eq!(list.edge_count(), matrix.edge_count());

        for v in list.vertices() {
            prop_assert_eq!(
                as_set(list.downstream_neighbors(&v).unwrap()),
                as_set(matrix.downstream_neighbors(&v).unwrap())
            );
            prop_assert_eq!(
                as_set(list.upstream_neighbors(&v).unwrap()),
                as_set(matrix.upstream_neighbors(&v).unwrap())
            );
            for w in list.vertices() {
                prop_assert_eq!(
                    list.edge_exists(&v, &w).unwrap(),
                    matrix.edge_exists(&v, &w).unwrap()
                );
                prop_assert_eq!(
                    shortest_distance(&list, &v, &w),
                    shortest_distance(&matrix, &v, &w)
                );
            }
        }
    }

    #[test]
    fn mutation_is_idempotent(ops in prop::collection::vec(op(), 0..40)) {
        let doubled: Vec<Op> = ops.iter().flat_map(|op| [op.clone(), op.clone()]).collect();

        let mut once = ListGraph::new();
        let mut twice = ListGraph::new();
        apply(&mut once, &ops);
        apply(&mut twice, &doubled);

        prop_assert_eq!(as_set(once.vertices()), as_set(twice.vertices()));
        prop_assert_eq!(once.edge_count(), twice.edge_count());
        for v in once.vertices() {
            prop_assert_eq!(
                once.downstream_neighbors(&v).unwrap(),
                twice.downstream_neighbors(&v).unwrap()
            );
        }

        let mut once = MatrixGraph::new();
        let mut twice = MatrixGraph::new();
        apply(&mut once, &ops);
        apply(&mut twice, &doubled);
        prop_assert_eq!(once.matrix(), twice.matrix());
        prop_assert_eq!(once.vertices(), twice.vertices());
    }

    #[test]
    fn distance_properties(ops in prop::collection::vec(op(), 0..60)) {
        let mut g = ListGraph::new();
        apply(&mut g, &ops);

        // Reachability per start vertex, taken from the BFS visitation orders
        let orders = breadth_first_search(&g);
        prop_assert_eq!(orders.len(), g.vertex_count());
        prop_assert_eq!(depth_first_search(&g).len(), g.vertex_count());

        for order in &orders {
            let start = &order[0];
            let reachable: HashSet<&Vertex> = order.iter().collect();
            prop_assert_eq!(reachable.len(), order.len());
            prop_assert_eq!(shortest_distance(&g, start, start), Ok(0));

            for target in g.vertices() {
                let distance = shortest_distance(&g, start, &target);
                if reachable.contains(&target) {
                    let d = distance.unwrap();
                    let path = shortest_path(&g, start, &target).unwrap();
                    prop_assert_eq!(path.len() as u32 - 1, d);
                    for hop in path.windows(2) {
                        prop_assert!(g.edge_exists(&hop[0], &hop[1]).unwrap());
                    }
                } else {
                    let is_no_path = matches!(distance, Err(GraphError::NoPath { .. }));
                    prop_assert!(is_no_path);
                }
            }
        }
    }
}
