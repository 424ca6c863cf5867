//! Property tests for metrics, topological resolution and DAG construction.

use ndarray::Array2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cgnn_causal::graph::resolve;
use cgnn_causal::metric::{DistanceMetric, FourierMmd, GaussianMmd};
use cgnn_causal::scoring::normalized_score;
use cgnn_causal::CausalGraph;
use cgnn_core::Sample;

fn sample_strategy() -> impl Strategy<Value = Array2<f64>> {
    (1usize..20, 1usize..4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-5.0_f64..5.0, rows * cols)
            .prop_map(move |v| Array2::from_shape_vec((rows, cols), v).unwrap())
    })
}

/// Nodes in a shuffled declaration order plus edges that only point forward
/// in the hidden ordering `n0 < n1 < …`, so the graph is always a DAG.
fn dag_strategy() -> impl Strategy<Value = (Vec<String>, Vec<(String, String)>)> {
    (2usize..10).prop_flat_map(|n| {
        let names: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
        let edges = prop::collection::vec((0..n, 0..n), 0..n * 2);
        (Just(names).prop_shuffle(), edges).prop_map(|(names, raw)| {
            let edges = raw
                .into_iter()
                .filter(|(a, b)| a < b)
                .map(|(a, b)| (format!("n{a}"), format!("n{b}")))
                .collect();
            (names, edges)
        })
    })
}

proptest! {
    #[test]
    fn exact_self_distance_is_zero(a in sample_strategy()) {
        let metric = GaussianMmd::new(vec![0.01, 0.1, 1.0, 10.0, 100.0]);
        let d = metric.distance(a.view(), a.view()).unwrap();
        prop_assert!(d.abs() < 1e-9, "d = {}", d);
    }

    #[test]
    fn fourier_self_distance_is_zero(a in sample_strategy(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let metric = FourierMmd::new(a.ncols(), 32, &[0.1, 1.0, 10.0], &mut rng);
        let d = metric.distance(a.view(), a.view()).unwrap();
        prop_assert!(d.abs() < 1e-12, "d = {}", d);
    }

    #[test]
    fn topological_order_respects_parents((names, edges) in dag_strategy()) {
        let graph = CausalGraph::from_edges(&names, &edges);
        let columns = names.iter().map(|n| (n.clone(), vec![0.0, 1.0])).collect();
        let sample = Sample::from_columns(columns).unwrap();

        let topology = resolve(&graph, &sample).unwrap();
        prop_assert_eq!(topology.order().len(), names.len());
        let mut position = vec![0; names.len()];
        for (rank, &node) in topology.order().iter().enumerate() {
            position[node] = rank;
        }
        for node in 0..names.len() {
            for &parent in topology.parents(node) {
                prop_assert!(position[parent] < position[node]);
            }
        }
    }

    #[test]
    fn acyclic_insertion_never_creates_cycles(
        edges in prop::collection::vec((0usize..12, 0usize..12), 0..40)
    ) {
        let mut graph = CausalGraph::new();
        for (a, b) in edges {
            let _ = graph.add_edge_acyclic(&format!("n{a}"), &format!("n{b}"), 1.0);
        }
        prop_assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn normalized_score_is_bounded_and_antisymmetric(
        ab in 1e-6_f64..10.0,
        ba in 1e-6_f64..10.0,
    ) {
        let forward = normalized_score(ab, ba).unwrap();
        let backward = normalized_score(ba, ab).unwrap();
        prop_assert!(forward > -1.0 && forward < 1.0);
        prop_assert!((forward + backward).abs() < 1e-12);
    }
}
