//! Build a k-d tree over random 2-D points and compare its answers with brute force.

use knn_index::kdtree::{KdTreeBuilder, KdTreeIndex, SplitPolicy};
use knn_index::knn::nearest;
use knn_index::Labeled;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Labeled<[f64; 2], usize>> = (0..1000)
        .map(|id| Labeled::new([rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)], id))
        .collect();
    let queries: Vec<[f64; 2]> = (0..200)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect();

    for policy in [SplitPolicy::MaxSpread, SplitPolicy::RoundRobin] {
        let mut builder = KdTreeBuilder::new_with_leaf_size(16);
        builder.set_split_policy(policy);
        let tree = builder.build(points.clone());

        println!("{policy:?}:");
        println!(
            "  {} nodes, {} leaves, depth {}",
            tree.num_nodes(),
            tree.layout().num_leaves(),
            tree.depth()
        );

        let mut exact = 0;
        for query in &queries {
            let approximate = tree.nearest(query).map(|neighbor| neighbor.item.label);
            let truth = nearest(query, &points).map(|neighbor| neighbor.item.label);
            if approximate == truth {
                exact += 1;
            }
        }
        println!(
            "  {exact}/{} queries found their true nearest neighbor",
            queries.len()
        );
    }

    let query = [50.0, 50.0];
    let tree = KdTreeBuilder::new_with_leaf_size(16).build(points);
    println!("bucket for {query:?}:");
    for candidate in tree.bucket(&query) {
        println!("  #{:<4} {:?}", candidate.label, candidate.point);
    }
}
