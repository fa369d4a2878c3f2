//! Compare brute-force and k-d tree nearest neighbor classification on MNIST.
//!
//! Expects the four uncompressed MNIST IDX files in `--data-dir`:
//! `train-images-idx3-ubyte`, `train-labels-idx1-ubyte`, `t10k-images-idx3-ubyte` and
//! `t10k-labels-idx1-ubyte`.

use std::path::PathBuf;

use clap::Parser;
use knn_index::classify::{evaluate, BruteForceClassifier, Classifier, KdTreeClassifier};
use knn_index::kdtree::{KdTreeBuilder, SplitPolicy, DEFAULT_LEAF_SIZE};
use knn_index::mnist::read_labeled_images;
use knn_index::{IndexError, Result};
use tracing_subscriber::filter::LevelFilter;

const FULL_TRAINING_SIZE: usize = 60_000;
const FULL_INFERENCE_SIZE: usize = 10_000;

#[derive(Parser, Debug)]
#[command(about = "Evaluate nearest neighbor digit classifiers on MNIST")]
struct Args {
    /// Directory holding the MNIST IDX files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Divide the training and inference set sizes by this factor
    #[arg(long, default_value_t = 1)]
    divide_factor: usize,

    /// Maximum number of images per k-d tree leaf
    #[arg(long, default_value_t = DEFAULT_LEAF_SIZE)]
    leaf_size: usize,

    /// Choose split dimensions round-robin by depth instead of by widest spread
    #[arg(long)]
    round_robin: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    let args = Args::parse();
    if args.divide_factor == 0 || args.leaf_size == 0 {
        return Err(IndexError::General(
            "--divide-factor and --leaf-size must be at least 1".to_string(),
        ));
    }

    let training = read_labeled_images(
        args.data_dir.join("train-images-idx3-ubyte"),
        args.data_dir.join("train-labels-idx1-ubyte"),
        Some(FULL_TRAINING_SIZE / args.divide_factor),
    )?;
    let inference = read_labeled_images(
        args.data_dir.join("t10k-images-idx3-ubyte"),
        args.data_dir.join("t10k-labels-idx1-ubyte"),
        Some(FULL_INFERENCE_SIZE / args.divide_factor),
    )?;

    let mut builder = KdTreeBuilder::new_with_leaf_size(args.leaf_size);
    if args.round_robin {
        builder.set_split_policy(SplitPolicy::RoundRobin);
    }

    let mut systems: Vec<(&str, Box<dyn Classifier>)> = vec![
        ("KNN brute force", Box::new(BruteForceClassifier::new())),
        ("KNN k-d tree", Box::new(KdTreeClassifier::with_builder(builder))),
    ];

    println!();
    println!("  training:  {} images", training.len());
    println!("  inference: {} images", inference.len());
    println!("  leaf size: {}", args.leaf_size);
    println!();
    println!("  {:<20} | {:>10}  {:>10}  {:>9}", "System", "Train (s)", "Infer (s)", "Accuracy");
    println!("  {:-<20}-+-{:-<35}", "", "");

    for (name, classifier) in systems.iter_mut() {
        let evaluation = evaluate(classifier.as_mut(), &training, &inference)?;
        println!(
            "  {:<20} | {:>10.3}  {:>10.3}  {:>8.2}%",
            name,
            evaluation.train_time.as_secs_f64(),
            evaluation.inference_time.as_secs_f64(),
            evaluation.accuracy() * 100.0
        );
    }

    Ok(())
}
