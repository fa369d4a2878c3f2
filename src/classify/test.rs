use std::time::Duration;

use crate::classify::{evaluate, BruteForceClassifier, Classifier, Evaluation, KdTreeClassifier};
use crate::error::IndexError;
use crate::kdtree::{KdTreeBuilder, KdTreeIndex};
use crate::mnist::{
    encode_labeled_images, parse_labeled_images, Image, Label, LabeledImage, IMAGE_SIZE, N_COLS,
};

/// A vertical stroke whose column depends on `digit`, plus a faint speck in the top row that
/// makes each `variant` distinct.
fn digit_image(digit: u8, variant: u8) -> Image {
    assert!(digit < 10 && variant < N_COLS as u8);
    let mut pixels = [0; IMAGE_SIZE];
    let col = 2 + 2 * digit as usize;
    for row in 4..24 {
        pixels[row * N_COLS + col] = 255;
    }
    pixels[variant as usize] = 100 + variant;
    Image::new(pixels)
}

fn labeled(digit: u8, variant: u8) -> LabeledImage {
    LabeledImage::new(digit_image(digit, variant), Label::from_digit(digit).unwrap())
}

fn training_set() -> Vec<LabeledImage> {
    (0..10)
        .flat_map(|digit| (0..5).map(move |variant| labeled(digit, variant)))
        .collect()
}

fn inference_set() -> Vec<LabeledImage> {
    (0..10).map(|digit| labeled(digit, 20)).collect()
}

#[test]
fn untrained_classifiers_fail() {
    let image = digit_image(3, 0);
    assert!(matches!(
        BruteForceClassifier::new().classify(&image),
        Err(IndexError::EmptyIndex)
    ));
    assert!(matches!(
        KdTreeClassifier::new().classify(&image),
        Err(IndexError::EmptyIndex)
    ));
}

#[test]
fn trained_on_nothing_fails() {
    let mut classifier = KdTreeClassifier::new();
    classifier.train(&[]).unwrap();
    assert!(classifier.tree().unwrap().is_empty());
    assert!(matches!(
        classifier.classify(&digit_image(0, 0)),
        Err(IndexError::EmptyIndex)
    ));
}

#[test]
fn brute_force_is_exact() {
    let mut classifier = BruteForceClassifier::new();
    classifier.train(&training_set()).unwrap();
    assert_eq!(classifier.training_set().len(), 50);

    for item in inference_set() {
        assert_eq!(classifier.classify(item.image()).unwrap(), item.label());
    }
}

#[test]
fn single_leaf_tree_matches_brute_force() {
    let training = training_set();
    let mut brute = BruteForceClassifier::new();
    brute.train(&training).unwrap();
    let mut tree = KdTreeClassifier::new();
    tree.train(&training).unwrap();
    assert_eq!(tree.tree().unwrap().layout().num_leaves(), 1);

    for digit in 0..10 {
        for variant in [7, 13, 27] {
            let image = digit_image(digit, variant);
            assert_eq!(
                tree.classify(&image).unwrap(),
                brute.classify(&image).unwrap()
            );
        }
    }
}

#[test]
fn training_images_classify_as_themselves() {
    // A stored image descends to the leaf it was partitioned into, so its own bucket always
    // holds it at distance zero.
    let training = training_set();
    let mut classifier = KdTreeClassifier::with_builder(KdTreeBuilder::new_with_leaf_size(2));
    classifier.train(&training).unwrap();
    assert!(classifier.tree().unwrap().layout().num_leaves() > 1);

    for item in &training {
        assert_eq!(classifier.classify(item.image()).unwrap(), item.label());
    }
}

#[test]
fn retraining_replaces_the_model() {
    let mut classifier = KdTreeClassifier::new();
    classifier.train(&[labeled(1, 0)]).unwrap();
    assert_eq!(
        classifier.classify(&digit_image(8, 0)).unwrap(),
        Label::new('1')
    );

    classifier.train(&[labeled(8, 0)]).unwrap();
    assert_eq!(classifier.tree().unwrap().num_items(), 1);
    assert_eq!(
        classifier.classify(&digit_image(1, 0)).unwrap(),
        Label::new('8')
    );
}

#[test]
fn batch_matches_one_at_a_time() {
    let mut classifier = KdTreeClassifier::with_builder(KdTreeBuilder::new_with_leaf_size(4));
    classifier.train(&training_set()).unwrap();

    let images: Vec<Image> = (0..10)
        .flat_map(|digit| [digit_image(digit, 9), digit_image(digit, 2)])
        .collect();
    let batch = classifier.classify_batch(&images).unwrap();
    let single: Vec<Label> = images
        .iter()
        .map(|image| classifier.classify(image).unwrap())
        .collect();
    assert_eq!(batch, single);
}

#[test]
fn evaluate_counts_correct_labels() {
    let mut classifier = BruteForceClassifier::new();
    let evaluation = evaluate(&mut classifier, &training_set(), &inference_set()).unwrap();
    assert_eq!(evaluation.num_classified, 10);
    assert_eq!(evaluation.num_correct, 10);
    assert_eq!(evaluation.accuracy(), 1.0);

    // Mislabel half of the inference images.
    let mislabeled: Vec<LabeledImage> = inference_set()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let label = if i % 2 == 0 { Label::INVALID } else { item.label() };
            LabeledImage::new(item.image().clone(), label)
        })
        .collect();
    let evaluation = evaluate(&mut classifier, &training_set(), &mislabeled).unwrap();
    assert_eq!(evaluation.num_correct, 5);
    assert_eq!(evaluation.accuracy(), 0.5);
}

#[test]
fn evaluate_propagates_classification_errors() {
    let mut classifier = KdTreeClassifier::new();
    let err = evaluate(&mut classifier, &[], &inference_set()).unwrap_err();
    assert!(matches!(err, IndexError::EmptyIndex));
}

#[test]
fn evaluate_through_idx_round_trip() {
    let (images, labels) = encode_labeled_images(&training_set());
    let training = parse_labeled_images(&images, &labels, None).unwrap();
    let (images, labels) = encode_labeled_images(&inference_set());
    let inference = parse_labeled_images(&images, &labels, Some(4)).unwrap();

    let mut classifier = KdTreeClassifier::new();
    let evaluation = evaluate(&mut classifier, &training, &inference).unwrap();
    assert_eq!(evaluation.num_classified, 4);
    assert_eq!(evaluation.num_correct, 4);
}

#[test]
fn evaluate_without_inference_images_skips_training() {
    let mut classifier = KdTreeClassifier::new();
    let evaluation = evaluate(&mut classifier, &training_set(), &[]).unwrap();
    assert_eq!(evaluation.num_classified, 0);
    assert_eq!(evaluation.accuracy(), 0.0);
    assert_eq!(evaluation.train_time, Duration::ZERO);
    assert!(classifier.tree().is_none());
}

#[test]
fn empty_evaluation_has_zero_accuracy() {
    let evaluation = Evaluation {
        num_correct: 0,
        num_classified: 0,
        train_time: Duration::ZERO,
        inference_time: Duration::ZERO,
    };
    assert_eq!(evaluation.accuracy(), 0.0);
    assert!(evaluation.to_string().starts_with("0/0 correct"));
}
