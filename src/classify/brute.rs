use crate::classify::Classifier;
use crate::error::{IndexError, Result};
use crate::knn::nearest;
use crate::mnist::{Image, Label, LabeledImage};

/// Exact 1-nearest-neighbor classification over the whole training set.
#[derive(Debug, Clone, Default)]
pub struct BruteForceClassifier {
    training: Vec<LabeledImage>,
}

impl BruteForceClassifier {
    /// Create an untrained classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// The images this classifier was trained on.
    pub fn training_set(&self) -> &[LabeledImage] {
        &self.training
    }
}

impl Classifier for BruteForceClassifier {
    fn train(&mut self, training: &[LabeledImage]) -> Result<()> {
        self.training = training.to_vec();
        Ok(())
    }

    fn classify(&self, image: &Image) -> Result<Label> {
        nearest(image, &self.training)
            .map(|neighbor| neighbor.item.label())
            .ok_or(IndexError::EmptyIndex)
    }
}
