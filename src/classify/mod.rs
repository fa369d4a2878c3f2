//! Nearest neighbor digit classifiers.
//!
//! Both classifiers label an image with the label of its nearest training image under squared
//! Euclidean distance over raw pixels. [`BruteForceClassifier`] scans the full training set;
//! [`KdTreeClassifier`] scans only the k-d tree bucket the image falls in, trading a little
//! accuracy for far fewer distance computations.

mod brute;
mod eval;
mod kdtree;

pub use brute::BruteForceClassifier;
pub use eval::{evaluate, Evaluation};
pub use kdtree::KdTreeClassifier;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::mnist::{Image, Label, LabeledImage};

/// A system that learns from labeled images and then labels new ones.
pub trait Classifier: Send + Sync {
    /// Replace whatever the classifier has learned with `training`.
    fn train(&mut self, training: &[LabeledImage]) -> Result<()>;

    /// Predict the label of `image`.
    ///
    /// Fails with [`IndexError::EmptyIndex`][crate::IndexError::EmptyIndex] if the classifier
    /// has not been trained on any images.
    fn classify(&self, image: &Image) -> Result<Label>;

    /// Predict the labels of many images, in parallel when the `rayon` feature is enabled.
    fn classify_batch(&self, images: &[Image]) -> Result<Vec<Label>> {
        #[cfg(feature = "rayon")]
        {
            images.par_iter().map(|image| self.classify(image)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            images.iter().map(|image| self.classify(image)).collect()
        }
    }
}

#[cfg(test)]
mod test;
