use log::debug;

use crate::classify::Classifier;
use crate::error::{IndexError, Result};
use crate::kdtree::{KdTreeBuilder, KdTreeIndex, OwnedKdTree};
use crate::mnist::{Image, Label, LabeledImage, IMAGE_SIZE};

/// Approximate 1-nearest-neighbor classification through a k-d tree.
///
/// Classifying an image descends the tree to the single leaf bucket the image falls in, then
/// finds the exact nearest neighbor within that bucket. The true nearest training image may sit
/// in a different bucket, so predictions can differ from [`BruteForceClassifier`]'s.
///
/// [`BruteForceClassifier`]: crate::classify::BruteForceClassifier
#[derive(Debug, Clone, Default)]
pub struct KdTreeClassifier {
    builder: KdTreeBuilder,
    tree: Option<OwnedKdTree<LabeledImage, IMAGE_SIZE>>,
}

impl KdTreeClassifier {
    /// Create an untrained classifier with the default tree configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an untrained classifier whose trees are built by `builder`.
    pub fn with_builder(builder: KdTreeBuilder) -> Self {
        Self {
            builder,
            tree: None,
        }
    }

    /// The tree built by the last call to [`train`][Classifier::train].
    pub fn tree(&self) -> Option<&OwnedKdTree<LabeledImage, IMAGE_SIZE>> {
        self.tree.as_ref()
    }
}

impl Classifier for KdTreeClassifier {
    fn train(&mut self, training: &[LabeledImage]) -> Result<()> {
        let tree = self.builder.build(training.to_vec());
        debug!(
            "trained on {} images: {} leaves of up to {} images",
            tree.num_items(),
            tree.layout().num_leaves(),
            tree.leaf_size()
        );
        self.tree = Some(tree);
        Ok(())
    }

    fn classify(&self, image: &Image) -> Result<Label> {
        let tree = self.tree.as_ref().ok_or(IndexError::EmptyIndex)?;
        tree.nearest(image)
            .map(|neighbor| neighbor.item.label())
            .ok_or(IndexError::EmptyIndex)
    }
}
