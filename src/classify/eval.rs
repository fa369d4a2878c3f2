use std::fmt;
use std::time::{Duration, Instant};

use log::info;

use crate::classify::Classifier;
use crate::error::Result;
use crate::mnist::LabeledImage;

const PROGRESS_INTERVAL: usize = 1000;

/// Accuracy and timing of one train-then-classify run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Inference images whose predicted label matched the true label
    pub num_correct: usize,
    /// Inference images classified
    pub num_classified: usize,
    /// Wall time spent in [`Classifier::train`]
    pub train_time: Duration,
    /// Wall time spent classifying every inference image
    pub inference_time: Duration,
}

impl Evaluation {
    /// Fraction of inference images classified correctly, `0.0` if there were none.
    pub fn accuracy(&self) -> f64 {
        if self.num_classified == 0 {
            return 0.0;
        }
        self.num_correct as f64 / self.num_classified as f64
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct ({:.2}%), train {:.3}s, inference {:.3}s",
            self.num_correct,
            self.num_classified,
            self.accuracy() * 100.0,
            self.train_time.as_secs_f64(),
            self.inference_time.as_secs_f64()
        )
    }
}

/// Train `classifier` on `training`, then classify every image of `inference` and compare
/// against its label.
///
/// With no inference images there is nothing to measure, so the classifier is left untouched
/// and an empty evaluation is returned.
pub fn evaluate<C: Classifier + ?Sized>(
    classifier: &mut C,
    training: &[LabeledImage],
    inference: &[LabeledImage],
) -> Result<Evaluation> {
    if inference.is_empty() {
        return Ok(Evaluation {
            num_correct: 0,
            num_classified: 0,
            train_time: Duration::ZERO,
            inference_time: Duration::ZERO,
        });
    }

    let start = Instant::now();
    classifier.train(training)?;
    let train_time = start.elapsed();
    info!(
        "trained on {} images in {:.3}s",
        training.len(),
        train_time.as_secs_f64()
    );

    let start = Instant::now();
    let mut num_correct = 0;
    for (i, labeled) in inference.iter().enumerate() {
        if classifier.classify(labeled.image())? == labeled.label() {
            num_correct += 1;
        }
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            info!("classified {}/{} images", i + 1, inference.len());
        }
    }

    Ok(Evaluation {
        num_correct,
        num_classified: inference.len(),
        train_time,
        inference_time: start.elapsed(),
    })
}
