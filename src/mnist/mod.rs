//! Handwritten digit images and their on-disk format.

mod reader;
mod types;

pub use reader::{parse_images, parse_labeled_images, parse_labels, read_labeled_images};
pub use types::{Image, Label, LabeledImage, IMAGE_SIZE, N_COLS, N_ROWS};

#[cfg(test)]
pub(crate) use reader::encode_labeled_images;
