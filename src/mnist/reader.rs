//! Loading labeled images from IDX files, the binary format MNIST is distributed in.
//!
//! An image file is a big-endian header of four `u32`s (magic `2051`, image count, rows,
//! columns) followed by one byte per pixel, image after image, row-major. A label file is a
//! header of two `u32`s (magic `2049`, label count) followed by one byte per label.

use std::path::Path;

use log::info;

use crate::error::{IndexError, Result};
use crate::mnist::types::{Image, Label, LabeledImage, IMAGE_SIZE, N_COLS, N_ROWS};

const IMAGES_MAGIC: u32 = 2051;
const LABELS_MAGIC: u32 = 2049;
const IMAGES_HEADER_SIZE: usize = 16;
const LABELS_HEADER_SIZE: usize = 8;

/// Read labeled images from an IDX image file and its matching label file.
///
/// `limit` caps how many images are read from the front of the files.
pub fn read_labeled_images(
    images_path: impl AsRef<Path>,
    labels_path: impl AsRef<Path>,
    limit: Option<usize>,
) -> Result<Vec<LabeledImage>> {
    let images_path = images_path.as_ref();
    let labels_path = labels_path.as_ref();

    let image_bytes = std::fs::read(images_path)?;
    let label_bytes = std::fs::read(labels_path)?;
    let labeled = parse_labeled_images(&image_bytes, &label_bytes, limit)?;

    info!(
        "read {} labeled images from {} and {}",
        labeled.len(),
        images_path.display(),
        labels_path.display()
    );
    Ok(labeled)
}

/// Parse labeled images from the contents of an IDX image file and its matching label file.
pub fn parse_labeled_images(
    image_bytes: &[u8],
    label_bytes: &[u8],
    limit: Option<usize>,
) -> Result<Vec<LabeledImage>> {
    let images = parse_images(image_bytes, limit)?;
    let labels = parse_labels(label_bytes, limit)?;

    if images.len() != labels.len() {
        return Err(IndexError::invalid_dataset(
            "labeled images",
            format!("{} images but {} labels", images.len(), labels.len()),
        ));
    }

    Ok(images
        .into_iter()
        .zip(labels)
        .map(|(image, label)| LabeledImage::new(image, label))
        .collect())
}

/// Parse the images of an IDX image file.
pub fn parse_images(bytes: &[u8], limit: Option<usize>) -> Result<Vec<Image>> {
    let name = "image file";
    check_magic(bytes, IMAGES_MAGIC, name)?;
    let count = read_u32_be(bytes, 4, name)? as usize;
    let rows = read_u32_be(bytes, 8, name)? as usize;
    let cols = read_u32_be(bytes, 12, name)? as usize;

    if rows != N_ROWS || cols != N_COLS {
        return Err(IndexError::invalid_dataset(
            name,
            format!("images are {rows}x{cols}, expected {N_ROWS}x{N_COLS}"),
        ));
    }

    let count = limit.map_or(count, |limit| limit.min(count));
    let body = &bytes[IMAGES_HEADER_SIZE..];
    if body.len() < count * IMAGE_SIZE {
        return Err(IndexError::invalid_dataset(
            name,
            format!(
                "truncated: {} pixel bytes for {} images",
                body.len(),
                count
            ),
        ));
    }

    body.chunks_exact(IMAGE_SIZE)
        .take(count)
        .map(Image::try_from)
        .collect()
}

/// Parse the labels of an IDX label file.
pub fn parse_labels(bytes: &[u8], limit: Option<usize>) -> Result<Vec<Label>> {
    let name = "label file";
    check_magic(bytes, LABELS_MAGIC, name)?;
    let count = read_u32_be(bytes, 4, name)? as usize;

    let count = limit.map_or(count, |limit| limit.min(count));
    let body = &bytes[LABELS_HEADER_SIZE..];
    if body.len() < count {
        return Err(IndexError::invalid_dataset(
            name,
            format!("truncated: {} label bytes for {} labels", body.len(), count),
        ));
    }

    body[..count]
        .iter()
        .map(|digit| {
            Label::from_digit(*digit).ok_or_else(|| {
                IndexError::invalid_dataset(name, format!("label value {digit} is not a digit"))
            })
        })
        .collect()
}

fn check_magic(bytes: &[u8], expected: u32, name: &str) -> Result<()> {
    let magic = read_u32_be(bytes, 0, name)?;
    if magic != expected {
        return Err(IndexError::invalid_dataset(
            name,
            format!("magic number {magic}, expected {expected}"),
        ));
    }
    Ok(())
}

fn read_u32_be(bytes: &[u8], offset: usize, name: &str) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|word| word.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| IndexError::invalid_dataset(name, "truncated header"))
}

/// Encode labeled images as the contents of an IDX image file and label file.
#[cfg(test)]
pub(crate) fn encode_labeled_images(labeled: &[LabeledImage]) -> (Vec<u8>, Vec<u8>) {
    let count = labeled.len() as u32;

    let mut images = Vec::with_capacity(IMAGES_HEADER_SIZE + labeled.len() * IMAGE_SIZE);
    for word in [IMAGES_MAGIC, count, N_ROWS as u32, N_COLS as u32] {
        images.extend_from_slice(&word.to_be_bytes());
    }
    let mut labels = Vec::with_capacity(LABELS_HEADER_SIZE + labeled.len());
    for word in [LABELS_MAGIC, count] {
        labels.extend_from_slice(&word.to_be_bytes());
    }

    for item in labeled {
        images.extend_from_slice(item.image().pixels());
        let digit = item.label().as_char().to_digit(10).unwrap_or(0);
        labels.push(digit as u8);
    }
    (images, labels)
}
