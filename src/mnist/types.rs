use std::fmt;

use crate::error::{IndexError, Result};
use crate::item::Item;

/// Number of pixel rows in an image
pub const N_ROWS: usize = 28;
/// Number of pixel columns in an image
pub const N_COLS: usize = 28;
/// Number of pixels in an image, and so the dimensionality of the image space
pub const IMAGE_SIZE: usize = N_ROWS * N_COLS;

/// A 28×28 grayscale image, stored row-major with one byte (0-255) per pixel.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Image {
    pixels: [u8; IMAGE_SIZE],
}

impl Image {
    /// Create an image from row-major pixels.
    pub fn new(pixels: [u8; IMAGE_SIZE]) -> Self {
        Self { pixels }
    }

    /// The row-major pixels of this image.
    pub fn pixels(&self) -> &[u8; IMAGE_SIZE] {
        &self.pixels
    }

    /// The pixel at `row`, `col`.
    pub fn at(&self, row: usize, col: usize) -> u8 {
        assert!(row < N_ROWS && col < N_COLS, "pixel ({row}, {col}) out of bounds");
        self.pixels[row * N_COLS + col]
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new([0; IMAGE_SIZE])
    }
}

impl TryFrom<&[u8]> for Image {
    type Error = IndexError;

    fn try_from(pixels: &[u8]) -> Result<Self> {
        let array = pixels
            .try_into()
            .map_err(|_| IndexError::DimensionMismatch {
                expected: IMAGE_SIZE,
                actual: pixels.len(),
            })?;
        Ok(Self::new(array))
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.pixels.iter().filter(|p| **p > 0).count();
        f.debug_struct("Image")
            .field("nonzero_pixels", &lit)
            .finish_non_exhaustive()
    }
}

/// Draws the image as text, one character per pixel, darker shades for brighter pixels.
impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHADES: [char; 4] = [' ', '.', '+', '#'];
        for row in self.pixels.chunks_exact(N_COLS) {
            let line: String = row
                .iter()
                .map(|p| SHADES[(*p as usize * SHADES.len()) / 256])
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl Item<IMAGE_SIZE> for Image {
    type Coord = u8;

    #[inline]
    fn coord(&self, dim: usize) -> u8 {
        self.pixels[dim]
    }
}

/// The digit an image depicts, as a character `'0'..='9'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(char);

impl Label {
    /// Placeholder for an unknown label
    pub const INVALID: Label = Label('?');

    /// Wrap a label character.
    pub fn new(label: char) -> Self {
        Self(label)
    }

    /// The label for a digit value, or `None` if `digit > 9`.
    pub fn from_digit(digit: u8) -> Option<Self> {
        char::from_digit(digit as u32, 10).map(Self)
    }

    /// The label character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Returns `true` unless this is [`Label::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image together with the digit it depicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LabeledImage {
    image: Image,
    label: Label,
}

impl LabeledImage {
    /// Attach `label` to `image`.
    pub fn new(image: Image, label: Label) -> Self {
        Self { image, label }
    }

    /// The image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The label.
    pub fn label(&self) -> Label {
        self.label
    }
}

impl Item<IMAGE_SIZE> for LabeledImage {
    type Coord = u8;

    #[inline]
    fn coord(&self, dim: usize) -> u8 {
        self.image.pixels[dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_access_is_row_major() {
        let mut pixels = [0; IMAGE_SIZE];
        pixels[N_COLS + 2] = 200;
        let image = Image::new(pixels);
        assert_eq!(image.at(1, 2), 200);
        assert_eq!(image.at(2, 1), 0);
        assert_eq!(image.coord(N_COLS + 2), 200);
    }

    #[test]
    fn image_from_wrong_length() {
        let err = Image::try_from(&[0u8; 10][..]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch {
                expected: IMAGE_SIZE,
                actual: 10
            }
        ));
        assert!(Image::try_from(&[7u8; IMAGE_SIZE][..]).is_ok());
    }

    #[test]
    fn labels() {
        assert_eq!(Label::from_digit(7), Some(Label::new('7')));
        assert_eq!(Label::from_digit(10), None);
        assert!(!Label::default().is_valid());
        assert_eq!(Label::new('3').to_string(), "3");
    }

    #[test]
    fn labeled_image_coordinates_match_image() {
        let mut pixels = [0; IMAGE_SIZE];
        pixels[IMAGE_SIZE - 1] = 255;
        let labeled = LabeledImage::new(Image::new(pixels), Label::new('1'));
        assert_eq!(labeled.coord(IMAGE_SIZE - 1), 255);
        assert_eq!(labeled.coord(0), labeled.image().coord(0));
    }

    #[test]
    fn display_draws_rows() {
        let mut pixels = [0; IMAGE_SIZE];
        pixels[0] = 255;
        let drawn = Image::new(pixels).to_string();
        assert_eq!(drawn.lines().count(), N_ROWS);
        assert_eq!(drawn.lines().next(), Some("#"));
    }
}
