#![doc = include_str!("../README.md")]

pub mod classify;
pub mod distance;
mod error;
pub mod item;
pub mod kdtree;
pub mod knn;
pub mod mnist;
mod r#type;

pub use error::{IndexError, Result};
pub use item::{Item, Labeled};
pub use r#type::Coordinate;
