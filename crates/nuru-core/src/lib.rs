/// Types, erreurs et configuration partagés du format nuru.
///
/// This crate contains the data model (image, cells, palettes), the
/// palette path-resolution logic and the shared error type used across
/// the nuru workspace.

pub mod config;
pub mod error;
pub mod image;
pub mod palette;
pub mod paths;

pub use config::ViewerConfig;
pub use error::Error;
pub use image::{Cell, ColorMode, GlyphMode, Image};
pub use palette::{Channel, Palette, Rgb};
