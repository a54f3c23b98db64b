//! Historical atlas engine: a raster tile mosaic with rivers and greedily
//! placed place labels, selectable by time snapshot.

pub mod braille;
pub mod data;
pub mod error;
pub mod geo;
pub mod map;
pub mod time_format;

pub use error::{AtlasError, TransformError};
