mod geometry;
mod labels;
mod projection;
mod renderer;
mod rivers;
mod surface;
mod tiles;

#[cfg(test)]
pub(crate) mod testing;

pub use geometry::{draw_disc, draw_line, draw_ring, draw_thick_line, ScreenRect};
pub use labels::{glyph_radii, text_size, LabelPlacer, PlacedLabel, Placement};
pub use projection::Viewport;
pub use renderer::{FrameStats, MapRenderer};
pub use rivers::RiverRenderer;
pub use surface::{Surface, TextBounds, TextMeasure};
pub use tiles::{TileCache, TileGrid, TileKey, TileStats, TileStore, SOURCE_ZOOM};
