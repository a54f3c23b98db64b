//! In-memory fixtures standing in for the tile store, drawing backend and
//! text measurement.

use std::collections::HashMap;

use glam::DVec2;

use crate::map::geometry::ScreenRect;
use crate::map::surface::{Surface, TextBounds, TextMeasure};
use crate::map::tiles::{TileGrid, TileKey, TileStore, SOURCE_ZOOM};

/// Tile store serving numeric image ids and recording every fetch
#[derive(Default)]
pub struct MemoryTileStore {
    images: HashMap<TileKey, u32>,
    pub fetches: Vec<TileKey>,
}

impl MemoryTileStore {
    /// A store with an image for every tile of `grid`
    pub fn full(grid: &TileGrid) -> Self {
        let mut images = HashMap::new();
        for row in 0..grid.rows {
            for column in 0..grid.columns {
                images.insert(TileKey::new(SOURCE_ZOOM, column, row), row * grid.columns + column);
            }
        }
        Self {
            images,
            fetches: Vec::new(),
        }
    }

    pub fn remove(&mut self, key: TileKey) {
        self.images.remove(&key);
    }

    pub fn fetch_count(&self, key: TileKey) -> usize {
        self.fetches.iter().filter(|k| **k == key).count()
    }
}

impl TileStore for MemoryTileStore {
    type Image = u32;

    fn fetch(&mut self, key: TileKey) -> Option<u32> {
        self.fetches.push(key);
        self.images.get(&key).copied()
    }
}

/// Monospace measurement: every char is `char_width * size` wide, one `size` tall
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasure {
    pub char_width: f64,
}

impl FixedMeasure {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }
}

impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str, size: f64) -> TextBounds {
        TextBounds {
            width: text.chars().count() as f64 * self.char_width * size,
            height: size,
            center_offset: size * 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Image { id: u32, dest: ScreenRect },
    Polyline { points: Vec<DVec2>, width: f64 },
    Ring { center: DVec2, radius: f64 },
    Disc { center: DVec2, radius: f64 },
    Text { text: String, origin: DVec2, size: f64 },
}

/// Surface that records draw calls in order
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub measure: FixedMeasure,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            measure: FixedMeasure::new(0.5),
        }
    }

    pub fn images(&self) -> impl Iterator<Item = (u32, ScreenRect)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Image { id, dest } => Some((*id, *dest)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Image = u32;

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_image(&mut self, image: &u32, dest: ScreenRect) {
        self.calls.push(DrawCall::Image { id: *image, dest });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], width: f64) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            width,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64) {
        self.calls.push(DrawCall::Ring { center, radius });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) {
        self.calls.push(DrawCall::Disc { center, radius });
    }

    fn draw_text(&mut self, text: &str, origin: DVec2, size: f64) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            origin,
            size,
        });
    }
}

impl TextMeasure for RecordingSurface {
    fn measure(&self, text: &str, size: f64) -> TextBounds {
        self.measure.measure(text, size)
    }
}
