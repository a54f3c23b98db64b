use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::DVec2;
use tracing::trace;

use crate::geo::{zoom_multiplier, GeoTransform, MAX_ZOOM};
use crate::map::geometry::ScreenRect;
use crate::map::projection::Viewport;
use crate::map::surface::Surface;

/// Zoom bucket of the only source imagery that exists; closer zoom levels
/// upscale these tiles.
pub const SOURCE_ZOOM: i32 = MAX_ZOOM;

/// Composite tile identity `(zoom, column, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub zoom: i32,
    pub column: u32,
    pub row: u32,
}

impl TileKey {
    pub fn new(zoom: i32, column: u32, row: u32) -> Self {
        Self { zoom, column, row }
    }

    /// Persisted resource name, `map_{zoom}_{column}_{row}`
    pub fn resource_name(&self) -> String {
        format!("map_{}_{}_{}", self.zoom, self.column, self.row)
    }
}

/// External tile image store. `None` means missing or undecodable.
pub trait TileStore {
    type Image;

    fn fetch(&mut self, key: TileKey) -> Option<Self::Image>;
}

/// Decoded tiles currently on screen, filled lazily at draw time
pub struct TileCache<I> {
    entries: HashMap<TileKey, I>,
}

impl<I> TileCache<I> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached image, fetching from the store on a miss. Failed fetches are not
    /// remembered, so the tile is retried on the next frame it is visible.
    pub fn get_or_fetch<S>(&mut self, key: TileKey, store: &mut S) -> Option<&I>
    where
        S: TileStore<Image = I> + ?Sized,
    {
        match self.entries.entry(key) {
            Entry::Occupied(slot) => Some(&*slot.into_mut()),
            Entry::Vacant(slot) => {
                let image = store.fetch(key)?;
                trace!(tile = %key.resource_name(), "tile loaded");
                Some(&*slot.insert(image))
            }
        }
    }

    /// Release a tile handle; returns whether anything was held
    pub fn evict(&mut self, key: TileKey) -> bool {
        let released = self.entries.remove(&key).is_some();
        if released {
            trace!(tile = %key.resource_name(), "tile evicted");
        }
        released
    }

    pub fn contains(&self, key: TileKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I> Default for TileCache<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame tile counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStats {
    pub drawn: usize,
    pub missing: usize,
    pub evicted: usize,
}

/// Fixed `columns x rows` grid of square tiles cut from the base raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    /// Tile edge length in raster pixels
    pub tile_size: u32,
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    pub fn new(tile_size: u32, columns: u32, rows: u32) -> Self {
        Self {
            tile_size,
            columns,
            rows,
        }
    }

    /// Screen rectangle covered by tile `(column, row)` at the viewport's zoom
    pub fn tile_rect(&self, transform: &GeoTransform, viewport: &Viewport, column: u32, row: u32) -> ScreenRect {
        let center = viewport.screen_center();
        let size = self.tile_size as f64;
        let left = transform.to_screen_x(viewport.center_lon, center.x, column as f64 * size, viewport.zoom);
        let top = transform.to_screen_y(viewport.center_lat, center.y, row as f64 * size, viewport.zoom);
        let extent = size * zoom_multiplier(viewport.zoom);
        ScreenRect::from_origin_size(DVec2::new(left, top), extent, extent)
    }

    /// Every tile with its screen rectangle, row-major
    pub fn tiles<'a>(
        &'a self,
        transform: &'a GeoTransform,
        viewport: &'a Viewport,
    ) -> impl Iterator<Item = (TileKey, ScreenRect)> + 'a {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| {
                (
                    TileKey::new(SOURCE_ZOOM, column, row),
                    self.tile_rect(transform, viewport, column, row),
                )
            })
        })
    }

    /// Keys of tiles whose rectangle overlaps the canvas
    #[cfg(test)]
    fn visible_tiles(&self, transform: &GeoTransform, viewport: &Viewport) -> Vec<TileKey> {
        let canvas = ScreenRect::canvas(viewport.width, viewport.height);
        self.tiles(transform, viewport)
            .filter(|(_, rect)| is_visible(viewport, &canvas, rect))
            .map(|(key, _)| key)
            .collect()
    }

    /// Full-grid scan: draw visible tiles (fetching lazily), release the rest.
    /// Missing images leave their slot empty.
    pub fn composite<S, C>(
        &self,
        transform: &GeoTransform,
        viewport: &Viewport,
        store: &mut S,
        cache: &mut TileCache<S::Image>,
        surface: &mut C,
    ) -> TileStats
    where
        S: TileStore + ?Sized,
        C: Surface<Image = S::Image> + ?Sized,
    {
        let canvas = ScreenRect::canvas(viewport.width, viewport.height);
        let mut stats = TileStats::default();

        for (key, rect) in self.tiles(transform, viewport) {
            if !is_visible(viewport, &canvas, &rect) {
                if cache.evict(key) {
                    stats.evicted += 1;
                }
                continue;
            }
            match cache.get_or_fetch(key, store) {
                Some(image) => {
                    surface.draw_image(image, rect);
                    stats.drawn += 1;
                }
                None => {
                    trace!(tile = %key.resource_name(), "tile missing");
                    stats.missing += 1;
                }
            }
        }

        stats
    }
}

fn is_visible(viewport: &Viewport, canvas: &ScreenRect, rect: &ScreenRect) -> bool {
    !viewport.is_empty() && rect.intersects(canvas)
}
