use tracing::debug;

use crate::data::Snapshot;
use crate::geo::GeoTransform;
use crate::map::labels::LabelPlacer;
use crate::map::projection::Viewport;
use crate::map::rivers::RiverRenderer;
use crate::map::surface::{Surface, TextMeasure};
use crate::map::tiles::{TileCache, TileGrid, TileStats, TileStore};

/// Counters from one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tiles: TileStats,
    pub rivers: usize,
    pub labels_placed: usize,
    pub places_considered: usize,
}

/// Composes one frame: tiles, then rivers, then placed labels.
/// The tile cache is the only state carried between frames.
pub struct MapRenderer<S: TileStore> {
    transform: GeoTransform,
    grid: TileGrid,
    store: S,
    cache: TileCache<S::Image>,
    rivers: RiverRenderer,
    labels: LabelPlacer,
}

impl<S: TileStore> MapRenderer<S> {
    pub fn new(transform: GeoTransform, grid: TileGrid, store: S, density: f64) -> Self {
        Self {
            transform,
            grid,
            store,
            cache: TileCache::new(),
            rivers: RiverRenderer::new(density),
            labels: LabelPlacer::new(density),
        }
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn cached_tiles(&self) -> usize {
        self.cache.len()
    }

    /// Render all map layers for `snapshot` onto the canvas
    pub fn render<C>(&mut self, viewport: &Viewport, snapshot: &Snapshot, canvas: &mut C) -> FrameStats
    where
        C: Surface<Image = S::Image> + TextMeasure + ?Sized,
    {
        canvas.clear();

        let tiles = self
            .grid
            .composite(&self.transform, viewport, &mut self.store, &mut self.cache, canvas);

        let rivers = self.rivers.draw(snapshot.rivers(), &self.transform, viewport, canvas);

        let placement = self.labels.place(snapshot.places(), &self.transform, viewport, &*canvas);
        self.labels.draw(&placement, canvas);

        let stats = FrameStats {
            tiles,
            rivers,
            labels_placed: placement.labels.len(),
            places_considered: placement.considered,
        };
        debug!(
            date = %snapshot.date(),
            tiles = stats.tiles.drawn,
            missing = stats.tiles.missing,
            rivers = stats.rivers,
            labels = stats.labels_placed,
            "frame rendered"
        );
        stats
    }
}
