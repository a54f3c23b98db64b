use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AtlasError, Result, TransformError};
use crate::geo::GeoTransform;
use crate::map::TileGrid;

/// Contents of `atlas.json`. Every field falls back to the built-in atlas.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtlasConfig {
    pub transform: TransformConfig,
    pub tiles: TileConfig,
    pub view: ViewConfig,
    /// Device density multiplier for glyphs, text and river strokes
    pub density: f64,
    pub snapshots: Vec<SnapshotEntry>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            transform: TransformConfig::default(),
            tiles: TileConfig::default(),
            view: ViewConfig::default(),
            // Braille pixels are coarse; a capital's outer ring becomes 4 dots
            density: 0.25,
            snapshots: Vec::new(),
        }
    }
}

/// World-file parameters of the base raster
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformConfig {
    pub x_scale: f64,
    pub y_scale: f64,
    pub origin_lon: f64,
    pub origin_lat: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            x_scale: 0.05,
            y_scale: -0.05,
            origin_lon: 73.0,
            origin_lat: 54.0,
        }
    }
}

impl TransformConfig {
    pub fn build(&self) -> std::result::Result<GeoTransform, TransformError> {
        GeoTransform::new(self.x_scale, self.y_scale, self.origin_lon, self.origin_lat)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TileConfig {
    /// Tile edge in raster pixels
    pub size: u32,
    pub columns: u32,
    pub rows: u32,
    /// Directory of `map_{zoom}_{i}_{j}.png`, relative to the data directory
    pub dir: PathBuf,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            size: 64,
            columns: 16,
            rows: 11,
            dir: PathBuf::from("tiles"),
        }
    }
}

impl TileConfig {
    pub fn grid(&self) -> TileGrid {
        TileGrid::new(self.size, self.columns, self.rows)
    }
}

/// Initial view; also where `reset` returns to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_lon: 112.0,
            center_lat: 34.0,
            zoom: 0,
        }
    }
}

/// One snapshot file of the data feed
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SnapshotEntry {
    /// `[-]YYYY[-MM[-DD]]`, astronomical year numbering
    pub date: String,
    /// GeoJSON file, relative to the data directory
    pub file: PathBuf,
}

/// Parse a manifest from JSON bytes
pub fn parse_manifest(path: &Path, bytes: &mut [u8]) -> Result<AtlasConfig> {
    simd_json::serde::from_slice(bytes).map_err(|e| AtlasError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse `atlas.json`
pub fn load_manifest(path: &Path) -> Result<AtlasConfig> {
    let mut bytes = fs::read(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(path, &mut bytes)
}
