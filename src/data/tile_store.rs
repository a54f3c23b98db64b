use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::map::{TileKey, TileStore};

/// Decoded grayscale tile, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct TileImage {
    pub width: u32,
    pub height: u32,
    pub luma: Vec<u8>,
}

impl TileImage {
    /// Nearest sample at normalized coordinates; `u`, `v` are clamped to `[0, 1]`
    pub fn sample(&self, u: f64, v: f64) -> u8 {
        if self.width == 0 || self.height == 0 {
            return u8::MAX;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f64) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f64) as u32).min(self.height - 1);
        self.luma[(y * self.width + x) as usize]
    }
}

/// Reads `map_{zoom}_{column}_{row}.png` from a directory
pub struct DirTileStore {
    dir: PathBuf,
}

impl DirTileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: TileKey) -> PathBuf {
        self.dir.join(format!("{}.png", key.resource_name()))
    }
}

impl TileStore for DirTileStore {
    type Image = TileImage;

    fn fetch(&mut self, key: TileKey) -> Option<TileImage> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(path = %path.display(), "tile file missing");
            return None;
        }
        match image::open(&path) {
            Ok(img) => {
                let gray = img.to_luma8();
                Some(TileImage {
                    width: gray.width(),
                    height: gray.height(),
                    luma: gray.into_raw(),
                })
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "tile decode failed");
                None
            }
        }
    }
}
