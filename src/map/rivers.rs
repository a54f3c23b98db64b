use glam::DVec2;

use crate::data::River;
use crate::geo::GeoTransform;
use crate::map::projection::Viewport;
use crate::map::surface::Surface;

/// Strokes river polylines. No culling or collision: every river is drawn,
/// and always before labels so markers sit on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverRenderer {
    /// Device pixels per width tier
    pub density: f64,
}

impl RiverRenderer {
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    /// Device stroke width for a width tier
    #[inline(always)]
    pub fn stroke_width(&self, tier: u8) -> f64 {
        tier as f64 * self.density
    }

    /// Draw every river; returns how many were stroked
    pub fn draw<S>(&self, rivers: &[River], transform: &GeoTransform, viewport: &Viewport, surface: &mut S) -> usize
    where
        S: Surface + ?Sized,
    {
        if viewport.is_empty() {
            return 0;
        }

        let mut points: Vec<DVec2> = Vec::new();
        let mut drawn = 0;
        for river in rivers {
            if river.points().len() < 2 {
                continue;
            }
            points.clear();
            points.extend(
                river
                    .points()
                    .iter()
                    .map(|&(lon, lat)| viewport.project(transform, lon, lat)),
            );
            surface.stroke_polyline(&points, self.stroke_width(river.width()));
            drawn += 1;
        }
        drawn
    }
}
