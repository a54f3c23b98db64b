use glam::DVec2;

use crate::geo::{clamp_zoom, zoom_multiplier, GeoTransform};

/// Viewport representing the visible map area and zoom level.
/// Owned by the UI layer; the renderer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Center longitude
    pub center_lon: f64,
    /// Center latitude
    pub center_lat: f64,
    /// Discrete zoom level in `[MIN_ZOOM, 0]`
    pub zoom: i32,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: i32, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom: clamp_zoom(zoom),
            width,
            height,
        }
    }

    /// Nothing can be drawn into a zero-area canvas
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Screen position of the center point
    #[inline(always)]
    pub fn screen_center(&self) -> DVec2 {
        DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Project a geographic coordinate to screen pixels
    #[inline(always)]
    pub fn project(&self, transform: &GeoTransform, lon: f64, lat: f64) -> DVec2 {
        transform.geo_to_screen(
            lon,
            lat,
            (self.center_lon, self.center_lat),
            self.screen_center(),
            self.zoom,
        )
    }

    /// Unproject screen pixels back to (lon, lat)
    pub fn unproject(&self, transform: &GeoTransform, sx: f64, sy: f64) -> (f64, f64) {
        let scale = zoom_multiplier(self.zoom);
        let center = self.screen_center();
        (
            self.center_lon + transform.lon_delta_for_pixel_delta((sx - center.x) / scale),
            self.center_lat + transform.lat_delta_for_pixel_delta((sy - center.y) / scale),
        )
    }

    /// Pan the viewport by a screen-pixel delta (positive dx looks further east)
    pub fn pan_pixels(&mut self, transform: &GeoTransform, dx: f64, dy: f64) {
        let scale = zoom_multiplier(self.zoom);
        self.center_lon += transform.lon_delta_for_pixel_delta(dx / scale);
        self.center_lat += transform.lat_delta_for_pixel_delta(dy / scale);
    }

    /// One step closer (doubles on-screen size)
    pub fn zoom_in(&mut self) {
        self.zoom = clamp_zoom(self.zoom - 1);
    }

    /// One step back towards native resolution
    pub fn zoom_out(&mut self) {
        self.zoom = clamp_zoom(self.zoom + 1);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}
