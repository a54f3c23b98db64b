use glam::DVec2;

use crate::error::TransformError;

/// Most zoomed-in level (each step below 0 doubles on-screen size)
pub const MIN_ZOOM: i32 = -2;
/// Native resolution of the source tiles; nothing finer exists
pub const MAX_ZOOM: i32 = 0;

/// Clamp a requested zoom level into the supported range
#[inline(always)]
pub fn clamp_zoom(zoom: i32) -> i32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Screen pixels per raster pixel at a zoom level: 0 -> 1, -1 -> 2, -2 -> 4.
/// Positive levels have no source imagery and are treated as 0.
#[inline(always)]
pub fn zoom_multiplier(zoom: i32) -> f64 {
    2f64.powi(-zoom.min(MAX_ZOOM))
}

/// Affine world-file mapping between raster pixels and lon/lat.
///
/// `lon = x_scale * px + origin_lon`, `lat = y_scale * py + origin_lat`.
/// `y_scale` is negative for north-up rasters since rows grow southward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    x_scale: f64,
    y_scale: f64,
    origin_lon: f64,
    origin_lat: f64,
}

impl GeoTransform {
    /// Validate and build a transform. Zero or non-finite scales are rejected here
    /// so the inverse mappings never divide by zero later.
    pub fn new(
        x_scale: f64,
        y_scale: f64,
        origin_lon: f64,
        origin_lat: f64,
    ) -> Result<Self, TransformError> {
        for (axis, value) in [("x", x_scale), ("y", y_scale)] {
            if value == 0.0 || !value.is_finite() {
                return Err(TransformError::DegenerateScale { axis, value });
            }
        }
        for (axis, value) in [("lon", origin_lon), ("lat", origin_lat)] {
            if !value.is_finite() {
                return Err(TransformError::NonFiniteOrigin { axis, value });
            }
        }
        Ok(Self {
            x_scale,
            y_scale,
            origin_lon,
            origin_lat,
        })
    }

    /// Raster pixel -> (lon, lat)
    #[inline(always)]
    pub fn to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        (
            self.x_scale * px + self.origin_lon,
            self.y_scale * py + self.origin_lat,
        )
    }

    /// (lon, lat) -> raster pixel
    #[inline(always)]
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f64, f64) {
        (
            (lon - self.origin_lon) / self.x_scale,
            (lat - self.origin_lat) / self.y_scale,
        )
    }

    #[inline(always)]
    pub fn pixel_delta_for_lon_delta(&self, d_lon: f64) -> f64 {
        d_lon / self.x_scale
    }

    #[inline(always)]
    pub fn pixel_delta_for_lat_delta(&self, d_lat: f64) -> f64 {
        d_lat / self.y_scale
    }

    #[inline(always)]
    pub fn lon_delta_for_pixel_delta(&self, d_px: f64) -> f64 {
        d_px * self.x_scale
    }

    #[inline(always)]
    pub fn lat_delta_for_pixel_delta(&self, d_py: f64) -> f64 {
        d_py * self.y_scale
    }

    /// Screen x of raster column `pixel_x`, given that longitude `ref_lon`
    /// sits at screen x `ref_screen_x`.
    #[inline(always)]
    pub fn to_screen_x(&self, ref_lon: f64, ref_screen_x: f64, pixel_x: f64, zoom: i32) -> f64 {
        let ref_px = self.pixel_delta_for_lon_delta(ref_lon - self.origin_lon);
        ref_screen_x + (pixel_x - ref_px) * zoom_multiplier(zoom)
    }

    /// Screen y of raster row `pixel_y`, given that latitude `ref_lat`
    /// sits at screen y `ref_screen_y`.
    #[inline(always)]
    pub fn to_screen_y(&self, ref_lat: f64, ref_screen_y: f64, pixel_y: f64, zoom: i32) -> f64 {
        let ref_py = self.pixel_delta_for_lat_delta(ref_lat - self.origin_lat);
        ref_screen_y + (pixel_y - ref_py) * zoom_multiplier(zoom)
    }

    /// Project a geographic point straight to the screen relative to a reference point
    pub fn geo_to_screen(
        &self,
        lon: f64,
        lat: f64,
        reference: (f64, f64),
        ref_screen: DVec2,
        zoom: i32,
    ) -> DVec2 {
        let (px, py) = self.to_pixel(lon, lat);
        DVec2::new(
            self.to_screen_x(reference.0, ref_screen.x, px, zoom),
            self.to_screen_y(reference.1, ref_screen.y, py, zoom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> GeoTransform {
        GeoTransform::new(0.00833, -0.00833, 0.00417, 89.99583).unwrap()
    }

    #[test]
    fn test_to_geo_origin() {
        let (lon, lat) = scenario_a().to_geo(0.0, 0.0);
        assert!((lon - 0.00417).abs() < 1e-12);
        assert!((lat - 89.99583).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let t = scenario_a();
        for &(px, py) in &[(0.0, 0.0), (10.5, 20.25), (43199.0, 21599.0), (1234.0, 9876.0)] {
            let (lon, lat) = t.to_geo(px, py);
            let (bx, by) = t.to_pixel(lon, lat);
            assert!((bx - px).abs() < 1e-6, "x {px} -> {bx}");
            assert!((by - py).abs() < 1e-6, "y {py} -> {by}");
        }
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert_eq!(
            GeoTransform::new(0.0, -1.0, 0.0, 0.0),
            Err(TransformError::DegenerateScale { axis: "x", value: 0.0 })
        );
        assert!(GeoTransform::new(1.0, 0.0, 0.0, 0.0).is_err());
        assert!(GeoTransform::new(1.0, f64::NAN, 0.0, 0.0).is_err());
        assert!(GeoTransform::new(1.0, -1.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_zoom_multiplier_doubles() {
        assert_eq!(zoom_multiplier(0), 1.0);
        assert_eq!(zoom_multiplier(-1), 2.0 * zoom_multiplier(0));
        assert_eq!(zoom_multiplier(-2), 2.0 * zoom_multiplier(-1));
        assert_eq!(zoom_multiplier(3), 1.0);
    }

    #[test]
    fn test_to_screen_scales_distance_from_reference() {
        let t = GeoTransform::new(0.5, -0.5, 100.0, 40.0).unwrap();
        // lon 105 -> pixel 10
        let at = |zoom| t.to_screen_x(105.0, 50.0, 14.0, zoom) - 50.0;
        assert_eq!(at(0), 4.0);
        assert_eq!(at(-1), 2.0 * at(0));
        assert_eq!(at(-2), 2.0 * at(-1));

        // lat 35 -> pixel 10; rows grow south
        assert_eq!(t.to_screen_y(35.0, 20.0, 12.0, -1), 24.0);
    }

    #[test]
    fn test_geo_to_screen_reference_lands_on_itself() {
        let t = scenario_a();
        let p = t.geo_to_screen(110.0, 30.0, (110.0, 30.0), DVec2::new(80.0, 40.0), -2);
        assert!((p.x - 80.0).abs() < 1e-9);
        assert!((p.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_deltas_invert() {
        let t = scenario_a();
        let d = t.pixel_delta_for_lon_delta(t.lon_delta_for_pixel_delta(17.0));
        assert!((d - 17.0).abs() < 1e-9);
        assert!(t.pixel_delta_for_lat_delta(-0.00833) > 0.0);
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(1), 0);
        assert_eq!(clamp_zoom(-5), -2);
        assert_eq!(clamp_zoom(-1), -1);
    }
}
