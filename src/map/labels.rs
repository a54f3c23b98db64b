use glam::DVec2;
use tracing::debug;

use crate::data::{Place, PlaceKind};
use crate::geo::GeoTransform;
use crate::map::geometry::ScreenRect;
use crate::map::projection::Viewport;
use crate::map::surface::{Surface, TextMeasure};

/// Concentric circle radii, outer to inner, in density-independent units.
/// Every circle but the innermost is stroked; the innermost is filled.
pub fn glyph_radii(kind: PlaceKind) -> &'static [f64] {
    match kind {
        PlaceKind::Capital => &[16.0, 12.0, 8.0],
        PlaceKind::Province => &[14.0, 6.0],
        PlaceKind::Prefecture => &[12.0, 6.0],
        PlaceKind::County => &[10.0, 5.0],
        PlaceKind::Town => &[8.0],
    }
}

/// Label text size in density-independent units
pub fn text_size(kind: PlaceKind) -> f64 {
    match kind {
        PlaceKind::Capital => 28.0,
        PlaceKind::Province => 24.0,
        PlaceKind::Prefecture => 22.0,
        PlaceKind::County => 20.0,
        PlaceKind::Town => 18.0,
    }
}

fn outer_radius(kind: PlaceKind) -> f64 {
    glyph_radii(kind)[0]
}

/// An accepted place: where its marker and label go
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel<'a> {
    pub place: &'a Place,
    pub anchor: DVec2,
    pub marker: ScreenRect,
    pub label: ScreenRect,
    pub text_size: f64,
    /// Start of the text baseline
    pub baseline: DVec2,
}

/// Result of one placement pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement<'a> {
    /// Accepted places in priority order
    pub labels: Vec<PlacedLabel<'a>>,
    pub considered: usize,
}

/// Greedy single-pass label placement.
///
/// Places are taken in slice order, which is their priority: an earlier place
/// keeps contested space and later ones are dropped entirely. A place is drawn
/// only if its marker and its label both fit inside the canvas and neither
/// overlaps anything accepted before it. There is no backtracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacer {
    /// Device density multiplier for glyph radii and text sizes
    pub density: f64,
}

impl LabelPlacer {
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    /// Decide which places are drawn this frame. The collision list lives only
    /// for the duration of this call.
    pub fn place<'a, M>(
        &self,
        places: &'a [Place],
        transform: &GeoTransform,
        viewport: &Viewport,
        measure: &M,
    ) -> Placement<'a>
    where
        M: TextMeasure + ?Sized,
    {
        let mut placement = Placement::default();
        if viewport.is_empty() {
            return placement;
        }

        let canvas = ScreenRect::canvas(viewport.width, viewport.height);
        let mut accepted: Vec<ScreenRect> = Vec::new();

        for place in places {
            placement.considered += 1;
            if let Some(label) = self.try_place(place, transform, viewport, measure, &canvas, &accepted) {
                accepted.push(label.marker);
                accepted.push(label.label);
                placement.labels.push(label);
            }
        }

        debug!(
            accepted = placement.labels.len(),
            considered = placement.considered,
            "labels placed"
        );
        placement
    }

    fn try_place<'a, M>(
        &self,
        place: &'a Place,
        transform: &GeoTransform,
        viewport: &Viewport,
        measure: &M,
        canvas: &ScreenRect,
        accepted: &[ScreenRect],
    ) -> Option<PlacedLabel<'a>>
    where
        M: TextMeasure + ?Sized,
    {
        let anchor = viewport.project(transform, place.lon, place.lat);

        let radius = outer_radius(place.kind) * self.density;
        let marker = ScreenRect::from_center(anchor, radius, radius);
        if !canvas.contains_rect(&marker) {
            return None;
        }

        let size = text_size(place.kind) * self.density;
        let bounds = measure.measure(&place.name, size);
        let label = ScreenRect::from_origin_size(
            DVec2::new(marker.max.x, anchor.y - bounds.height / 2.0),
            bounds.width,
            bounds.height,
        );
        if !canvas.contains_rect(&label) {
            return None;
        }

        if accepted
            .iter()
            .any(|taken| taken.intersects(&marker) || taken.intersects(&label))
        {
            return None;
        }

        Some(PlacedLabel {
            place,
            anchor,
            marker,
            label,
            text_size: size,
            baseline: DVec2::new(label.min.x, anchor.y + bounds.center_offset),
        })
    }

    /// Paint accepted markers and their labels
    pub fn draw<S>(&self, placement: &Placement<'_>, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        for label in &placement.labels {
            let radii = glyph_radii(label.place.kind);
            if let Some((dot, rings)) = radii.split_last() {
                for ring in rings {
                    surface.stroke_circle(label.anchor, ring * self.density);
                }
                surface.fill_circle(label.anchor, dot * self.density);
            }
            surface.draw_text(&label.place.name, label.baseline, label.text_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::testing::{DrawCall, FixedMeasure, RecordingSurface};

    // 1 raster px = 0.01 degree; viewport centered on (105E, 35N), 400 x 300
    fn setup() -> (GeoTransform, Viewport, FixedMeasure) {
        (
            GeoTransform::new(0.01, -0.01, 100.0, 40.0).unwrap(),
            Viewport::new(105.0, 35.0, 0, 400, 300),
            FixedMeasure::new(0.5),
        )
    }

    fn lon_at(x: f64) -> f64 {
        105.0 + (x - 200.0) * 0.01
    }

    fn lat_at(y: f64) -> f64 {
        35.0 - (y - 150.0) * 0.01
    }

    fn scattered(n: usize) -> Vec<Place> {
        (0..n)
            .map(|i| {
                Place::new(
                    format!("Place {i}"),
                    103.0 + ((i * 37) % 97) as f64 * 0.04,
                    33.5 + ((i * 53) % 89) as f64 * 0.03,
                    PlaceKind::ALL[i % PlaceKind::ALL.len()],
                )
            })
            .collect()
    }

    #[test]
    fn test_identical_anchor_first_wins() {
        let (t, vp, m) = setup();
        let places = vec![
            Place::new("Xianyang", 105.0, 35.0, PlaceKind::Prefecture),
            Place::new("Weinan", 105.0, 35.0, PlaceKind::Prefecture),
        ];
        let placement = LabelPlacer::new(1.0).place(&places, &t, &vp, &m);
        assert_eq!(placement.considered, 2);
        assert_eq!(placement.labels.len(), 1);
        assert_eq!(placement.labels[0].place.name, "Xianyang");
    }

    #[test]
    fn test_label_past_right_edge_rejects_whole_place() {
        let (t, vp, m) = setup();
        // Town marker spans x 372..388, "Wan" needs 27 px after it
        let places = vec![Place::new("Wan", lon_at(380.0), lat_at(150.0), PlaceKind::Town)];
        let placer = LabelPlacer::new(1.0);
        let placement = placer.place(&places, &t, &vp, &m);
        assert!(placement.labels.is_empty());

        let mut surface = RecordingSurface::new();
        placer.draw(&placement, &mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_marker_outside_canvas_rejected() {
        let (t, vp, m) = setup();
        let places = vec![Place::new("Edge", lon_at(5.0), lat_at(150.0), PlaceKind::Capital)];
        assert!(LabelPlacer::new(1.0).place(&places, &t, &vp, &m).labels.is_empty());
    }

    #[test]
    fn test_label_geometry() {
        let (t, vp, m) = setup();
        let places = vec![Place::new("Ye", lon_at(100.0), lat_at(100.0), PlaceKind::County)];
        let placement = LabelPlacer::new(1.0).place(&places, &t, &vp, &m);
        let l = &placement.labels[0];
        assert!((l.anchor - DVec2::new(100.0, 100.0)).length() < 1e-6);
        assert!((l.marker.width() - 20.0).abs() < 1e-6);
        // Label starts at the marker's right edge, vertically centered on the anchor
        assert!((l.label.min.x - l.marker.max.x).abs() < 1e-9);
        assert!((l.label.min.y + l.label.max.y - 2.0 * l.anchor.y).abs() < 1e-6);
        assert!((l.label.width() - 20.0).abs() < 1e-6);
        assert!((l.baseline.y - (100.0 + 6.0)).abs() < 1e-6);
    }

    #[test]
    fn test_density_scales_glyphs() {
        let (t, vp, m) = setup();
        let places = vec![Place::new("Ye", lon_at(100.0), lat_at(100.0), PlaceKind::County)];
        let placement = LabelPlacer::new(0.5).place(&places, &t, &vp, &m);
        assert!((placement.labels[0].marker.width() - 10.0).abs() < 1e-6);
        assert!((placement.labels[0].text_size - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_earlier_low_tier_beats_later_capital() {
        let (t, vp, m) = setup();
        let places = vec![
            Place::new("Village", lon_at(200.0), lat_at(150.0), PlaceKind::Town),
            Place::new("Capital", lon_at(202.0), lat_at(151.0), PlaceKind::Capital),
        ];
        let placement = LabelPlacer::new(1.0).place(&places, &t, &vp, &m);
        let names: Vec<_> = placement.labels.iter().map(|l| l.place.name.as_str()).collect();
        assert_eq!(names, ["Village"]);
    }

    #[test]
    fn test_no_overlap_and_containment() {
        let (t, vp, m) = setup();
        let places = scattered(200);
        let placement = LabelPlacer::new(1.0).place(&places, &t, &vp, &m);
        assert!(!placement.labels.is_empty());
        assert!(placement.labels.len() < places.len());

        let canvas = ScreenRect::canvas(vp.width, vp.height);
        let rects: Vec<_> = placement.labels.iter().flat_map(|l| [l.marker, l.label]).collect();
        for (i, a) in rects.iter().enumerate() {
            assert!(canvas.contains_rect(a), "rect {i} escapes canvas: {a:?}");
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let (t, vp, m) = setup();
        let places = scattered(150);
        let placer = LabelPlacer::new(1.0);
        let first = placer.place(&places, &t, &vp, &m);
        for _ in 0..3 {
            assert_eq!(placer.place(&places, &t, &vp, &m), first);
        }
    }

    #[test]
    fn test_empty_viewport_places_nothing() {
        let (t, _, m) = setup();
        let vp = Viewport::new(105.0, 35.0, 0, 400, 0);
        let places = scattered(10);
        assert!(LabelPlacer::new(1.0).place(&places, &t, &vp, &m).labels.is_empty());
    }

    #[test]
    fn test_draw_glyph_tiers() {
        let (t, vp, m) = setup();
        let places = vec![
            Place::new("Luoyang", lon_at(60.0), lat_at(60.0), PlaceKind::Capital),
            Place::new("Xinye", lon_at(60.0), lat_at(200.0), PlaceKind::Town),
        ];
        let placer = LabelPlacer::new(1.0);
        let placement = placer.place(&places, &t, &vp, &m);
        let mut surface = RecordingSurface::new();
        placer.draw(&placement, &mut surface);

        let rings: Vec<f64> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Ring { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        let discs: Vec<f64> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Disc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(rings, vec![16.0, 12.0]);
        assert_eq!(discs, vec![8.0, 8.0]);
        assert_eq!(surface.texts().collect::<Vec<_>>(), ["Luoyang", "Xinye"]);
    }

    #[test]
    fn test_outer_radius_ordering() {
        let radii: Vec<f64> = PlaceKind::ALL.iter().map(|k| outer_radius(*k)).collect();
        assert!(radii.windows(2).all(|w| w[0] > w[1]));
    }
}
