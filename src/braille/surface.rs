use glam::DVec2;

use crate::braille::BrailleCanvas;
use crate::data::TileImage;
use crate::map::{draw_disc, draw_ring, draw_thick_line, ScreenRect, Surface, TextBounds, TextMeasure};

/// Tile pixels darker than this become dots
const INK_THRESHOLD: u8 = 128;

/// Terminal drawing target: one braille canvas per layer so each can be
/// colored separately, plus label text placed on character cells.
pub struct BrailleSurface {
    pub tiles: BrailleCanvas,
    pub rivers: BrailleCanvas,
    pub markers: BrailleCanvas,
    /// `(column, row, text)` in character cells
    pub labels: Vec<(u16, u16, String)>,
    cols: usize,
    rows: usize,
}

impl BrailleSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            tiles: BrailleCanvas::new(cols, rows),
            rivers: BrailleCanvas::new(cols, rows),
            markers: BrailleCanvas::new(cols, rows),
            labels: Vec::new(),
            cols,
            rows,
        }
    }

    /// Reallocate the layers when the terminal size changes
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if cols != self.cols || rows != self.rows {
            *self = Self::new(cols, rows);
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.cols * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.rows * 4
    }
}

impl Surface for BrailleSurface {
    type Image = TileImage;

    fn clear(&mut self) {
        self.tiles.clear();
        self.rivers.clear();
        self.markers.clear();
        self.labels.clear();
    }

    fn draw_image(&mut self, image: &TileImage, dest: ScreenRect) {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }
        let x0 = dest.min.x.floor().max(0.0) as usize;
        let y0 = dest.min.y.floor().max(0.0) as usize;
        let x1 = (dest.max.x.ceil().max(0.0) as usize).min(self.pixel_width());
        let y1 = (dest.max.y.ceil().max(0.0) as usize).min(self.pixel_height());

        for y in y0..y1 {
            let v = (y as f64 + 0.5 - dest.min.y) / dest.height();
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            for x in x0..x1 {
                let u = (x as f64 + 0.5 - dest.min.x) / dest.width();
                if (0.0..1.0).contains(&u) && image.sample(u, v) < INK_THRESHOLD {
                    self.tiles.set_pixel(x, y);
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[DVec2], width: f64) {
        let width = width.round().max(1.0) as i32;
        for pair in points.windows(2) {
            let (a, b) = (pair[0].round(), pair[1].round());
            draw_thick_line(&mut self.rivers, a.x as i32, a.y as i32, b.x as i32, b.y as i32, width);
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64) {
        if let Some((x, y, r)) = fit_circle(center, radius) {
            draw_ring(&mut self.markers, x, y, r);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) {
        if let Some((x, y, r)) = fit_circle(center, radius) {
            draw_disc(&mut self.markers, x, y, r);
        }
    }

    fn draw_text(&mut self, text: &str, origin: DVec2, _size: f64) {
        // Baseline sits half a cell below the text center
        let col = (origin.x / 2.0).ceil();
        let row = ((origin.y - 2.0) / 4.0).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return;
        }
        self.labels.push((col as u16, row as u16, text.to_string()));
    }
}

/// Pixels whose whole square lies inside `[center - radius, center + radius]`
/// on one axis, as an inclusive index range
fn pixel_span(center: f64, radius: f64) -> Option<(i32, i32)> {
    let lo = (center - radius).ceil() as i32;
    let hi = (center + radius).floor() as i32 - 1;
    (lo <= hi).then_some((lo, hi))
}

/// Integer center and radius of the largest circle about the pixel holding
/// `center` whose dots stay within the marker rectangle of `radius`.
/// Rectangles that only share an edge never get a common dot.
fn fit_circle(center: DVec2, radius: f64) -> Option<(i32, i32, i32)> {
    let (x_lo, x_hi) = pixel_span(center.x, radius)?;
    let (y_lo, y_hi) = pixel_span(center.y, radius)?;
    let x = (center.x.floor() as i32).clamp(x_lo, x_hi);
    let y = (center.y.floor() as i32).clamp(y_lo, y_hi);
    let r = (x - x_lo).min(x_hi - x).min(y - y_lo).min(y_hi - y);
    Some((x, y, r))
}

impl TextMeasure for BrailleSurface {
    /// One character cell per char, plus a dot for cell alignment
    fn measure(&self, text: &str, _size: f64) -> TextBounds {
        TextBounds {
            width: text.chars().count() as f64 * 2.0 + 1.0,
            height: 4.0,
            center_offset: 2.0,
        }
    }
}
