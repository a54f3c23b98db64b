use glam::DVec2;

use crate::map::geometry::ScreenRect;

/// Drawing backend the renderer paints onto. All coordinates are screen pixels.
pub trait Surface {
    /// Decoded tile bitmap handle accepted by `draw_image`
    type Image;

    fn clear(&mut self);

    /// Draw a tile image scaled into `dest`
    fn draw_image(&mut self, image: &Self::Image, dest: ScreenRect);

    /// Connected straight segments through `points`
    fn stroke_polyline(&mut self, points: &[DVec2], width: f64);

    fn stroke_circle(&mut self, center: DVec2, radius: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64);

    /// Draw label text with its baseline starting at `origin`, in a color
    /// contrasting with the markers
    fn draw_text(&mut self, text: &str, origin: DVec2, size: f64);
}

/// Size of a rendered string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub width: f64,
    pub height: f64,
    /// Distance from the vertical center of the text box down to the baseline
    pub center_offset: f64,
}

/// Text-measurement capability supplied by the host
pub trait TextMeasure {
    fn measure(&self, text: &str, size: f64) -> TextBounds;
}
