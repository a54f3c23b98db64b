use glam::DVec2;

use crate::braille::BrailleCanvas;

/// Axis-aligned screen-space rectangle used for containment and overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl ScreenRect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// The full canvas, `[0, width] x [0, height]`
    pub fn canvas(width: usize, height: usize) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width as f64, height as f64))
    }

    pub fn from_center(center: DVec2, half_width: f64, half_height: f64) -> Self {
        let half = DVec2::new(half_width, half_height);
        Self::new(center - half, center + half)
    }

    pub fn from_origin_size(origin: DVec2, width: f64, height: f64) -> Self {
        Self::new(origin, origin + DVec2::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// `other` lies fully inside (touching edges allowed)
    pub fn contains_rect(&self, other: &ScreenRect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Interiors overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        !(self.max.x <= other.min.x
            || other.max.x <= self.min.x
            || self.max.y <= other.min.y
            || other.max.y <= self.min.y)
    }
}

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line `width` pixels thick by offsetting parallel Bresenham passes
pub fn draw_thick_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32, width: i32) {
    let width = width.max(1);
    let lo = -(width - 1) / 2;
    let hi = lo + width - 1;
    // Offset across the dominant direction so the stroke widens sideways
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    for off in lo..=hi {
        if steep {
            draw_line(canvas, x0 + off, y0, x1 + off, y1);
        } else {
            draw_line(canvas, x0, y0 + off, x1, y1 + off);
        }
    }
}

/// Draw a filled circle
pub fn draw_disc(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Draw a circle outline (midpoint algorithm)
pub fn draw_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    if radius <= 0 {
        canvas.set_pixel_signed(cx, cy);
        return;
    }
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            canvas.set_pixel_signed(cx + px, cy + py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_thick_line_widens() {
        let mut thin = BrailleCanvas::new(5, 2);
        let mut thick = BrailleCanvas::new(5, 2);
        draw_line(&mut thin, 0, 3, 9, 3);
        draw_thick_line(&mut thick, 0, 3, 9, 3, 3);
        assert!(thick.lit_count() > thin.lit_count());
        assert_eq!(thick.lit_count(), 3 * thin.lit_count());
    }

    #[test]
    fn test_ring_is_hollow() {
        let mut canvas = BrailleCanvas::new(8, 4);
        draw_ring(&mut canvas, 8, 8, 5);
        assert!(!canvas.is_set(8, 8));
        assert!(canvas.is_set(13, 8));
        assert!(canvas.is_set(8, 3));
    }

    #[test]
    fn test_disc_is_filled() {
        let mut canvas = BrailleCanvas::new(8, 4);
        draw_disc(&mut canvas, 8, 8, 3);
        assert!(canvas.is_set(8, 8));
        assert!(canvas.is_set(11, 8));
        assert!(!canvas.is_set(11, 11));
    }

    #[test]
    fn test_rect_intersection_excludes_shared_edge() {
        let a = ScreenRect::from_origin_size(DVec2::ZERO, 10.0, 10.0);
        let b = ScreenRect::from_origin_size(DVec2::new(10.0, 0.0), 5.0, 5.0);
        let c = ScreenRect::from_origin_size(DVec2::new(9.0, 9.0), 5.0, 5.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_rect_containment() {
        let canvas = ScreenRect::canvas(100, 50);
        assert!(canvas.contains_rect(&ScreenRect::from_origin_size(DVec2::ZERO, 100.0, 50.0)));
        assert!(!canvas.contains_rect(&ScreenRect::from_center(DVec2::new(2.0, 25.0), 3.0, 3.0)));
        assert!(!canvas.contains_rect(&ScreenRect::from_origin_size(DVec2::new(90.0, 10.0), 11.0, 1.0)));
    }
}
