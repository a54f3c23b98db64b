/// First codepoint of the Unicode braille block (no dots raised)
const BRAILLE_BASE: u32 = 0x2800;

/// Braille canvas for one map layer.
/// Each character cell holds a 2x4 grid of dots, so the pixel resolution is
/// `cols * 2` by `rows * 4`. Cells are stored row-major in one buffer.
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl BrailleCanvas {
    /// Create an empty canvas of `cols x rows` characters
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
        }
    }

    /// Raise the dot at pixel `(x, y)`; out-of-range pixels are ignored.
    /// Dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if let Some(cell) = self.cell_index(x, y) {
            self.cells[cell] |= dot_bit(x, y);
        }
    }

    /// Signed variant for rasterizers that step off the left or top edge
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.cols * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.rows * 4
    }

    /// Lower every dot, keeping the allocation
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn cell_index(&self, x: usize, y: usize) -> Option<usize> {
        let (cx, cy) = (x / 2, y / 4);
        (cx < self.cols && cy < self.rows).then_some(cy * self.cols + cx)
    }

    /// One string of braille characters per character row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|&bits| braille_char(bits)).collect())
    }

    #[cfg(test)]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.cell_index(x, y)
            .is_some_and(|cell| self.cells[cell] & dot_bit(x, y) != 0)
    }

    #[cfg(test)]
    pub fn lit_count(&self) -> u32 {
        self.cells.iter().map(|b| b.count_ones()).sum()
    }

    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }
}

#[inline(always)]
fn braille_char(bits: u8) -> char {
    char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' ')
}

/// Bit for a pixel within its 2x4 braille cell
#[inline(always)]
fn dot_bit(x: usize, y: usize) -> u8 {
    const LEFT: [u8; 4] = [0x01, 0x02, 0x04, 0x40];
    const RIGHT: [u8; 4] = [0x08, 0x10, 0x20, 0x80];
    if x % 2 == 0 {
        LEFT[y % 4]
    } else {
        RIGHT[y % 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_string(), "⠁");
    }

    #[test]
    fn test_full_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y);
            }
        }
        assert_eq!(canvas.to_string(), "⣿");
    }

    #[test]
    fn test_diagonal_spans_cells() {
        let mut canvas = BrailleCanvas::new(2, 1);
        for i in 0..4 {
            canvas.set_pixel(i, i);
        }
        // 0x01 | 0x10, then 0x04 | 0x80
        assert_eq!(canvas.to_string(), "⠑⢄");
    }

    #[test]
    fn test_rows_are_separate() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.set_pixel(3, 7);
        let rows: Vec<String> = canvas.rows().collect();
        assert_eq!(rows, ["⠀⠀", "⠀⢀"]);
    }

    #[test]
    fn test_clear() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(3, 2);
        assert!(canvas.is_set(3, 2));
        canvas.clear();
        assert_eq!(canvas.lit_count(), 0);
        assert_eq!((canvas.pixel_width(), canvas.pixel_height()), (4, 4));
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(2, 0);
        canvas.set_pixel_signed(-1, 0);
        assert_eq!(canvas.lit_count(), 0);
    }

    #[test]
    fn test_empty_canvas_has_no_rows() {
        assert_eq!(BrailleCanvas::new(0, 3).rows().filter(|r| !r.is_empty()).count(), 0);
    }
}
