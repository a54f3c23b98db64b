use chronomap::braille::BrailleSurface;
use chronomap::data::{DirTileStore, Timeline, ViewConfig};
use chronomap::geo::clamp_zoom;
use chronomap::map::{FrameStats, MapRenderer, Viewport};
use chronomap::time_format::format_date;

/// Screen pixels moved per pan key press
const PAN_STEP: f64 = 8.0;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub timeline: Timeline,
    pub renderer: MapRenderer<DirTileStore>,
    pub surface: BrailleSurface,
    /// Counters from the most recent frame
    pub last_frame: FrameStats,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Where `reset` returns to
    home: ViewConfig,
}

/// Braille canvas size in characters for a terminal size.
/// Accounts for the border (2 columns, 2 rows) and the status bar (1 row).
fn inner_size(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(2), height.saturating_sub(3))
}

/// Terminal cell to braille pixel, relative to the map's inner area
fn cell_to_pixel(col: u16, row: u16) -> (f64, f64) {
    (
        (col.saturating_sub(1) as f64) * 2.0,
        (row.saturating_sub(1) as f64) * 4.0,
    )
}

impl App {
    pub fn new(
        width: usize,
        height: usize,
        renderer: MapRenderer<DirTileStore>,
        timeline: Timeline,
        home: ViewConfig,
    ) -> Self {
        let (cols, rows) = inner_size(width, height);
        Self {
            viewport: Viewport::new(home.center_lon, home.center_lat, home.zoom, cols * 2, rows * 4),
            timeline,
            renderer,
            surface: BrailleSurface::new(cols, rows),
            last_frame: FrameStats::default(),
            should_quit: false,
            last_mouse: None,
            home,
        }
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (cols, rows) = inner_size(width, height);
        self.surface.resize(cols, rows);
        self.viewport.resize(cols * 2, rows * 4);
    }

    /// Render the current snapshot into the braille layers for an inner
    /// area of `cols x rows` characters
    pub fn render_map(&mut self, cols: usize, rows: usize) {
        self.surface.resize(cols, rows);
        self.viewport.resize(cols * 2, rows * 4);
        self.last_frame = self
            .renderer
            .render(&self.viewport, self.timeline.current(), &mut self.surface);
    }

    /// Pan the map by key steps (positive x looks east, positive y south)
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.pan_pixels(dx as f64 * PAN_STEP, dy as f64 * PAN_STEP);
    }

    fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let transform = *self.renderer.transform();
        self.viewport.pan_pixels(&transform, dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in keeping the location under the cursor fixed
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        self.zoom_at(col, row, Viewport::zoom_in);
    }

    /// Zoom out keeping the location under the cursor fixed
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        self.zoom_at(col, row, Viewport::zoom_out);
    }

    fn zoom_at(&mut self, col: u16, row: u16, step: fn(&mut Viewport)) {
        let transform = *self.renderer.transform();
        let (px, py) = cell_to_pixel(col, row);
        let (lon, lat) = self.viewport.unproject(&transform, px, py);
        step(&mut self.viewport);
        let moved = self.viewport.project(&transform, lon, lat);
        self.viewport.pan_pixels(&transform, moved.x - px, moved.y - py);
    }

    /// Drag the map with the mouse: content follows the pointer
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (last_x as f64 - x as f64) * 2.0;
            let dy = (last_y as f64 - y as f64) * 4.0;
            self.pan_pixels(dx, dy);
        }
        self.last_mouse = Some((x, y));
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn next_snapshot(&mut self) {
        self.timeline.step_forward();
    }

    pub fn previous_snapshot(&mut self) {
        self.timeline.step_back();
    }

    /// Return to the configured home view; the snapshot is kept
    pub fn reset(&mut self) {
        self.viewport.center_lon = self.home.center_lon;
        self.viewport.center_lat = self.home.center_lat;
        self.viewport.zoom = clamp_zoom(self.home.zoom);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn date_label(&self) -> String {
        format_date(self.timeline.current_date())
    }

    /// `2/3` style position in the timeline
    pub fn snapshot_position(&self) -> String {
        format!("{}/{}", self.timeline.index() + 1, self.timeline.count())
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{} ({}x)", self.viewport.zoom, 1 << -self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    pub fn label_count(&self) -> String {
        format!("{}/{} labels", self.last_frame.labels_placed, self.last_frame.places_considered)
    }
}
