mod app;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use app::App;
use chronomap::data::{self, DirTileStore};
use chronomap::map::MapRenderer;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log file path; the terminal owns stdout, so logging is off unless set
const LOG_ENV: &str = "CHRONOMAP_LOG";

fn main() -> Result<()> {
    init_logging()?;

    let data_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let app = load_app(&data_dir)?;

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, app);

    // Restore the terminal even when the loop failed
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", Path::new(&path).display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load the atlas and build the renderer before the terminal is taken over,
/// so configuration errors print normally
fn load_app(data_dir: &Path) -> Result<App> {
    let (config, timeline) =
        data::load_atlas(data_dir).with_context(|| format!("loading atlas from {}", data_dir.display()))?;
    let transform = config.transform.build().context("invalid transform in atlas manifest")?;
    let store = DirTileStore::new(data_dir.join(&config.tiles.dir));
    info!(
        tiles = %store.dir().display(),
        snapshots = timeline.count(),
        density = config.density,
        "atlas ready"
    );
    let renderer = MapRenderer::new(transform, config.tiles.grid(), store, config.density);

    let (width, height) = crossterm::terminal::size().context("reading terminal size")?;
    Ok(App::new(width as usize, height as usize, renderer, timeline, config.view))
}

/// Drag pans, the wheel zooms about the pointer
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-2, 0),
        MouseEventKind::ScrollRight => app.pan(2, 0),
        MouseEventKind::Down(MouseButton::Left) => app.last_mouse = Some((mouse.column, mouse.row)),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

/// Apply one key press; unbound keys are ignored
fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        KeyCode::Left | KeyCode::Char('h') => app.pan(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 1),

        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

        KeyCode::Char('n') | KeyCode::Char(']') => app.next_snapshot(),
        KeyCode::Char('p') | KeyCode::Char('[') => app.previous_snapshot(),

        KeyCode::Char('r') | KeyCode::Char('0') => app.reset(),

        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Input only changes state between frames
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key.code),
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            Event::Resize(width, height) => app.resize(width as usize, height as usize),
            _ => {}
        }
    }
    Ok(())
}
