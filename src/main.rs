mod app;
mod config;
mod editor;
mod error;
mod export;
mod input;
mod starfield;
mod types;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TICK_RATE: Duration = Duration::from_millis(33); // ~30 fps

/// `<data_local_dir>/deepparser/deepparser.log`
fn log_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("deepparser").join("deepparser.log")
}

/// Log to a file; stdout belongs to the alternate screen.
fn init_tracing() -> Result<()> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deepparser=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = init_tracing() {
        eprintln!("Logging disabled: {}", e);
    }
    info!("Starting DeepParser");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "exited with error");
        eprintln!("Error: {}", e);
    }
    info!("DeepParser closed");

    Ok(())
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new();
    let size = terminal.size()?;
    app.resize_surface(ui::layout::split(Rect::new(0, 0, size.width, size.height)).central);
    let mut last_tick = Instant::now();

    loop {
        app.poll_export();
        app.poll_starfield(Instant::now());

        if app.take_redraw() {
            terminal.draw(|f| ui::draw(f, &app))?;
        }

        // Poll for events until the nearest frame or starfield deadline
        let now = Instant::now();
        let mut timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if let Some(until_star_tick) = app.starfield.time_until_tick(now) {
            timeout = timeout.min(until_star_tick);
        }
        if app.export_rx.is_some() {
            timeout = timeout.min(Duration::from_millis(5));
        }

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release/repeat
                    if key.kind == KeyEventKind::Press {
                        // Ctrl+C always quits
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            app.should_quit = true;
                        }

                        input::handle_key(&mut app, key);
                    }
                }
                Event::Resize(width, height) => {
                    let areas = ui::layout::split(Rect::new(0, 0, width, height));
                    app.resize_surface(areas.central);
                    app.request_redraw();
                }
                _ => {}
            }
        }

        // Tick update
        if last_tick.elapsed() >= TICK_RATE {
            app.on_frame_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
