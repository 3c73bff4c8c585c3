use crate::config;
use crate::editor::TextInput;
use crate::export::{self, ExportOutcome};
use crate::starfield::Starfield;
use crate::types::*;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Step applied by the speed shortcuts.
pub const SPEED_STEP: f64 = 0.25;

/// Frame ticks a flash message stays in the status bar (~2 s).
const FLASH_TICKS: u64 = 60;

/// Top-level application state.
pub struct App {
    pub config: Config,
    config_path: Option<PathBuf>,
    pub focus: FocusItem,
    pub starfield: Starfield,
    /// Bounds of the central surface the starfield decorates.
    pub surface: Rect,
    pub chapter: TextInput,
    pub translation_title: TextInput,
    /// Source text of the loaded chapter; stays empty until chapter loading exists.
    pub original: String,
    pub original_scroll: u16,
    pub translation: TextInput,
    pub mini_prompt: TextInput,
    // Chapter progress: left at zero while Prev/Next are inert.
    pub progress: u16,
    pub chapters_done: usize,
    pub chapters_total: usize,
    pub dialog: Option<DialogKind>,
    pub should_quit: bool,
    pub tick: u64,
    pub export_rx: Option<mpsc::UnboundedReceiver<ExportOutcome>>,
    /// Brief status message shown in the status bar, auto-clears.
    pub flash_message: Option<String>,
    pub flash_until: u64,
    redraw: bool,
}

impl App {
    pub fn new() -> Self {
        let path = config::config_path();
        let cfg = config::load_config(&path);
        info!(path = %path.display(), "settings loaded");
        Self::with_config(cfg, Some(path))
    }

    /// State built from `config`. Settings are only written back when
    /// `config_path` is set.
    pub fn with_config(config: Config, config_path: Option<PathBuf>) -> Self {
        let mut starfield = Starfield::new();
        starfield.set_speed(config.starfield_speed);
        if config.starfield_enabled {
            starfield.enable(true);
        }
        Self {
            config,
            config_path,
            focus: FocusItem::TranslationText,
            starfield,
            surface: Rect::default(),
            chapter: TextInput::single_line(),
            translation_title: TextInput::single_line(),
            original: String::new(),
            original_scroll: 0,
            translation: TextInput::multi_line(),
            mini_prompt: TextInput::single_line(),
            progress: 0,
            chapters_done: 0,
            chapters_total: 0,
            dialog: None,
            should_quit: false,
            tick: 0,
            export_rx: None,
            flash_message: None,
            flash_until: 0,
            redraw: true,
        }
    }

    pub fn focused_panel(&self) -> FocusPanel {
        self.focus.panel()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The text field that currently receives typed characters, if any.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FocusItem::ChapterBox => Some(&mut self.chapter),
            FocusItem::TranslationTitle => Some(&mut self.translation_title),
            FocusItem::TranslationText => Some(&mut self.translation),
            FocusItem::MiniPrompt => Some(&mut self.mini_prompt),
            _ => None,
        }
    }

    pub fn focused_input(&self) -> Option<&TextInput> {
        match self.focus {
            FocusItem::ChapterBox => Some(&self.chapter),
            FocusItem::TranslationTitle => Some(&self.translation_title),
            FocusItem::TranslationText => Some(&self.translation),
            FocusItem::MiniPrompt => Some(&self.mini_prompt),
            _ => None,
        }
    }

    // ── Starfield ───────────────────────────────────────────────

    pub fn toggle_starfield(&mut self) {
        self.set_starfield(!self.starfield.is_enabled());
    }

    pub fn set_starfield(&mut self, on: bool) {
        self.starfield.enable(on);
        self.config.starfield_enabled = on;
        self.save_config();
        self.flash(if on { "Starfield on" } else { "Starfield off" });
    }

    /// Nudge the starfield speed. Negative speeds are allowed.
    pub fn adjust_speed(&mut self, delta: f64) {
        let speed = ((self.starfield.speed() + delta) * 100.0).round() / 100.0;
        self.starfield.set_speed(speed);
        self.config.starfield_speed = speed;
        self.save_config();
        self.flash(format!("Starfield speed: {:.2}", speed));
    }

    /// The central surface got new bounds from the layout.
    pub fn resize_surface(&mut self, area: Rect) {
        if area.width == self.surface.width && area.height == self.surface.height {
            self.surface = area;
            return;
        }
        debug!(width = area.width, height = area.height, "surface resized");
        self.surface = area;
        self.starfield.resize(area.width, area.height);
        self.redraw = true;
    }

    /// Advance the starfield if its ticker is due.
    pub fn poll_starfield(&mut self, now: Instant) {
        self.starfield.poll(now);
    }

    // ── Frame bookkeeping ───────────────────────────────────────

    /// Called once per frame tick (33 ms).
    pub fn on_frame_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        // header sparkle advances every 4 ticks
        if self.tick % 4 == 0 {
            self.redraw = true;
        }
        if self.flash_message.is_some() && self.tick >= self.flash_until {
            self.flash_message = None;
            self.redraw = true;
        }
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Consume pending redraw requests from the app and the starfield.
    pub fn take_redraw(&mut self) -> bool {
        let field = self.starfield.take_redraw_request();
        std::mem::take(&mut self.redraw) || field
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some(message.into());
        self.flash_until = self.tick + FLASH_TICKS;
        self.redraw = true;
    }

    pub fn status_message(&self) -> &str {
        match &self.flash_message {
            Some(msg) if self.tick < self.flash_until => msg.as_str(),
            _ if self.export_rx.is_some() => "Exporting...",
            _ => "Ready",
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.chapters_done, self.chapters_total)
    }

    // ── Toolbar ─────────────────────────────────────────────────

    pub fn prev_chapter(&mut self) {
        self.flash("No chapters loaded.");
    }

    pub fn next_chapter(&mut self) {
        self.flash("No chapters loaded.");
    }

    pub fn cycle_model(&mut self, forward: bool) {
        let model = if forward {
            self.config.model.next()
        } else {
            self.config.model.prev()
        };
        self.config.model = model;
        self.save_config();
        self.flash(format!("Model: {}", model));
    }

    pub fn scroll_original(&mut self, down: bool) {
        self.original_scroll = if down {
            let max = self.original.lines().count().saturating_sub(1) as u16;
            self.original_scroll.saturating_add(1).min(max)
        } else {
            self.original_scroll.saturating_sub(1)
        };
    }

    // ── Export ──────────────────────────────────────────────────

    /// Export through the native save dialog, or the manual path prompt
    /// when no desktop session is available.
    pub fn start_export(&mut self) {
        if self.translation.is_empty() {
            self.flash("Nothing to export.");
            return;
        }
        if !native_dialogs_available() {
            self.open_export_path_dialog();
            return;
        }
        match export::pick_export_path(self.config.last_export_dir.as_deref()) {
            Some(path) => self.export_to(path),
            None => debug!("export dialog cancelled"),
        }
    }

    pub fn export_to(&mut self, path: PathBuf) {
        if self.export_rx.is_some() {
            self.flash("An export is already running.");
            return;
        }
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.config.last_export_dir = Some(dir.to_string_lossy().to_string());
            self.save_config();
        }
        let (tx, rx) = mpsc::unbounded_channel();
        match export::spawn_export(self.translation.text().to_string(), path, tx) {
            Ok(()) => self.export_rx = Some(rx),
            Err(e) => self.flash(e.to_string()),
        }
    }

    /// Called every loop iteration to pick up a finished export.
    pub fn poll_export(&mut self) {
        let Some(rx) = &mut self.export_rx else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::error::TryRecvError::Empty) => return,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.export_rx = None;
                self.redraw = true;
                return;
            }
        };
        self.export_rx = None;
        match outcome.result {
            Ok(_) => self.flash(format!("Exported to {}", outcome.path.display())),
            Err(e) => self.flash(e.to_string()),
        }
    }

    pub fn copy_translation(&mut self) {
        if self.translation.is_empty() {
            self.flash("Nothing to copy.");
            return;
        }
        let text = self.translation.text().to_string();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(_) => self.flash("Copied to clipboard!"),
            Err(e) => self.flash(format!("Copy failed: {}", e)),
        }
    }

    // ── Dialogs ─────────────────────────────────────────────────

    pub fn open_export_path_dialog(&mut self) {
        let value = self
            .config
            .last_export_dir
            .as_ref()
            .map(|dir| {
                PathBuf::from(dir)
                    .join(export::DEFAULT_FILE_NAME)
                    .to_string_lossy()
                    .to_string()
            })
            .unwrap_or_else(|| export::DEFAULT_FILE_NAME.to_string());
        self.dialog = Some(DialogKind::ExportPath { value });
    }

    pub fn open_help(&mut self) {
        self.dialog = Some(DialogKind::Help);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn confirm_dialog(&mut self) {
        let dialog = match self.dialog.take() {
            Some(d) => d,
            None => return,
        };
        match dialog {
            DialogKind::ExportPath { value } => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    self.export_to(PathBuf::from(trimmed));
                }
            }
            DialogKind::Help => {}
        }
    }

    pub fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = config::save_config(path, &self.config) {
            warn!(error = %e, "could not save settings");
            self.flash(format!("Could not save settings: {}", e));
        }
    }
}

/// Whether a native file dialog can be shown in this session.
fn native_dialogs_available() -> bool {
    if cfg!(any(windows, target_os = "macos")) {
        return true;
    }
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}
