use ratatui::style::{Color, Modifier, Style};

// ── Base palette ────────────────────────────────────────────────
pub const SURFACE: Color = Color::Rgb(18, 18, 18);
pub const SURFACE_ALT: Color = Color::Rgb(24, 24, 24);
pub const BORDER: Color = Color::Rgb(50, 50, 50);
pub const BORDER_FOCUS: Color = Color::Rgb(140, 140, 140);

pub const TEXT: Color = Color::Rgb(235, 235, 235);
pub const TEXT_DIM: Color = Color::Rgb(130, 130, 130);
pub const ACCENT: Color = Color::Rgb(235, 235, 235);
pub const ACCENT_WARM: Color = Color::Rgb(235, 235, 235);

pub const SUCCESS: Color = Color::Rgb(0, 255, 0);

// ── Composite styles ────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn eyebrow_style() -> Style {
    Style::default().fg(ACCENT_WARM)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn panel_title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn key_hint_style() -> Style {
    Style::default()
        .fg(ACCENT_WARM)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().fg(TEXT).bg(Color::Rgb(40, 40, 45))
}

pub fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(SURFACE)
            .bg(TEXT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).bg(SURFACE_ALT)
    }
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(TEXT_DIM)
        .add_modifier(Modifier::ITALIC)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn footer_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn flash_style() -> Style {
    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
}
