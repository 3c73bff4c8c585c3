use super::theme;
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const SPARKLE_CHARS: &[char] = &['.', '+', '*', '+', '.', ' '];

/// Title block plus the "View" menu line with the starfield controls.
pub fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let tick = app.tick as usize;

    // Sparkle animation: cycle through characters at different phases
    let left_sparkle = SPARKLE_CHARS[tick / 4 % SPARKLE_CHARS.len()];
    let right_sparkle = SPARKLE_CHARS[(tick / 4 + 3) % SPARKLE_CHARS.len()];

    let starfield_state = if app.starfield.is_enabled() { "on" } else { "off" };

    let lines = vec![
        Line::from(vec![
            Span::styled("  TRANSLATION DESK", theme::eyebrow_style()),
        ]),
        Line::from(vec![Span::styled(
            format!("  {} D e e p P a r s e r {}", left_sparkle, right_sparkle),
            theme::title_style(),
        )]),
        Line::from(vec![
            Span::styled("  View ", theme::subtitle_style()),
            Span::styled("[F2]", theme::key_hint_style()),
            Span::styled(
                format!(" Starfield: {}  ", starfield_state),
                theme::footer_style(),
            ),
            Span::styled("[F5/F6]", theme::key_hint_style()),
            Span::styled(
                format!(" Speed {:.2}  ", app.starfield.speed()),
                theme::footer_style(),
            ),
            Span::styled("[F1]", theme::key_hint_style()),
            Span::styled(" Help", theme::footer_style()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
