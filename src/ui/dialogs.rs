use super::theme;
use crate::app::App;
use crate::types::DialogKind;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Draw the currently active modal dialog overlay.
pub fn draw_dialog(f: &mut Frame, area: Rect, app: &App) {
    let dialog = match &app.dialog {
        Some(d) => d,
        None => return,
    };

    match dialog {
        DialogKind::ExportPath { value } => {
            draw_export_path(f, area, value);
        }
        DialogKind::Help => {
            draw_help(f, area);
        }
    }
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Line::from(vec![Span::styled(
            title,
            theme::panel_title_style(),
        )]))
        .borders(Borders::ALL)
        .border_style(theme::border_style(true))
        .style(Style::default().bg(theme::SURFACE))
}

fn draw_export_path(f: &mut Frame, area: Rect, value: &str) {
    let popup = centered_rect(60, 7, area);
    f.render_widget(Clear, popup);

    let block = dialog_block(" Export Chapter (file path) ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(theme::ACCENT_WARM)),
            Span::styled(value, Style::default().fg(theme::TEXT)),
            Span::styled("█", Style::default().fg(theme::ACCENT)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Enter]", theme::key_hint_style()),
            Span::styled(" Export  ", theme::footer_style()),
            Span::styled("[Esc]", theme::key_hint_style()),
            Span::styled(" Cancel", theme::footer_style()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(65, 21, area);
    f.render_widget(Clear, popup);

    let block = dialog_block(" Help - DeepParser ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let hl = theme::key_hint_style();
    let nl = Style::default().fg(theme::TEXT);
    let dim = Style::default().fg(theme::TEXT_DIM);

    let lines = vec![
        Line::from(""),
        section("  GLOBAL"),
        Line::from(vec![
            Span::styled("  Tab / Shift+Tab", hl),
            Span::styled("  Move focus", nl),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+Q", hl),
            Span::styled("            Quit (q outside text fields)", nl),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+E", hl),
            Span::styled("            Export translation", nl),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+Y", hl),
            Span::styled("            Copy translation", nl),
        ]),
        Line::from(""),
        section("  VIEW"),
        Line::from(vec![
            Span::styled("  F2", hl),
            Span::styled("                Toggle starfield", nl),
        ]),
        Line::from(vec![
            Span::styled("  F5 / F6", hl),
            Span::styled("           Slower / faster stars", nl),
        ]),
        Line::from(""),
        section("  TOOLBAR"),
        Line::from(vec![
            Span::styled("  ←/→", hl),
            Span::styled("               Move between buttons", nl),
        ]),
        Line::from(vec![
            Span::styled("  Enter", hl),
            Span::styled("             Activate / cycle model", nl),
        ]),
        Line::from(vec![
            Span::styled("  m", hl),
            Span::styled("                 Export to a typed path", nl),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", dim)),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_dialog(f, area, app);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn export_dialog_shows_typed_path() {
        let mut app = App::with_config(Config::default(), None);
        app.dialog = Some(DialogKind::ExportPath { value: "out/ch1.docx".into() });
        let text = screen_text(&app);
        assert!(text.contains("Export Chapter"));
        assert!(text.contains("> out/ch1.docx"));
    }

    #[test]
    fn help_lists_starfield_toggle() {
        let mut app = App::with_config(Config::default(), None);
        app.open_help();
        assert!(screen_text(&app).contains("Toggle starfield"));
    }

    #[test]
    fn no_dialog_draws_nothing() {
        let app = App::with_config(Config::default(), None);
        assert!(screen_text(&app).trim().is_empty());
    }
}
