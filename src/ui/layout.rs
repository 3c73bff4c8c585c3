use super::{editors, header, theme, toolbar};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const ACTIVE_LABEL: &str = "Active: none ";

/// Screen regions: header | toolbar | central surface | status bar.
pub struct Areas {
    pub header: Rect,
    pub toolbar: Rect,
    pub central: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> Areas {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // toolbar
            Constraint::Min(6),    // central surface
            Constraint::Length(1), // status bar
        ])
        .split(area);
    Areas {
        header: vert[0],
        toolbar: vert[1],
        central: vert[2],
        status: vert[3],
    }
}

/// Draws the whole window and places the terminal cursor on the focused input.
pub fn draw_layout(f: &mut Frame, area: Rect, app: &App) {
    let areas = split(area);

    header::draw_header(f, areas.header, app);
    toolbar::draw_toolbar(f, areas.toolbar, app);

    // The central panes sit on top of the starfield.
    f.render_widget(
        app.starfield.backdrop(editors::CentralPanes { app }),
        areas.central,
    );

    draw_status_bar(f, areas.status, app);

    if app.dialog.is_none() {
        let cursor = toolbar::cursor_position(areas.toolbar, app)
            .or_else(|| editors::cursor_position(areas.central, app));
        if let Some(pos) = cursor {
            f.set_cursor_position(pos);
        }
    }
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ACTIVE_LABEL.len() as u16),
        ])
        .split(area);

    let flashing = app.flash_message.is_some() && app.tick < app.flash_until;
    let style = if flashing {
        theme::flash_style()
    } else {
        theme::footer_style()
    };
    let message = Line::from(vec![
        Span::styled(format!(" {} ", app.status_message()), style),
        Span::styled("  [Tab]", theme::key_hint_style()),
        Span::styled(" Focus  ", theme::footer_style()),
        Span::styled("[^E]", theme::key_hint_style()),
        Span::styled(" Export  ", theme::footer_style()),
        Span::styled("[^Q]", theme::key_hint_style()),
        Span::styled(" Quit", theme::footer_style()),
    ]);
    f.render_widget(Paragraph::new(message), cols[0]);
    f.render_widget(
        Paragraph::new(Span::styled(ACTIVE_LABEL, theme::subtitle_style()))
            .alignment(Alignment::Right),
        cols[1],
    );
}
