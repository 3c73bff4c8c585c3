use super::{editors, theme};
use crate::app::App;
use crate::types::{FocusItem, FocusPanel};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

const CHAPTER_LABEL: &str = "Chapter: ";

struct ToolbarAreas {
    prev: Rect,
    next: Rect,
    chapter: Rect,
    model: Rect,
    progress: Rect,
    progress_label: Rect,
    export: Rect,
}

fn toolbar_layout(inner: Rect) -> ToolbarAreas {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),  // prev
            Constraint::Length(9),  // next
            Constraint::Length(30), // chapter box
            Constraint::Length(14), // model dropdown
            Constraint::Min(10),    // progress
            Constraint::Length(7),  // 0/0
            Constraint::Length(16), // export
        ])
        .split(inner);
    ToolbarAreas {
        prev: cols[0],
        next: cols[1],
        chapter: cols[2],
        model: cols[3],
        progress: cols[4],
        progress_label: cols[5],
        export: cols[6],
    }
}

fn toolbar_block(focused: bool) -> Block<'static> {
    Block::default()
        .title(Line::from(vec![Span::styled(
            " NAVIGATION ",
            theme::panel_title_style(),
        )]))
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
        .style(Style::default().bg(theme::SURFACE))
}

pub fn draw_toolbar(f: &mut Frame, area: Rect, app: &App) {
    let block = toolbar_block(app.focused_panel() == FocusPanel::Toolbar);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let areas = toolbar_layout(inner);

    draw_button(f, areas.prev, "Prev", app.focus == FocusItem::PrevChapter);
    draw_button(f, areas.next, "Next", app.focus == FocusItem::NextChapter);

    // Editable chapter box
    let chapter_focused = app.focus == FocusItem::ChapterBox;
    let label_style = if chapter_focused {
        theme::key_hint_style()
    } else {
        theme::footer_style()
    };
    let chapter_cols = chapter_columns(areas.chapter);
    f.render_widget(
        Paragraph::new(Span::styled(CHAPTER_LABEL, label_style)),
        chapter_cols[0],
    );
    f.render_widget(
        editors::EditorField {
            input: &app.chapter,
            placeholder: "select chapter",
            focused: chapter_focused,
        },
        chapter_cols[1],
    );

    // Model dropdown
    let model_focused = app.focus == FocusItem::ModelBox;
    let model_style = if model_focused {
        theme::selected_style()
    } else {
        Style::default().fg(theme::TEXT)
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {} ▾ ", app.config.model), model_style)),
        areas.model,
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::TEXT_DIM).bg(theme::SURFACE_ALT))
        .percent(app.progress.min(100));
    f.render_widget(gauge, areas.progress);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", app.progress_label()),
            theme::footer_style(),
        )),
        areas.progress_label,
    );

    draw_button(f, areas.export, "Export DOCX", app.focus == FocusItem::Export);
}

fn draw_button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
    let text = if focused {
        format!(" > {} ", label)
    } else {
        format!("  {}  ", label)
    };
    f.render_widget(
        Paragraph::new(Span::styled(text, theme::button_style(focused))),
        area,
    );
}

fn chapter_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CHAPTER_LABEL.len() as u16),
            Constraint::Min(1),
        ])
        .split(area)
}

/// Cursor for the chapter box when it has focus.
pub fn cursor_position(area: Rect, app: &App) -> Option<Position> {
    if app.focus != FocusItem::ChapterBox {
        return None;
    }
    let inner = toolbar_block(true).inner(area);
    let field = chapter_columns(toolbar_layout(inner).chapter)[1];
    if field.width == 0 || field.height == 0 {
        return None;
    }
    Some(editors::input_cursor(&app.chapter, field))
}
