use super::theme;
use crate::app::App;
use crate::editor::TextInput;
use crate::types::FocusItem;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Sub-areas of the central surface.
pub struct CentralAreas {
    pub original_title: Rect,
    pub translation_title: Rect,
    pub original: Rect,
    pub translation: Rect,
    pub prompt: Rect,
}

pub fn central_layout(area: Rect) -> CentralAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titles
            Constraint::Min(3),    // editors
            Constraint::Length(3), // mini prompt
        ])
        .split(area);
    let titles = halves(rows[0]);
    let editors = halves(rows[1]);
    CentralAreas {
        original_title: titles[0],
        translation_title: titles[1],
        original: editors[0],
        translation: editors[1],
        prompt: rows[2],
    }
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Title row, the two editors and the mini prompt. Leaves untouched cells
/// transparent so the starfield shows through.
pub struct CentralPanes<'a> {
    pub app: &'a App,
}

impl Widget for CentralPanes<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        let areas = central_layout(area);

        Paragraph::new(Line::from(Span::styled(
            " Original Title",
            theme::panel_title_style(),
        )))
        .render(areas.original_title, buf);
        EditorField {
            input: &app.translation_title,
            placeholder: "Translation title",
            focused: app.focus == FocusItem::TranslationTitle,
        }
        .render(areas.translation_title, buf);

        let original = pane_block(" ORIGINAL ", app.focus == FocusItem::OriginalText);
        let inner = original.inner(areas.original);
        original.render(areas.original, buf);
        if app.original.is_empty() {
            Paragraph::new(Span::styled(" No chapter loaded.", theme::placeholder_style()))
                .render(inner, buf);
        } else {
            Paragraph::new(app.original.as_str())
                .style(Style::default().fg(theme::TEXT))
                .scroll((app.original_scroll, 0))
                .render(inner, buf);
        }

        let translation = pane_block(" TRANSLATION ", app.focus == FocusItem::TranslationText);
        let inner = translation.inner(areas.translation);
        translation.render(areas.translation, buf);
        EditorField {
            input: &app.translation,
            placeholder: "Start translating...",
            focused: app.focus == FocusItem::TranslationText,
        }
        .render(inner, buf);

        let prompt = pane_block(" MINI PROMPT ", app.focus == FocusItem::MiniPrompt);
        let inner = prompt.inner(areas.prompt);
        prompt.render(areas.prompt, buf);
        EditorField {
            input: &app.mini_prompt,
            placeholder: "Mini prompt",
            focused: app.focus == FocusItem::MiniPrompt,
        }
        .render(inner, buf);
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(Line::from(Span::styled(title, theme::panel_title_style())))
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
}

/// An input's text, or its placeholder while empty and unfocused.
pub struct EditorField<'a> {
    pub input: &'a TextInput,
    pub placeholder: &'a str,
    pub focused: bool,
}

impl Widget for EditorField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.input.is_empty() {
            if !self.focused {
                Paragraph::new(Span::styled(self.placeholder, theme::placeholder_style()))
                    .render(area, buf);
            }
            return;
        }
        Paragraph::new(self.input.text())
            .style(Style::default().fg(theme::TEXT))
            .scroll(input_scroll(self.input, area))
            .render(area, buf);
    }
}

/// Scroll offset (rows, cols) that keeps the cursor inside `area`.
pub fn input_scroll(input: &TextInput, area: Rect) -> (u16, u16) {
    let (col, line) = input.cursor_position();
    let rows = line.saturating_sub(area.height.saturating_sub(1));
    let cols = col.saturating_sub(area.width.saturating_sub(1));
    (rows, cols)
}

/// Screen position of the cursor for `input` drawn in `area`.
pub fn input_cursor(input: &TextInput, area: Rect) -> Position {
    let (col, line) = input.cursor_position();
    let (rows, cols) = input_scroll(input, area);
    Position::new(area.x + col - cols, area.y + line - rows)
}

/// Cursor for the focused central input, if one is focused.
pub fn cursor_position(area: Rect, app: &App) -> Option<Position> {
    let areas = central_layout(area);
    let target = match app.focus {
        FocusItem::TranslationTitle => areas.translation_title,
        FocusItem::TranslationText => pane_block("", true).inner(areas.translation),
        FocusItem::MiniPrompt => pane_block("", true).inner(areas.prompt),
        _ => return None,
    };
    if target.width == 0 || target.height == 0 {
        return None;
    }
    app.focused_input().map(|input| input_cursor(input, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn panes_show_titles_and_placeholders() {
        let mut app = App::with_config(Config::default(), None);
        app.focus = FocusItem::OriginalText;
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        CentralPanes { app: &app }.render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Original Title"));
        assert!(row_text(&buf, 0).contains("Translation title"));
        assert!(row_text(&buf, 1).contains("ORIGINAL"));
        assert!(row_text(&buf, 1).contains("TRANSLATION"));
        assert!(row_text(&buf, 2).contains("No chapter loaded."));
        assert!(row_text(&buf, 8).contains("Mini prompt"));
    }

    #[test]
    fn cursor_tracks_translation_text() {
        let mut app = App::with_config(Config::default(), None);
        app.translation.set_text("ab\ncd");
        let area = Rect::new(0, 5, 60, 10);
        let areas = central_layout(area);
        let pos = cursor_position(area, &app).unwrap();
        assert_eq!(pos, Position::new(areas.translation.x + 1 + 2, areas.translation.y + 1 + 1));
    }

    #[test]
    fn long_input_scrolls_to_keep_cursor_visible() {
        let input = TextInput::single_line().with_text("abcdefghij");
        let area = Rect::new(0, 0, 4, 1);
        assert_eq!(input_scroll(&input, area), (0, 7));
        assert_eq!(input_cursor(&input, area), Position::new(3, 0));
    }
}
