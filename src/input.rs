use crate::app::{App, SPEED_STEP};
use crate::types::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.request_redraw();

    // If a dialog is open, route input there
    if app.dialog.is_some() {
        handle_dialog_key(app, key);
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('e') => app.start_export(),
            KeyCode::Char('y') => app.copy_translation(),
            _ => {}
        }
        return;
    }

    // Global keys
    match key.code {
        KeyCode::F(1) => {
            app.open_help();
            return;
        }
        KeyCode::F(2) => {
            app.toggle_starfield();
            return;
        }
        KeyCode::F(5) => {
            app.adjust_speed(-SPEED_STEP);
            return;
        }
        KeyCode::F(6) => {
            app.adjust_speed(SPEED_STEP);
            return;
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.focus_prev();
            return;
        }
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    if app.focus.is_text_input() {
        handle_text_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.open_help();
            return;
        }
        // Horizontal navigation along the toolbar buttons.
        KeyCode::Right if app.focused_panel() == FocusPanel::Toolbar => {
            app.focus_next();
            return;
        }
        KeyCode::Left if app.focused_panel() == FocusPanel::Toolbar => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusItem::PrevChapter => {
            if key.code == KeyCode::Enter {
                app.prev_chapter();
            }
        }
        FocusItem::NextChapter => {
            if key.code == KeyCode::Enter {
                app.next_chapter();
            }
        }
        FocusItem::ModelBox => match key.code {
            KeyCode::Enter | KeyCode::Down => app.cycle_model(true),
            KeyCode::Up => app.cycle_model(false),
            _ => {}
        },
        FocusItem::Export => match key.code {
            KeyCode::Enter => app.start_export(),
            KeyCode::Char('m') => app.open_export_path_dialog(),
            _ => {}
        },
        FocusItem::OriginalText => match key.code {
            KeyCode::Down => app.scroll_original(true),
            KeyCode::Up => app.scroll_original(false),
            KeyCode::Left => app.focus_prev(),
            KeyCode::Right => app.focus_next(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    let multiline = app.focus == FocusItem::TranslationText;
    match key.code {
        KeyCode::Up if !multiline => app.focus_prev(),
        KeyCode::Down if !multiline => app.focus_next(),
        _ => {
            let Some(input) = app.focused_input_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char(c) => input.insert_char(c),
                KeyCode::Enter => input.insert_newline(),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_home(),
                KeyCode::End => input.move_end(),
                KeyCode::Up => input.move_up(),
                KeyCode::Down => input.move_down(),
                _ => {}
            }
        }
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match &app.dialog {
        Some(DialogKind::ExportPath { .. }) => handle_export_path_key(app, key),
        Some(DialogKind::Help) => {
            app.close_dialog();
        }
        None => {}
    }
}

fn handle_export_path_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.confirm_dialog(),
        KeyCode::Backspace => {
            if let Some(DialogKind::ExportPath { value }) = &mut app.dialog {
                value.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(DialogKind::ExportPath { value }) = &mut app.dialog {
                value.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn app() -> App {
        App::with_config(Config::default(), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_goes_to_translation_editor() {
        let mut app = app();
        type_str(&mut app, "quiet");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "?");
        assert_eq!(app.translation.text(), "quiet\n?");
        assert!(!app.should_quit);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn f2_toggles_starfield() {
        let mut app = app();
        app.resize_surface(Rect::new(0, 0, 20, 10));
        press(&mut app, KeyCode::F(2));
        assert!(app.starfield.is_enabled());
        press(&mut app, KeyCode::F(2));
        assert!(!app.starfield.is_enabled());
        assert!(app.starfield.stars().is_empty());
    }

    #[test]
    fn speed_keys_adjust_speed() {
        let mut app = app();
        press(&mut app, KeyCode::F(6));
        assert_eq!(app.starfield.speed(), 0.75);
        press(&mut app, KeyCode::F(5));
        press(&mut app, KeyCode::F(5));
        assert_eq!(app.starfield.speed(), 0.25);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusItem::MiniPrompt);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusItem::PrevChapter);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, FocusItem::MiniPrompt);
    }

    #[test]
    fn toolbar_arrows_move_between_buttons() {
        let mut app = app();
        app.focus = FocusItem::PrevChapter;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.focus, FocusItem::NextChapter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.focus, FocusItem::PrevChapter);
    }

    #[test]
    fn q_quits_only_outside_text_fields() {
        let mut app = app();
        app.focus = FocusItem::Export;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        app.focus = FocusItem::ChapterBox;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.chapter.text(), "q");
    }

    #[test]
    fn ctrl_q_quits_from_editor() {
        let mut app = app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.translation.is_empty());
    }

    #[test]
    fn model_box_cycles_on_enter() {
        let mut app = app();
        app.focus = FocusItem::ModelBox;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.model, Model::Qwen);
    }

    #[test]
    fn manual_export_dialog_edits_path() {
        let mut app = app();
        app.focus = FocusItem::Export;
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(
            app.dialog,
            Some(DialogKind::ExportPath { value: "chapter.docx".into() })
        );
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "x1");
        assert_eq!(
            app.dialog,
            Some(DialogKind::ExportPath { value: "chapter.docx1".into() })
        );
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.dialog, Some(DialogKind::Help));
        press(&mut app, KeyCode::Char('z'));
        assert!(app.dialog.is_none());
        assert!(app.translation.is_empty());
    }
}
