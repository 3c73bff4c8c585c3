pub mod dialogs;
pub mod editors;
pub mod header;
pub mod layout;
pub mod starfield;
pub mod theme;
pub mod toolbar;

use crate::app::App;
use ratatui::Frame;

/// Master render function: draws the window (starfield behind the central
/// panes), then the modal overlay.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    layout::draw_layout(f, area, app);

    if app.dialog.is_some() {
        dialogs::draw_dialog(f, area, app);
    }
}
