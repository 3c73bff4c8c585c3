use crate::starfield::Starfield;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const STAR_CHAR: char = '·';

impl Starfield {
    /// Wrap `child` so it renders on top of this starfield, filling the
    /// same area. The child is only borrowed for a single render.
    pub fn backdrop<W: Widget>(&self, child: W) -> Backdrop<'_, W> {
        Backdrop { field: self, child }
    }
}

/// The particle layer, drawn only while the effect is enabled.
impl Widget for &Starfield {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_enabled() || area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, Style::default().bg(Color::Black));

        for star in self.stars() {
            // Stars can sit on the bottom edge or drift above the top.
            if star.x < 0.0 || star.y < 0.0 {
                continue;
            }
            let col = star.x as u16;
            let row = star.y as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            let cell = &mut buf[(area.x + col, area.y + row)];
            cell.set_char(STAR_CHAR);
            cell.set_style(Style::default().fg(Color::White).bg(Color::Black));
        }
    }
}

/// A child surface laid out over the starfield.
pub struct Backdrop<'a, W> {
    field: &'a Starfield,
    child: W,
}

impl<W: Widget> Widget for Backdrop<'_, W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.field.render(area, buf);
        self.child.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::Star;
    use ratatui::widgets::Paragraph;

    fn render(field: &Starfield, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf);
        buf
    }

    fn field_with(stars: Vec<Star>, width: u16, height: u16) -> Starfield {
        let mut field = Starfield::with_seed(3);
        field.resize(width, height);
        field.enable(true);
        field.replace_stars(stars);
        field
    }

    #[test]
    fn disabled_field_draws_nothing() {
        let area = Rect::new(0, 0, 8, 4);
        let field = Starfield::with_seed(3);
        assert_eq!(render(&field, area), Buffer::empty(area));
    }

    #[test]
    fn enabled_field_fills_black_and_plots_stars() {
        let area = Rect::new(0, 0, 8, 4);
        let field = field_with(vec![Star { x: 2.7, y: 1.2 }], 8, 4);
        let buf = render(&field, area);

        let star = &buf[(2, 1)];
        assert_eq!(star.symbol(), "·");
        assert_eq!(star.fg, Color::White);

        let empty = &buf[(0, 0)];
        assert_eq!(empty.symbol(), " ");
        assert_eq!(empty.bg, Color::Black);
    }

    #[test]
    fn stars_are_offset_by_area_origin() {
        let area = Rect::new(3, 2, 5, 5);
        let field = field_with(vec![Star { x: 0.0, y: 0.0 }], 5, 5);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        field.render(area, &mut buf);
        assert_eq!(buf[(3, 2)].symbol(), "·");
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }

    #[test]
    fn out_of_area_stars_are_skipped() {
        let area = Rect::new(0, 0, 4, 4);
        let field = field_with(
            vec![Star { x: 1.0, y: 4.0 }, Star { x: 1.0, y: -0.5 }, Star { x: 9.0, y: 1.0 }],
            4,
            4,
        );
        let buf = render(&field, area);
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(buf[(x, y)].symbol(), " ");
            }
        }
    }

    #[test]
    fn child_renders_over_particle_layer() {
        let area = Rect::new(0, 0, 6, 2);
        let field = field_with(vec![Star { x: 0.0, y: 0.0 }, Star { x: 4.0, y: 1.0 }], 6, 2);
        let mut buf = Buffer::empty(area);
        field.backdrop(Paragraph::new("hi")).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "h");
        assert_eq!(buf[(1, 0)].symbol(), "i");
        assert_eq!(buf[(4, 1)].symbol(), "·");
    }

    #[test]
    fn disabled_backdrop_still_renders_child() {
        let area = Rect::new(0, 0, 6, 1);
        let field = Starfield::with_seed(3);
        let mut buf = Buffer::empty(area);
        field.backdrop(Paragraph::new("ok")).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "o");
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }
}
