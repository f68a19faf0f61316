use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Widget},
};

const BACKGROUND: Color = Color::Rgb(16, 18, 28);
const MAX_PANEL_WIDTH: u16 = 84;

/// Width the centered panel will take inside `area`
pub fn panel_width(area: Rect) -> u16 {
    MAX_PANEL_WIDTH.min(area.width)
}

/// Paint the full-viewport background and return the centered panel area.
pub fn render_shell(area: Rect, buf: &mut Buffer, panel_height: u16) -> Rect {
    Block::default()
        .style(Style::default().bg(BACKGROUND))
        .render(area, buf);

    centered(area, panel_width(area), panel_height)
}

/// A rect of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_panel_is_in_the_middle() {
        let area = Rect::new(0, 0, 100, 30);
        let panel = centered(area, 80, 10);

        assert_eq!(panel.width, 80);
        assert_eq!(panel.height, 10);
        assert_eq!(panel.x, 10);
        assert_eq!(panel.y, 10);
    }

    #[test]
    fn centered_panel_shrinks_to_fit() {
        let area = Rect::new(0, 0, 40, 8);
        let panel = centered(area, 80, 18);

        assert_eq!(panel, area);
    }

    #[test]
    fn panel_width_is_capped() {
        assert_eq!(panel_width(Rect::new(0, 0, 200, 10)), MAX_PANEL_WIDTH);
        assert_eq!(panel_width(Rect::new(0, 0, 40, 10)), 40);
    }

    #[test]
    fn shell_paints_background_everywhere() {
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);

        let panel = render_shell(area, &mut buf, 4);

        assert_eq!(panel, Rect::new(0, 1, 20, 4));
        assert_eq!(buf[(0, 0)].bg, BACKGROUND);
        assert_eq!(buf[(19, 5)].bg, BACKGROUND);
    }
}
