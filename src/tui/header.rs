//! Static banner shown above the board.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::colors::BANNER_BLUE;

pub const TITLE: &str = "Todo List";
pub const SUBTITLE: &str = "Manage your tasks efficiently";

/// Rows the header occupies, borders included.
pub const HEADER_HEIGHT: u16 = 4;

/// Fixed title and subtitle. No state.
pub struct Header;

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().bg(BANNER_BLUE).fg(Color::White);
        let text = vec![
            Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(SUBTITLE),
        ];
        Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::BOTTOM).style(style))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_renders_title_and_subtitle() {
        let area = Rect::new(0, 0, 40, HEADER_HEIGHT);
        let mut buf = Buffer::empty(area);
        Header.render(area, &mut buf);
        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        assert!(rows[0].contains(TITLE));
        assert!(rows[1].contains(SUBTITLE));
    }
}
