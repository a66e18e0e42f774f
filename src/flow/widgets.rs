//! Shared layout pieces for the screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tictoe_engine::Mark;

/// Bold cyan title in a bordered block.
pub fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(bold(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Dimmed key help in a bordered block.
pub fn help(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Bold foreground colour.
pub fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Colour used for a mark everywhere it is drawn.
pub fn mark_style(mark: Mark) -> Style {
    match mark {
        Mark::X => bold(Color::Red),
        Mark::O => bold(Color::Magenta),
    }
}

/// Three-row page: title, body, help.
pub fn page(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Rectangle of `width` x `height` centered in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
