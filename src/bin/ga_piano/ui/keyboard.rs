//! One octave of keys, lit while a note is sounding.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::piano::{Piano, KEY_NAMES, NUM_KEYS};

/// Computer keys that play each piano key, left to right.
pub const KEY_BINDINGS: [char; NUM_KEYS] = [
    'a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k',
];

pub fn key_for_char(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    KEY_BINDINGS.iter().position(|&binding| binding == c)
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, lit: &[bool; NUM_KEYS]) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, NUM_KEYS as u32); NUM_KEYS])
        .split(inner);

    for (key, column) in columns.iter().enumerate() {
        let black = Piano::is_black_key(key);
        let style = match (lit[key], black) {
            (true, _) => Style::default().fg(Color::Black).bg(Color::Yellow),
            (false, true) => Style::default().fg(Color::White).bg(Color::DarkGray),
            (false, false) => Style::default().fg(Color::Black).bg(Color::White),
        };

        let lines = vec![
            Line::from(Span::styled(
                KEY_NAMES[key],
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(KEY_BINDINGS[key].to_string(), style)),
        ];
        frame.render_widget(Paragraph::new(lines).style(style), *column);
    }
}
