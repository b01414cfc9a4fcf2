//! Overlay rendering (error notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

const KEYBINDINGS: &[(&str, &str)] = &[
    ("", "── Navigation ──"),
    ("Tab / Shift+Tab", "Switch library / tracks"),
    ("↑ / ↓", "Move selection"),
    ("Enter", "Open entry / Play track"),
    ("Backspace / Esc", "Back to library"),
    ("U", "Show queue"),
    ("", ""),
    ("", "── Playback ──"),
    ("Space", "Play / Pause"),
    ("N", "Next track"),
    ("P", "Previous track"),
    ("S", "Toggle shuffle"),
    ("R", "Cycle repeat (off → all → one)"),
    ("", ""),
    ("", "── General ──"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(ref error_msg) = ui_state.error_message else {
        return;
    };
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

    let error_line_count = error_msg.chars().count().div_ceil(inner_width).max(1) as u16;

    // Height: top border (1) + error lines + bottom border (1)
    let popup_height = (2 + error_line_count).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error_msg.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(error_widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();
    let popup_height = (KEYBINDINGS.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, 58, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = KEYBINDINGS
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
