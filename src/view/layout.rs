//! Layout rendering (sidebar)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding},
    Frame,
};

use crate::model::{ActiveSection, ContentView, UiState};
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Library;
    let item_width = area.width.saturating_sub(4) as usize;
    let opened = match ui_state.content_view {
        ContentView::Library(index) => Some(index),
        ContentView::Queue => None,
    };

    let library_items: Vec<ListItem> = ui_state
        .library_items
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == ui_state.library_selected && is_focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == ui_state.library_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else if Some(i) == opened {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(truncate_string(label, item_width)).style(style)
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Library ")
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, library_items, ui_state.library_selected, block);
}
