//! Main content area rendering (library track lists, play queue)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentView, Track, UiState};
use super::utils::{calculate_track_column_widths, format_duration, render_scrollable_list, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    tracks: &[Track],
    current_track_id: Option<&str>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let title = match ui_state.content_view {
        ContentView::Library(index) => format!(
            " {} ",
            ui_state.library_items.get(index).map(String::as_str).unwrap_or("Library")
        ),
        ContentView::Queue => format!(" Queue ({}) ", tracks.len()),
    };

    if tracks.is_empty() {
        let hint = match ui_state.content_view {
            ContentView::Library(_) => "No tracks here\n\nUse Tab to switch to the library\nPress Enter to open an entry",
            ContentView::Queue => "Queue is empty\n\nPick a track from the library and press Enter",
        };
        let content = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(content, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = render_track_items(tracks, ui_state.content_selected, is_focused, current_track_id, content_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    // +1 for header
    render_scrollable_list(frame, area, items, ui_state.content_selected + 1, block);
}

fn render_track_items(
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    current_track_id: Option<&str>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let (num_width, title_width, artist_width) = calculate_track_column_widths(content_width, tracks.len());

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            "{:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
            " #", "Title", "Artist", "Time",
            num_width = num_width,
            title_width = title_width,
            artist_width = artist_width
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    ];

    let track_items = tracks.iter().enumerate().map(|(i, track)| {
        let is_current = current_track_id == Some(track.id.as_str());
        let style = if i == selected_index && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if i == selected_index {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let marker = if is_current { "▶" } else { " " };
        let track_num = format!("{}{:<width$}", marker, i + 1, width = num_width - 1);
        let title_str = truncate_string(&track.title, title_width);
        let artist_str = truncate_string(&track.display_artist(), artist_width);
        let duration = format_duration(track.duration_ms());

        ListItem::new(format!("{}   {}   {}   {}", track_num, title_str, artist_str, duration)).style(style)
    });

    items.extend(track_items);
    items
}
