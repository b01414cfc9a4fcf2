//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::format_duration;

pub fn render_progress_bar(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackInfo,
) {
    let status_text = match &playback.track {
        None => " No track playing".to_string(),
        Some(track) if playback.is_playing => {
            format!(" ▶ {} | {}", track.title, track.display_artist())
        }
        Some(track) => format!("⏸  {} | {}", track.title, track.display_artist()),
    };

    let shuffle_text = if playback.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = format!("Repeat: {}", playback.repeat.label());
    let position_text = match playback.queue_position {
        Some(index) => format!("{}/{}", index + 1, playback.queue_len),
        None => format!("-/{}", playback.queue_len),
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let progress_ratio = if playback.duration_ms > 0 {
        (playback.progress_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | Queue {} ", shuffle_text, repeat_text, position_text);
    let activity_info = format!(" {} | Listened: {} ", playback.activity, playback.completed_listens);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(activity_info).left_aligned())
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
