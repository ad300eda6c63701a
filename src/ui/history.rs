use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use time_humanize::{Accuracy, HumanTime, Tense};

use unwind::{app::App, mood::RECENT_ENTRIES};

use super::{
    banner_line,
    charting::{compute_chart_params, format_label, mood_coords},
};

/// "3 hours ago" style age of an entry
pub fn ago(then: DateTime<Local>, now: DateTime<Local>) -> String {
    match (now - then).to_std() {
        Ok(elapsed) if elapsed.as_secs() >= 60 => {
            HumanTime::from(elapsed).to_text_en(Accuracy::Rough, Tense::Past)
        }
        _ => "just now".to_string(),
    }
}

/// Mood log summary, trend chart and the latest entries
pub struct HistoryView<'a>(pub &'a App);

impl Widget for HistoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(super::HORIZONTAL_MARGIN)
            .vertical_margin(super::VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),                         // stats
                Constraint::Min(6),                            // chart
                Constraint::Length(RECENT_ENTRIES as u16 + 2), // recent entries
                Constraint::Length(2),                         // banner
                Constraint::Length(1),                         // legend
            ])
            .split(area);

        let stats = app.stats();
        let summary = if stats.total_sessions == 0 {
            "No sessions logged yet. Finish a session to start your mood log.".to_string()
        } else {
            format!(
                "{} sessions   {:.1} avg mood   {} day streak",
                stats.total_sessions, stats.average_mood, stats.streak
            )
        };
        let mut summary_lines = vec![Line::from(Span::styled(summary, bold_style))];
        if !stats.top_activities.is_empty() {
            summary_lines.push(Line::from(Span::styled(
                format!("favourites: {}", stats.top_activities.join(", ")),
                dim_style,
            )));
        }
        Paragraph::new(summary_lines)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let coords = mood_coords(&app.history);
        let (span, highest) = compute_chart_params(&coords);
        let datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&coords)];
        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("session")
                    .bounds([1.0, span])
                    .labels(vec![
                        Span::styled("1", bold_style),
                        Span::styled(format_label(span), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("mood")
                    .bounds([1.0, highest])
                    .labels(vec![
                        Span::styled("1", bold_style),
                        Span::styled(format_label(highest), bold_style),
                    ]),
            )
            .render(chunks[1], buf);

        let now = Local::now();
        let skip = app.history.len().saturating_sub(RECENT_ENTRIES);
        let recent: Vec<Line> = app.history[skip..]
            .iter()
            .rev()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!("{:<8}", entry.mood), bold_style),
                    Span::raw(format!("{}/5  ", entry.intensity)),
                    Span::styled(format!("{:<16}", ago(entry.timestamp, now)), dim_style),
                    Span::raw(entry.notes.clone().unwrap_or_default()),
                ])
            })
            .collect();
        Paragraph::new(recent)
            .block(Block::default().borders(Borders::TOP).title("recent"))
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        if let Some(banner) = &app.banner {
            Paragraph::new(banner_line(banner))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(
            "(b)ack / (e)xport json + csv / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn recent_entries_read_as_just_now() {
        let now = Local::now();
        assert_eq!(ago(now - Duration::seconds(5), now), "just now");
        assert_eq!(ago(now + Duration::seconds(5), now), "just now");
    }

    #[test]
    fn older_entries_read_in_the_past() {
        let now = Local::now();
        let text = ago(now - Duration::hours(3), now);
        assert!(text.contains("ago"), "{text}");
    }
}
