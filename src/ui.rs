pub mod charting;
pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use unwind::{
    app::{App, Banner, BannerLevel},
    guidance::MoodLevel,
    stage::{Stage, SESSION_SECS},
    util::format_clock,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn banner_line(banner: &Banner) -> Line<'_> {
    let style = match banner.level {
        BannerLevel::Info => Style::default().fg(Color::Cyan),
        BannerLevel::Gentle => Style::default().fg(Color::Yellow),
        BannerLevel::Alert => bold().fg(Color::Red),
    };
    Line::from(Span::styled(banner.text.as_str(), style))
}

/// Guided session view
pub struct SessionView<'a>(pub &'a App);

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let state = app.timer.state();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title + clock
                Constraint::Length(1), // progress
                Constraint::Length(2), // stage description
                Constraint::Min(4),    // stage body
                Constraint::Length(2), // banner
                Constraint::Length(1), // legend
            ])
            .split(area);

        let clock = format!(
            "{} / {}",
            format_clock(state.elapsed_secs),
            format_clock(SESSION_SECS)
        );
        let title = state.stage.title();
        let gap = (chunks[0].width as usize)
            .saturating_sub(title.width() + clock.width())
            .max(1);
        Paragraph::new(Line::from(vec![
            Span::styled(title, bold().fg(Color::Magenta)),
            Span::raw(" ".repeat(gap)),
            Span::styled(clock, dim()),
        ]))
        .render(chunks[0], buf);

        let label = if state.is_playing || state.elapsed_secs == 0 || state.is_complete() {
            format!("{:.0}%", state.progress_percent())
        } else {
            "paused".to_string()
        };
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(state.progress_percent() / 100.0)
            .label(label)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(state.stage.description(), italic()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        let body = match state.stage {
            Stage::Welcome => welcome_lines(app),
            Stage::Checkin => checkin_lines(app),
            Stage::Breathing => breathing_lines(app),
            Stage::Affirmation => affirmation_lines(app),
            Stage::Completion => completion_lines(app),
        };
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        if let Some(banner) = &app.banner {
            Paragraph::new(banner_line(banner))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled(legend(app), italic()))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}

fn legend(app: &App) -> String {
    if app.editing {
        return "type how you feel / (enter) submit / (esc) done".to_string();
    }
    let state = app.timer.state();
    let play = if state.elapsed_secs == 0 {
        "(space) begin"
    } else if state.is_complete() {
        "(space) again"
    } else if state.is_playing {
        "(space) pause"
    } else {
        "(space) resume"
    };
    let mut parts = vec![play, "(r)eset", "(h)istory"];
    if state.stage == Stage::Checkin {
        parts.push("(1-5) mood");
        parts.push("(w)rite");
    }
    if app.banner.as_ref().map(|b| b.level) == Some(BannerLevel::Alert) {
        parts.push("(o)pen support");
    }
    parts.push("(esc)ape");
    parts.join(" / ")
}

fn welcome_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Three minutes, just for you.", bold())),
        Line::from(""),
        Line::from("Check in with yourself, breathe, and leave with one kind thought."),
    ];
    if app.timer.state().elapsed_secs == 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press space when you're ready.",
            dim(),
        )));
    }
    lines
}

fn mood_picker(selected: MoodLevel) -> Line<'static> {
    let spans = MoodLevel::all()
        .flat_map(|level| {
            let g = level.guidance();
            let text = format!(" {} {} ", g.emoji, g.label);
            let style = if level == selected {
                bold().fg(Color::Black).bg(Color::Magenta)
            } else {
                dim()
            };
            [Span::styled(text, style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn checkin_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("How are you feeling right now?"),
        Line::from(""),
        mood_picker(app.mood),
        Line::from(""),
        Line::from(Span::styled(app.mood.guidance().reflection.clone(), italic())),
        Line::from(""),
    ];

    let journal = if app.editing {
        Span::styled(format!("> {}_", app.journal), bold())
    } else if app.journal.is_empty() {
        Span::styled("(w) to write a few words about it", dim())
    } else {
        Span::styled(format!("\"{}\"", app.journal), italic())
    };
    lines.push(Line::from(journal));

    if let Some(check_in) = &app.check_in {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            check_in.response.message.clone(),
            bold(),
        )));
        for suggestion in &check_in.response.suggestions {
            lines.push(Line::from(Span::styled(format!("· {suggestion}"), dim())));
        }
    }
    lines
}

fn breathing_lines(app: &App) -> Vec<Line<'static>> {
    let Some(cycle) = app.timer.breathing() else {
        return vec![Line::from("Get comfortable.")];
    };

    let width = 24usize;
    let filled = (cycle.phase_progress() * width as f64).round() as usize;
    let bar = format!("{}{}", "●".repeat(filled), "·".repeat(width - filled.min(width)));

    let mut lines = vec![
        Line::from(Span::styled("4 · 7 · 8", dim())),
        Line::from(""),
        Line::from(Span::styled(
            cycle.phase.cue(),
            bold().fg(Color::Cyan),
        )),
        Line::from(Span::styled(cycle.countdown.to_string(), bold())),
        Line::from(Span::styled(bar, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            format!("breaths completed: {}", cycle.completed_breaths),
            dim(),
        )),
    ];
    if app.voice_enabled() {
        lines.push(Line::from(Span::styled("voice guidance on", dim())));
    }
    lines
}

fn affirmation_lines(app: &App) -> Vec<Line<'static>> {
    let guidance = app.mood.guidance();
    let mut lines = vec![
        Line::from(Span::styled(
            guidance.affirmation.clone(),
            bold().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled(guidance.activity.title.clone(), bold())),
        Line::from(guidance.activity.description.clone()),
    ];

    if let Some(suggestion) = &app.habit {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Try next: {} ({})",
                suggestion.habit.title, suggestion.habit.duration
            ),
            bold(),
        )));
        lines.push(Line::from(Span::styled(suggestion.personalized_tip, italic())));
    }
    lines
}

fn completion_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Well done.", bold().fg(Color::Green))),
        Line::from(""),
        Line::from("You took three minutes for yourself."),
    ];

    if let Some(entry) = &app.last_entry {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Logged: {} ({}/5) · {}",
            entry.mood,
            entry.intensity,
            entry.activities.join(", ")
        )));
    }

    let stats = app.stats();
    if stats.total_sessions > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "{} sessions · {} day streak · average {:.1}",
                stats.total_sessions, stats.streak, stats.average_mood
            ),
            dim(),
        )));
    }
    lines
}
