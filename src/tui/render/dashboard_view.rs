use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::TaskRecord;
use crate::ops::countdown::Countdown;
use crate::tui::app::App;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

use super::helpers::{checkbox, spans_width};

const CARD_HEIGHT: u16 = 3;

/// Render the dashboard: countdown, stat cards, today's mission, import hint
pub fn render_dashboard_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.state.is_none() {
        let loading = Paragraph::new(" Loading sprint\u{2026}")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(loading, area);
        return;
    }

    let week_lines: u16 = if app.current_week().is_some() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // countdown banner
            Constraint::Length(CARD_HEIGHT), // stat cards
            Constraint::Length(week_lines),  // week title + goal
            Constraint::Min(2),              // mission
            Constraint::Length(1),           // import hint
        ])
        .split(area);

    render_countdown(frame, app, chunks[0]);
    render_stat_cards(frame, app, chunks[1]);
    if week_lines > 0 {
        render_week(frame, app, chunks[2]);
    }
    render_mission(frame, app, chunks[3]);

    let hint = Paragraph::new(" Import Tasks: press i, then a CSV path (columns: day, description, type)")
        .style(Style::default().fg(app.theme.dim).bg(bg));
    frame.render_widget(hint, chunks[4]);
}

fn render_countdown(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.background)
        .bg(match app.countdown {
            Countdown::Begun => app.theme.red,
            Countdown::Remaining { .. } => app.theme.accent,
        })
        .add_modifier(Modifier::BOLD);
    let banner = Paragraph::new(format!("Assessment Countdown: {}", app.countdown))
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(banner, area);
}

fn render_stat_cards(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let cards = [
        ("Sprint Day", summary.day.to_string()),
        (
            "Today's Progress",
            format!("{}/{}", summary.today_done, summary.today_total),
        ),
        ("Current Streak", format!("{} Days", summary.streak)),
        ("Total Completed", summary.total_completed.to_string()),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border).bg(app.theme.surface))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(app.theme.dim).bg(app.theme.surface),
            ))
            .style(Style::default().bg(app.theme.surface));
        let value = Paragraph::new(value.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(app.theme.accent)
                    .bg(app.theme.surface)
                    .add_modifier(Modifier::BOLD),
            )
            .block(block);
        frame.render_widget(value, *column);
    }
}

fn render_week(frame: &mut Frame, app: &App, area: Rect) {
    let Some(week) = app.current_week() else {
        return;
    };
    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", week.title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", week.goal),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_mission(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let tasks = app.today_tasks();

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        " Today's Mission",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];

    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks for today.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor row on screen
    let visible = (area.height as usize).saturating_sub(1).max(1);
    let scroll = app.cursor.saturating_sub(visible - 1);
    let kind_w = tasks.iter().map(|t| display_width(&t.kind)).max().unwrap_or(0);

    for (i, task) in tasks.iter().enumerate().skip(scroll).take(visible) {
        lines.push(task_line(app, task, i == app.cursor, kind_w, width));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn task_line<'a>(
    app: &App,
    task: &TaskRecord,
    is_cursor: bool,
    kind_w: usize,
    width: usize,
) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let check_style = if task.completed {
        Style::default().fg(app.theme.green).bg(bg)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let desc_style = if task.completed {
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(checkbox(task.completed), check_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            pad_to_width(&task.kind, kind_w),
            Style::default().fg(app.theme.kind_color(&task.kind)).bg(bg),
        ),
        Span::styled("  ", Style::default().bg(bg)),
    ];
    let room = width.saturating_sub(spans_width(&spans));
    spans.push(Span::styled(truncate_to_width(&task.desc, room), desc_style));

    // Pad cursor line
    if is_cursor {
        let used = spans_width(&spans);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskRecord;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, area| {
            render_dashboard_view(frame, app, area);
        })
    }

    #[test]
    fn first_day_shows_plan_tasks() {
        let (app, _store) = app_with_store(vec![]);
        let output = render(&app, TERM_W, TERM_H);
        assert!(output.contains("Assessment Countdown:"));
        assert!(output.contains("Week 1: Building the Foundation"));
        assert!(output.contains("Establish a rock-solid routine."));
        assert!(output.contains("[ ] Apti  Percentages"));
        assert!(output.contains("[ ] DSA   C++ Tutorial & 1 Array-Easy Problem"));
        assert!(output.contains("0/2"));
        assert!(output.contains("0 Days"));
    }

    #[test]
    fn stat_card_titles() {
        let (app, _store) = app_with_store(vec![]);
        let output = render(&app, 100, TERM_H);
        for title in ["Sprint Day", "Today's Progress", "Current Streak", "Total Completed"] {
            assert!(output.contains(title), "missing card {title}");
        }
    }

    #[test]
    fn completed_task_counts() {
        let mut done = TaskRecord::new("base_1_0".into(), 1, "Percentages".into(), "Apti".into());
        done.completed = true;
        let (app, _store) = app_with_store(vec![done]);
        let output = render(&app, TERM_W, TERM_H);
        assert!(output.contains("[x] Apti  Percentages"));
        assert!(output.contains("1/2"));
    }

    #[test]
    fn day_without_tasks() {
        let (mut app, _store) = app_with_store(vec![]);
        app.now += chrono::Duration::days(3);
        let output = render(&app, TERM_W, TERM_H);
        assert!(output.contains("No tasks for today."));
        assert!(!output.contains("Week 1"));
        assert!(output.contains("0/0"));
    }

    #[test]
    fn begun_banner() {
        let (mut app, _store) = app_with_store(vec![]);
        app.countdown = Countdown::Begun;
        let output = render(&app, TERM_W, TERM_H);
        assert!(output.contains("Assessment Countdown: Assessments have begun!"));
    }

    #[test]
    fn loading_before_first_snapshot() {
        let (mut app, _store) = app_with_store(vec![]);
        app.state = None;
        assert_eq!(render(&app, TERM_W, 5), " Loading sprint\u{2026}");
    }

    #[test]
    fn long_description_is_truncated() {
        let long = TaskRecord::new("csv_1".into(), 1, "a".repeat(200), "DSA".into());
        let (app, _store) = app_with_store(vec![long]);
        let output = render(&app, 40, TERM_H);
        assert!(output.contains("\u{2026}"));
        for line in output.lines() {
            assert!(display_width(line) <= 40);
        }
    }

    #[test]
    fn cursor_scrolls_into_view() {
        let extra: Vec<TaskRecord> = (0..20)
            .map(|i| TaskRecord::new(format!("csv_{i}"), 1, format!("Problem {i}"), "DSA".into()))
            .collect();
        let (mut app, _store) = app_with_store(extra);
        app.cursor = 21;
        let output = render(&app, TERM_W, 14);
        assert!(output.contains("Problem 19"));
        assert!(!output.contains("Percentages"));
    }
}
