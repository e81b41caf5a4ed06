use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};
use time::OffsetDateTime;

mod add_dialog;
mod delete_dialog;
mod task_list;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &App) {
    let notices_height = if app.notices.is_empty() {
        0
    } else {
        app.notices.len() as u16 + 2
    };

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(notices_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let now = OffsetDateTime::now_utc();
    render_header(frame, root[0], app, now);
    task_list::render_task_list(frame, root[1], app, now);
    if notices_height > 0 {
        render_notices(frame, root[2], app);
    }
    render_status(frame, root[3], app);
    render_controls(frame, root[4], app);

    match app.current_view {
        View::Tasks => {}
        View::AddTask => add_dialog::render_add_dialog(frame, app),
        View::ConfirmDelete => delete_dialog::render_delete_confirm_dialog(frame, app),
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, now: OffsetDateTime) {
    let tasks = app.store.tasks();
    let open = tasks.iter().filter(|t| !t.completed).count();
    let overdue = tasks.iter().filter(|t| app.is_overdue(t, now)).count();

    let mut spans = vec![
        Span::styled(
            " Todo ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} open", open),
            Style::default().fg(Color::White),
        ),
    ];
    if overdue > 0 {
        spans.push(Span::raw("  ·  "));
        spans.push(Span::styled(
            format!("{} overdue", overdue),
            Style::default().fg(Color::Red),
        ));
    }
    spans.push(Span::raw("  ·  "));
    spans.push(Span::styled(
        app.backend_label.clone(),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_notices(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .notices
        .iter()
        .map(|notice| {
            let color = if notice.title.starts_with("Overdue") {
                Color::Red
            } else {
                Color::Yellow
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", utils::clock(notice.received_at, app.local)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(notice.title.clone(), Style::default().fg(color)),
                Span::raw("  "),
                Span::styled(notice.body.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Reminders ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(panel, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.status_message.as_deref().unwrap_or("");
    let status = Paragraph::new(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match app.current_view {
        View::Tasks => &[
            ("j/k", "Move"),
            ("Space", "Toggle"),
            ("a", "Add"),
            ("d", "Delete"),
            ("r", "Refresh"),
            ("n", "Reminders"),
            ("q", "Quit"),
        ],
        View::AddTask => &[
            ("Tab", "Switch field"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
        View::ConfirmDelete => &[("y", "Delete"), ("n", "Keep")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}  ", label)));
    }
    let controls = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(controls, area);
}
