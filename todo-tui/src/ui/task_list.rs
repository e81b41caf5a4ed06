use super::*;
use todo_client::{due, Task};

/// Rows of the grouped list: bucket headings interleaved with tasks.
enum Row<'a> {
    Heading(String),
    Task(&'a Task),
}

pub fn render_task_list(frame: &mut Frame, area: Rect, app: &App, now: OffsetDateTime) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Tasks ")
        .padding(Padding::horizontal(1));

    let groups = app.grouped();
    if groups.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Nothing to do. Press a to add a task.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let mut rows = Vec::new();
    for group in &groups {
        rows.push(Row::Heading(group.bucket.heading()));
        rows.extend(group.tasks.iter().copied().map(Row::Task));
    }

    let selected_row = selected_row(&rows, app.selected_index);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            Row::Heading(heading) => ListItem::new(Line::from(Span::styled(
                format!("── {} ──", heading),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            Row::Task(task) => ListItem::new(task_line(task, app, now)),
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(selected_row);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Maps an index into the task display order onto a row, skipping headings.
fn selected_row(rows: &[Row<'_>], selected_index: usize) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| matches!(row, Row::Task(_)))
        .nth(selected_index)
        .map(|(row, _)| row)
}

fn task_line<'a>(task: &'a Task, app: &App, now: OffsetDateTime) -> Line<'a> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let overdue = app.is_overdue(task, now);

    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if overdue {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(checkbox, Style::default().fg(Color::Gray)),
        Span::styled(task.title.as_str(), title_style),
    ];

    if let Some(raw) = task.raw_due() {
        let due_style = if overdue {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("  {}", due::format_due(raw, app.local)),
            due_style,
        ));
    }

    Line::from(spans)
}
