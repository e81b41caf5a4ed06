use super::utils::centered_rect;
use super::*;
use crate::app::{AddField, TextInput};

pub fn render_add_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        input_line("Title:    ", &app.title_input, app.add_field == AddField::Title),
        Line::from(""),
        input_line("Due date: ", &app.due_input, app.add_field == AddField::DueDate),
        Line::from(Span::styled(
            "          YYYY-MM-DD HH:MM, date only, or blank",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(": Switch field  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": Save  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(": Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(" New Task ", Style::default().fg(Color::Yellow)))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}

fn input_line<'a>(label: &'a str, input: &'a TextInput, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    if !focused {
        return Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(input.value.as_str(), text_style),
        ]);
    }

    let (before, after) = input.split_at_cursor();
    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(before, text_style),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::styled(after, text_style),
    ])
}
