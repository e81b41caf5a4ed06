use super::utils::centered_rect;
use super::*;

pub fn render_delete_confirm_dialog(frame: &mut Frame, app: &App) {
    let Some(context) = &app.delete_context else {
        return;
    };

    let area = centered_rect(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let detail = if context.display_due.is_empty() {
        "no due date".to_string()
    } else {
        format!("due {}", context.display_due)
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            context.title.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete Task? ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
