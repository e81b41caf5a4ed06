use ratatui::layout::{Constraint, Direction, Layout, Rect};
use time::{macros::format_description, OffsetDateTime, UtcOffset};

/// `HH:MM` in the local offset.
pub fn clock(at: OffsetDateTime, local: UtcOffset) -> String {
    at.to_offset(local)
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn clock_uses_the_local_offset() {
        assert_eq!(clock(datetime!(2025-01-01 08:05 UTC), offset!(+2)), "10:05");
    }

    #[test]
    fn centered_rect_fits_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 10, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }
}
