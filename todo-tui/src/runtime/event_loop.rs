use crate::app::App;
use crate::notifier::NoticeRx;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    notices: &mut NoticeRx,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app).await?;
        }

        // Reminders arrive from the scheduler task.
        let mut ring_bell = false;
        while let Ok(notice) = notices.try_recv() {
            app.push_notice(notice);
            ring_bell = true;
        }
        if ring_bell {
            let mut stdout = io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
