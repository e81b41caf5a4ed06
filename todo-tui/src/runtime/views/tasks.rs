use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_tasks_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => {
            if let Some(task) = app.selected_task() {
                let action = Action::ToggleCompleted {
                    id: task.id.clone(),
                    current: task.completed,
                };
                enqueue_action(action_tx, action);
            }
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.open_add_form();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.open_delete_confirm();
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(action_tx, Action::Refresh);
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            enqueue_action(action_tx, Action::RequestNotifications);
        }
        KeyCode::Esc => {
            app.clear_status();
        }
        _ => {}
    }
}
