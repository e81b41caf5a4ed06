use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_add_task_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => {
            app.close_add_form();
            app.set_status("Add cancelled".to_string());
        }
        KeyCode::Enter => {
            enqueue_action(action_tx, Action::SubmitNewTask);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.add_next_field();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.focused_input().insert(c);
        }
        KeyCode::Backspace => {
            app.focused_input().backspace();
        }
        KeyCode::Left => {
            app.focused_input().move_left();
        }
        KeyCode::Right => {
            app.focused_input().move_right();
        }
        KeyCode::Home => {
            app.focused_input().home();
        }
        KeyCode::End => {
            app.focused_input().end();
        }
        _ => {}
    }
}
