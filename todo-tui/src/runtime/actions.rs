use crate::app::{AddField, App, View};
use anyhow::Result;
use todo_client::{due, Permission, TaskId, TodoError};

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App) -> Result<()> {
    match action {
        Action::Refresh => {
            refresh(app).await;
        }
        Action::SubmitNewTask => {
            submit_new_task(app).await;
        }
        Action::ToggleCompleted { id, current } => {
            toggle_completed(app, id, current).await;
        }
        Action::ConfirmDelete => {
            confirm_delete(app).await;
        }
        Action::RequestNotifications => {
            request_notifications(app);
        }
    }
    Ok(())
}

async fn refresh(app: &mut App) {
    match app.store.refresh().await {
        Ok(()) => {
            app.clamp_selection();
            let count = app.store.tasks().len();
            app.set_status(format!("Loaded {} tasks from {}", count, app.backend_label));
        }
        Err(e) => app.set_status(format!("Failed to load tasks: {}", e)),
    }
}

async fn submit_new_task(app: &mut App) {
    let title = app.title_input.value.clone();
    let due_date = match due::normalize_due_input(&app.due_input.value, app.local) {
        Ok(due_date) => due_date,
        Err(e) => {
            app.add_field = AddField::DueDate;
            app.set_status(format!("{} (use YYYY-MM-DD HH:MM)", e));
            return;
        }
    };

    let created = app
        .store
        .create(&title, due_date.as_deref())
        .await
        .map(|task| task.id.clone());

    match created {
        Ok(id) => {
            app.close_add_form();
            app.select_task(&id);
            app.set_status(format!("Added \"{}\"", title.trim()));
        }
        Err(TodoError::BlankTitle) => {
            app.add_field = AddField::Title;
            app.set_status("Title cannot be empty".to_string());
        }
        Err(e) => app.set_status(format!("Failed to add task: {}", e)),
    }
}

async fn toggle_completed(app: &mut App, id: TaskId, current: bool) {
    match app.store.set_completed(&id, current).await {
        Ok(()) => app.clear_status(),
        Err(e) => app.set_status(format!("Failed to update task: {}", e)),
    }
}

async fn confirm_delete(app: &mut App) {
    let Some(context) = app.delete_context.take() else {
        app.navigate_to(View::Tasks);
        return;
    };

    match app.store.remove(&context.id).await {
        Ok(()) => {
            app.clamp_selection();
            app.set_status(format!("Deleted \"{}\"", context.title));
        }
        Err(e) => app.set_status(format!("Failed to delete task: {}", e)),
    }
    app.navigate_to(View::Tasks);
}

fn request_notifications(app: &mut App) {
    let (permission, fired) = app.store.request_notifications();
    let message = match permission {
        Permission::Granted if fired.is_empty() => "Reminders enabled".to_string(),
        Permission::Granted => format!("Reminders enabled, {} due now", fired.len()),
        Permission::Denied => "Reminders are disabled in config".to_string(),
        Permission::Default => "Reminder permission not granted".to_string(),
    };
    app.set_status(message);
}
