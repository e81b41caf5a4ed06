use crate::app::App;

/// Initial load before the UI takes over the terminal.
pub async fn initialize_app_state(app: &mut App) {
    match app.store.refresh().await {
        Ok(()) => {
            let count = app.store.tasks().len();
            app.set_status(format!(
                "Loaded {} tasks. Press n to enable reminders",
                count
            ));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Initial load failed");
            app.set_status(format!("Could not load tasks: {}. Press r to retry", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{task, test_app};

    #[tokio::test]
    async fn failed_initial_load_keeps_the_ui_usable() {
        let (mut app, api) = test_app(vec![task(1, "A", false, None)]).await;
        api.fail_next_call();

        initialize_app_state(&mut app).await;

        assert_eq!(app.store.tasks().len(), 1);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Could not load tasks")));
    }
}
