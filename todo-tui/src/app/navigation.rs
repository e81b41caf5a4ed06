use super::*;

impl App {
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn select_next(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1).min(len - 1);
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.store.tasks().len().saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move the selection onto the task with `id`, if it is listed.
    pub fn select_task(&mut self, id: &TaskId) {
        let position = self.display_order().iter().position(|task| &task.id == id);
        if let Some(index) = position {
            self.selected_index = index;
        }
    }

    pub fn open_add_form(&mut self) {
        self.title_input.clear();
        self.due_input.clear();
        self.add_field = AddField::Title;
        self.navigate_to(View::AddTask);
    }

    pub fn close_add_form(&mut self) {
        self.title_input.clear();
        self.due_input.clear();
        self.navigate_to(View::Tasks);
    }

    pub fn add_next_field(&mut self) {
        self.add_field = match self.add_field {
            AddField::Title => AddField::DueDate,
            AddField::DueDate => AddField::Title,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.add_field {
            AddField::Title => &mut self.title_input,
            AddField::DueDate => &mut self.due_input,
        }
    }

    /// Open the delete dialog for the selected task.
    pub fn open_delete_confirm(&mut self) {
        let local = self.local;
        let Some(task) = self.selected_task() else {
            return;
        };
        let context = DeleteContext {
            id: task.id.clone(),
            title: task.title.clone(),
            display_due: task
                .raw_due()
                .map(|raw| todo_client::due::format_due(raw, local))
                .unwrap_or_default(),
        };
        self.delete_context = Some(context);
        self.navigate_to(View::ConfirmDelete);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_context = None;
        self.navigate_to(View::Tasks);
    }
}
