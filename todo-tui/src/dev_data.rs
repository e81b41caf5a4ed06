use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};
use todo_client::{Task, TaskId};

/// Sample tasks for `todo-tui dev`, due relative to `now` so reminders fire
/// shortly after permission is granted.
pub fn seed_tasks(now: OffsetDateTime) -> Vec<Task> {
    let due_in = |offset: Duration| (now + offset).format(&Rfc3339).ok();

    let task = |id: i64, title: &str, completed: bool, due_date: Option<String>| Task {
        id: TaskId::Number(id),
        title: title.to_string(),
        completed,
        due_date,
    };

    vec![
        task(6, "Water the plants", false, due_in(Duration::minutes(5))),
        task(5, "Renew library books", false, due_in(Duration::hours(-2))),
        task(4, "Call the dentist", false, due_in(Duration::days(1))),
        task(3, "Book train tickets", true, due_in(Duration::hours(-26))),
        task(2, "Read the RFC draft", false, None),
        task(1, "Plan weekend trip", false, due_in(Duration::days(3))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcOffset;

    #[test]
    fn seeded_due_dates_parse() {
        let now = OffsetDateTime::now_utc();
        let tasks = seed_tasks(now);

        let dated: Vec<_> = tasks.iter().filter(|t| t.due_date.is_some()).collect();
        assert_eq!(dated.len(), 5);
        assert!(dated.iter().all(|t| t.due_at(UtcOffset::UTC).is_some()));
    }
}
