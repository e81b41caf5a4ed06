//! Tasks grouped into calendar-day buckets for display.

use std::collections::BTreeMap;

use time::{Date, UtcOffset};

use crate::due;
use crate::task::Task;

/// Display bucket. Variant order makes every `Day` sort before `NoDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueBucket {
    Day(Date),
    /// Tasks without a due date, or with one that cannot be parsed.
    NoDate,
}

impl DueBucket {
    pub fn for_task(task: &Task, local: UtcOffset) -> Self {
        task.due_at(local)
            .and_then(|due_at| due::local_date(due_at, local))
            .map_or(DueBucket::NoDate, DueBucket::Day)
    }

    pub fn heading(&self) -> String {
        match self {
            DueBucket::Day(date) => due::format_day(*date),
            DueBucket::NoDate => "No due date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub bucket: DueBucket,
    pub tasks: Vec<&'a Task>,
}

/// Partition `tasks` by local due day, buckets ascending with `NoDate` last.
/// Tasks keep their relative order inside a bucket.
pub fn group_by_due_date(tasks: &[Task], local: UtcOffset) -> Vec<TaskGroup<'_>> {
    let mut buckets: BTreeMap<DueBucket, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        buckets
            .entry(DueBucket::for_task(task, local))
            .or_default()
            .push(task);
    }

    buckets
        .into_iter()
        .map(|(bucket, tasks)| TaskGroup { bucket, tasks })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, offset};

    fn task(id: i64, due_date: Option<&str>) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            completed: false,
            due_date: due_date.map(str::to_string),
        }
    }

    fn ids(group: &TaskGroup<'_>) -> Vec<String> {
        group.tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_due_date(&[], UtcOffset::UTC).is_empty());
    }

    #[test]
    fn buckets_ascend_and_undated_is_last() {
        let tasks = vec![
            task(1, None),
            task(2, Some("2025-03-02T09:00")),
            task(3, Some("2024-12-31T23:00")),
            task(4, Some("2025-03-02T08:00")),
            task(5, Some("not a date")),
        ];

        let groups = group_by_due_date(&tasks, UtcOffset::UTC);

        let buckets: Vec<DueBucket> = groups.iter().map(|g| g.bucket).collect();
        assert_eq!(
            buckets,
            vec![
                DueBucket::Day(date!(2024-12-31)),
                DueBucket::Day(date!(2025-03-02)),
                DueBucket::NoDate,
            ]
        );
        assert_eq!(ids(&groups[1]), vec!["2", "4"]);
        assert_eq!(ids(&groups[2]), vec!["1", "5"]);
    }

    #[test]
    fn only_undated_tasks() {
        let tasks = vec![task(1, None), task(2, Some(""))];
        let groups = group_by_due_date(&tasks, UtcOffset::UTC);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, DueBucket::NoDate);
        assert_eq!(groups[0].bucket.heading(), "No due date");
    }

    #[test]
    fn grouping_uses_local_calendar_day() {
        let tasks = vec![task(1, Some("2025-01-01T20:00:00Z"))];
        let groups = group_by_due_date(&tasks, offset!(+8));
        assert_eq!(groups[0].bucket, DueBucket::Day(date!(2025-01-02)));
    }

    #[test]
    fn grouping_preserves_every_task_exactly_once() {
        let dues = [
            None,
            Some("2025-05-01T10:00"),
            Some("2025-04-30T10:00"),
            Some("2025-05-01T07:00"),
            None,
            Some("garbage"),
            Some("2023-01-01"),
        ];
        let tasks: Vec<Task> = dues
            .iter()
            .enumerate()
            .map(|(i, due)| task(i as i64, *due))
            .collect();

        let groups = group_by_due_date(&tasks, UtcOffset::UTC);

        let mut seen: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.tasks.iter())
            .map(|t| match t.id {
                crate::TaskId::Number(n) => n,
                crate::TaskId::Text(_) => unreachable!(),
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..dues.len() as i64).collect::<Vec<_>>());

        for pair in groups.windows(2) {
            assert!(pair[0].bucket < pair[1].bucket);
        }
        assert_eq!(groups.last().map(|g| g.bucket), Some(DueBucket::NoDate));
    }

    #[test]
    fn out_of_range_local_day_goes_to_no_date() {
        let tasks = vec![
            task(1, Some("9999-12-31T23:59:59Z")),
            task(2, Some("2025-01-01T10:00:00Z")),
        ];
        let groups = group_by_due_date(&tasks, offset!(+8));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].bucket, DueBucket::Day(date!(2025-01-01)));
        assert_eq!(groups[1].bucket, DueBucket::NoDate);
        assert_eq!(groups[1].tasks[0].title, "task 1");
    }

    #[test]
    fn same_input_same_output() {
        let tasks = vec![task(1, Some("2025-01-02T10:00")), task(2, None)];
        assert_eq!(
            group_by_due_date(&tasks, UtcOffset::UTC),
            group_by_due_date(&tasks, UtcOffset::UTC)
        );
    }
}
