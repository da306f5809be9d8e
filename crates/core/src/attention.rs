//! "Needs attention now" detection for the dashboard banner: incomplete,
//! high-priority tasks that are already overdue.

use chrono::NaiveDate;

use crate::task::{Priority, Task, start_of_today};

/// The qualifying subset plus its size, in original input order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AttentionReport {
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Compute the attention-required subset. Snapshots its own "today"
/// independently of the sorter.
pub fn attention_required(tasks: &[Task]) -> AttentionReport {
    attention_required_at(tasks, start_of_today())
}

/// Same detection against an explicit day, for deterministic callers.
pub fn attention_required_at(tasks: &[Task], today: NaiveDate) -> AttentionReport {
    let urgent: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            !task.completed
                && task.priority == Some(Priority::High)
                && task.due_date.is_some_and(|due| due < today)
        })
        .cloned()
        .collect();

    AttentionReport {
        count: urgent.len(),
        tasks: urgent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn task(id: &str, completed: bool, priority: Option<Priority>, due: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            due_date: due.map(date),
            priority,
            completed,
        }
    }

    #[test]
    fn overdue_high_priority_incomplete_qualifies() {
        let today = date("2026-08-29");
        let report = attention_required_at(
            &[task("a", false, Some(Priority::High), Some("2026-08-28"))],
            today,
        );
        assert_eq!(report.count, 1);
        assert_eq!(report.tasks[0].id, "a");
    }

    #[test]
    fn future_completed_or_lower_priority_do_not_qualify() {
        let today = date("2026-08-29");
        let input = vec![
            task("future-high", false, Some(Priority::High), Some("2026-08-30")),
            task("done-high", true, Some(Priority::High), Some("2026-08-28")),
            task("overdue-medium", false, Some(Priority::Medium), Some("2026-08-28")),
            task("undated-high", false, Some(Priority::High), None),
            task("overdue-unset", false, None, Some("2026-08-28")),
        ];
        let report = attention_required_at(&input, today);
        assert_eq!(report.count, 0);
        assert!(report.tasks.is_empty());
    }

    #[test]
    fn due_today_is_not_overdue() {
        let today = date("2026-08-29");
        let report = attention_required_at(
            &[task("a", false, Some(Priority::High), Some("2026-08-29"))],
            today,
        );
        assert_eq!(report.count, 0);
    }

    #[test]
    fn qualifying_tasks_keep_input_order() {
        let today = date("2026-08-29");
        let input = vec![
            task("second", false, Some(Priority::High), Some("2026-08-01")),
            task("skip", false, Some(Priority::Low), Some("2026-08-01")),
            task("first", false, Some(Priority::High), Some("2026-08-20")),
        ];
        let report = attention_required_at(&input, today);
        assert_eq!(report.count, 2);
        let ids: Vec<&str> = report.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = attention_required(&[]);
        assert_eq!(report.count, 0);
        assert!(report.tasks.is_empty());
    }
}
