//! Display ordering for task lists.
//!
//! Most-significant key first: incomplete before completed, overdue before
//! not-overdue, higher priority score first, earlier due date first (dated
//! before undated), input order as the stable fallback.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::task::{Task, start_of_today};

/// Sort a task list for display. The input is left untouched; a newly
/// ordered copy is returned. "Today" is snapshotted once per call.
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    sort_tasks_at(tasks, start_of_today())
}

/// Same ordering against an explicit day, for deterministic callers.
pub fn sort_tasks_at(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // Vec::sort_by is stable, so fully tied tasks keep their input order.
    sorted.sort_by(|a, b| compare(a, b, today));
    sorted
}

fn compare(a: &Task, b: &Task, today: NaiveDate) -> Ordering {
    // Completed tasks always last.
    if a.completed != b.completed {
        return if a.completed {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // Overdue (incomplete, past-due) before everything else in the group.
    match (a.is_overdue(today), b.is_overdue(today)) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    // Higher priority first.
    match b.priority_score().cmp(&a.priority_score()) {
        Ordering::Equal => {}
        other => return other,
    }

    // Dated before undated, then earlier due date first.
    match (a.due_date, b.due_date) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(da), Some(db)) => da.cmp(&db),
        (None, None) => Ordering::Equal,
    }
}
