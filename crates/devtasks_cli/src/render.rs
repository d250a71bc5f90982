//! Plain-text rendering of the task list.

use chrono::Local;
use devtasks_core::Task;
use std::fmt::Write;

const EMPTY_LIST: &str = "No tasks to show.";

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    let mut out = String::new();
    for task in tasks {
        let mark = if task.done { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "[{mark}] #{:<14} {:<6} {}  (created {})",
            task.id,
            task.priority,
            task.title,
            created_label(task)
        );
    }
    out
}

/// Day/month hour:minute in local time.
fn created_label(task: &Task) -> String {
    task.created_at
        .with_timezone(&Local)
        .format("%d/%m %H:%M")
        .to_string()
}
