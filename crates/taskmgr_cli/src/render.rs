//! Console rendering for menus, task rows and status messages.
//!
//! # Responsibility
//! - Turn core records into colored, column-aligned text.
//!
//! # Invariants
//! - Rendering is pure: no I/O, no state.

use crossterm::style::Stylize;
use taskmgr_core::Task;

pub const COMPLETED_ICON: &str = "✅";
pub const PENDING_ICON: &str = "❌";

const TITLE_COLUMN_WIDTH: usize = 25;
const LIST_RULE_WIDTH: usize = 50;
const MENU_RULE_WIDTH: usize = 60;

/// Icon plus label for a task's completion state, colored.
pub fn status_label(task: &Task) -> String {
    if task.is_pending() {
        format!("{PENDING_ICON} Pending").red().to_string()
    } else {
        format!("{COMPLETED_ICON} Completed").green().to_string()
    }
}

/// One `[id]  title  status` row with the title padded to a fixed column.
pub fn task_row(task: &Task) -> String {
    let left = format!("[{}]  {:<TITLE_COLUMN_WIDTH$}", task.id, task.title);
    format!("{} {}", left.blue(), status_label(task))
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return hint("No tasks available. Please add some tasks!");
    }

    let mut out = format!(
        "\n{}\n",
        "--------------------Task List---------------------".bold()
    );
    for task in tasks {
        out.push_str(&task_row(task));
        out.push('\n');
    }
    out.push_str(&"-".repeat(LIST_RULE_WIDTH));
    out
}

/// Short count line shown under the menu header.
pub fn task_summary(tasks: &[Task]) -> String {
    let pending = tasks.iter().filter(|task| task.is_pending()).count();
    let noun = if tasks.len() == 1 { "task" } else { "tasks" };
    format!(
        "{} {noun}: {} completed, {pending} pending",
        tasks.len(),
        tasks.len() - pending
    )
}

pub fn menu(identifier: &str, tasks: &[Task]) -> String {
    let rule = "=".repeat(MENU_RULE_WIDTH);
    [
        String::new(),
        rule.clone(),
        format!("Task Manager - Logged in as {identifier}")
            .bold()
            .to_string(),
        task_summary(tasks),
        rule.clone(),
        format!("1. {}", "Add Task".blue()),
        format!("2. {}", "View Tasks".blue()),
        format!("3. {}", "Delete Task".blue()),
        format!("4. {}", "Mark Task Complete".blue()),
        format!("5. {}", "Log Out".red()),
        rule,
    ]
    .join("\n")
}

pub fn banner(version: &str) -> String {
    format!("Welcome to the Task Manager! (v{version})")
        .bold()
        .to_string()
}

pub fn success(message: &str) -> String {
    message.green().to_string()
}

pub fn failure(message: &str) -> String {
    message.red().to_string()
}

pub fn hint(message: &str) -> String {
    message.yellow().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_label_distinguishes_completion() {
        let mut task = Task::new(1, "a");
        let pending = status_label(&task);
        assert!(pending.contains(PENDING_ICON));
        assert!(pending.contains("Pending"));

        task.complete();
        let done = status_label(&task);
        assert!(done.contains(COMPLETED_ICON));
        assert!(done.contains("Completed"));
    }

    #[test]
    fn task_row_pads_title_column() {
        let row = task_row(&Task::new(3, "milk"));
        assert!(row.contains(&format!("[3]  milk{}", " ".repeat(21))));
    }

    #[test]
    fn long_titles_are_not_truncated() {
        let title = "a".repeat(40);
        assert!(task_row(&Task::new(1, title.as_str())).contains(&title));
    }

    #[test]
    fn empty_list_renders_hint() {
        assert!(task_list(&[]).contains("No tasks available"));
    }

    #[test]
    fn task_list_keeps_insertion_order() {
        let rendered = task_list(&[Task::new(2, "second"), Task::new(1, "first")]);
        let second = rendered.find("second").unwrap();
        let first = rendered.find("first").unwrap();
        assert!(second < first);
    }

    #[test]
    fn summary_counts_completed_and_pending() {
        let mut done = Task::new(1, "a");
        done.complete();
        assert_eq!(
            task_summary(&[done, Task::new(2, "b"), Task::new(3, "c")]),
            "3 tasks: 1 completed, 2 pending"
        );
        assert_eq!(task_summary(&[Task::new(1, "x")]), "1 task: 0 completed, 1 pending");
    }

    #[test]
    fn menu_lists_all_choices_and_identifier() {
        let text = menu("u@test.com", &[]);
        assert!(text.contains("Logged in as u@test.com"));
        for label in [
            "1. ",
            "Add Task",
            "View Tasks",
            "Delete Task",
            "Mark Task Complete",
            "5. ",
            "Log Out",
        ] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
