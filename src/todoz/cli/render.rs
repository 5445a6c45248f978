use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use timeago::Formatter;
use todoz::api::MessageLevel;
use todoz::commands::CmdMessage;
use todoz::config::TodozConfig;
use todoz::index::DisplayTodo;
use todoz::model::{FilterType, Todo};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const TODAY_MARKER: &str = "☀";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_todo_list(filter: FilterType, todos: &[DisplayTodo]) {
    if todos.is_empty() {
        println!("{}", format!("Nothing in {}.", filter).dimmed());
        return;
    }

    let now = Local::now();
    for dt in todos {
        let line = ListLine::new(dt, todo_is_today(&dt.todo, &now));
        let checkbox = if dt.todo.is_done { "[x]" } else { "[ ]" };
        let index = if dt.todo.is_deleted() {
            line.index.red()
        } else {
            line.index.yellow()
        };
        let title = if dt.todo.is_done || dt.todo.is_deleted() {
            line.title.dimmed()
        } else {
            line.title.normal()
        };
        println!(
            "  {}{} {}{}{}{}",
            index,
            checkbox,
            title,
            " ".repeat(line.padding),
            line.marker,
            line.time_ago.dimmed()
        );
    }
}

pub fn print_full_todos(todos: &[DisplayTodo]) {
    for (i, dt) in todos.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let todo = &dt.todo;
        println!("{} {}", dt.index.to_string().yellow(), todo.title.bold());
        println!("--------------------------------");
        for (label, value) in detail_rows(todo) {
            println!("{:<14}{}", format!("{}:", label).dimmed(), value);
        }
        if !todo.description.is_empty() {
            println!();
            println!("{}", todo.description);
        }
    }
}

pub fn print_config(config: &TodozConfig) {
    for (key, value) in config.list_all() {
        println!("{} = {}", key, value);
    }
}

fn todo_is_today(todo: &Todo, now: &DateTime<Local>) -> bool {
    !todo.is_done && !todo.is_deleted() && todo.is_marked_for(now)
}

/// Layout of one list row, computed without colors so widths stay exact.
#[derive(Debug)]
struct ListLine {
    index: String,
    title: String,
    padding: usize,
    marker: String,
    time_ago: String,
}

impl ListLine {
    fn new(dt: &DisplayTodo, today: bool) -> Self {
        let index = format!("{:>3}. ", dt.index);
        let marker = if today {
            format!("{} ", TODAY_MARKER)
        } else {
            "  ".to_string()
        };
        // "  " prefix, checkbox and the space after it.
        let fixed = 2 + index.width() + 4 + marker.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&single_line(&dt.todo.title), available);
        let padding = available.saturating_sub(title.width());

        Self {
            index,
            title,
            padding,
            marker,
            time_ago: format_time_ago(dt.todo.date_created),
        }
    }
}

fn detail_rows(todo: &Todo) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("id", todo.id.clone()),
        ("status", status(todo).to_string()),
        ("created", format_local(&todo.date_created)),
    ];
    if let Some(marked) = &todo.date_marked_as_to_be_done_today {
        rows.push(("today since", format_local(marked)));
    }
    rows.push((
        "times today",
        todo.number_of_times_marked_as_to_be_done_today.to_string(),
    ));
    if let Some(deleted) = &todo.date_deleted {
        rows.push(("deleted", format_local(deleted)));
    }
    rows
}

fn status(todo: &Todo) -> &'static str {
    match (todo.is_deleted(), todo.is_done) {
        (true, _) => "deleted",
        (false, true) => "done",
        (false, false) if todo.is_marked_for(&Local::now()) => "today",
        (false, false) => "backlog",
    }
}

fn format_local(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todoz::index::index_todos;

    #[test]
    fn short_strings_are_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn long_strings_end_with_ellipsis() {
        let out = truncate_to_width("hello world", 6);
        assert_eq!(out, "hello…");
        assert_eq!(out.width(), 6);
    }

    #[test]
    fn wide_characters_count_double() {
        let out = truncate_to_width("日本語のテキスト", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn list_lines_have_fixed_width() {
        let todos = index_todos(vec![
            Todo::new("Short".into()),
            Todo::new("A much longer title ".repeat(10)),
        ]);
        for dt in &todos {
            for today in [true, false] {
                let line = ListLine::new(dt, today);
                let total = 2
                    + line.index.width()
                    + 4
                    + line.title.width()
                    + line.padding
                    + line.marker.width()
                    + line.time_ago.width();
                assert_eq!(total, LINE_WIDTH);
            }
        }
    }

    #[test]
    fn details_include_deletion() {
        let mut todo = Todo::new("Gone".into());
        assert!(!detail_rows(&todo).iter().any(|(k, _)| *k == "deleted"));
        todo.date_deleted = Some(Utc::now());
        assert!(detail_rows(&todo).iter().any(|(k, _)| *k == "deleted"));
        assert_eq!(status(&todo), "deleted");
    }
}
