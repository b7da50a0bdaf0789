use std::io::{self, Write};

use comfy_table::{presets, Attribute, Cell, Color, Table};
use tick_core::{classify, Category, Task};

use crate::style::{checkbox_glyph, urgency_color};

/// Flat task table plus the number of tasks not yet done.
///
/// Rows keep the order of `tasks`; the deadline column is classified
/// against `now`.
pub fn task_table(tasks: &[Task], now: i64) -> (Table, usize) {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec![
        Cell::new("  "),
        Cell::new("ID").fg(Color::Green),
        Cell::new("Description").fg(Color::Green),
        Cell::new("Until").fg(Color::Green),
        Cell::new("Category").fg(Color::Green),
    ]);

    let mut todo = 0;
    for task in tasks {
        if !task.done {
            todo += 1;
        }

        let bucket = classify(task.until, now);
        let mut until = Cell::new(bucket.to_string());
        if let Some(color) = urgency_color(bucket.urgency()) {
            until = until.fg(color);
        }

        table.add_row(vec![
            Cell::new(checkbox_glyph(task.done))
                .fg(if task.done { Color::Green } else { Color::Red }),
            Cell::new(task.id)
                .add_attribute(Attribute::Bold)
                .fg(Color::Red),
            Cell::new(&task.description).add_attribute(Attribute::Bold),
            until,
            Cell::new(&task.category_name),
        ]);
    }

    table.add_row(vec![
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new("ToDo").fg(Color::Green),
        Cell::new(todo),
    ]);

    (table, todo)
}

/// Write the flat task table and return the not-done count.
pub fn render_table<W: Write>(out: &mut W, tasks: &[Task], now: i64) -> io::Result<usize> {
    let (table, todo) = task_table(tasks, now);
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(todo)
}

pub fn category_table(categories: &[Category]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for category in categories {
        table.add_row(vec![category.id.to_string(), category.name.clone()]);
    }
    table
}

pub fn render_categories<W: Write>(out: &mut W, categories: &[Category]) -> io::Result<()> {
    writeln!(out, "{}", category_table(categories))
}

#[cfg(test)]
mod tests {
    use tick_core::deadline::SECONDS_PER_DAY;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn task(id: i64, description: &str, until: i64, done: bool) -> Task {
        Task {
            id,
            description: description.to_string(),
            created: NOW,
            until,
            done,
            category_id: 2,
            category_name: "home".to_string(),
        }
    }

    fn row_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.trim().is_empty()).collect()
    }

    #[test]
    fn counts_open_tasks() {
        let tasks = vec![
            task(1, "Clean Room", 0, false),
            task(2, "Add Tests", NOW + 10_000, true),
            task(3, "Go Shopping", NOW + 200_000, false),
        ];
        let (_table, todo) = task_table(&tasks, NOW);
        assert_eq!(todo, 2);
    }

    #[test]
    fn rows_follow_input_order() {
        let tasks = vec![
            task(7, "Later", NOW + 9 * SECONDS_PER_DAY, false),
            task(2, "Soon", NOW + 10_000, false),
            task(5, "Whenever", 0, true),
        ];

        let mut out = Vec::new();
        let todo = render_table(&mut out, &tasks, NOW).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = row_lines(&text);

        assert_eq!(todo, 2);
        assert!(lines[0].contains("Description") && lines[0].contains("Category"));
        assert!(lines[1].contains("Later") && lines[1].contains("9w"));
        assert!(lines[2].contains("Soon") && lines[2].contains("2h"));
        assert!(lines[3].contains("Whenever") && lines[3].contains(" - "));
        assert!(lines[3].contains("✓"));
        assert!(lines[4].contains("ToDo") && lines[4].trim_end().ends_with('2'));
    }

    #[test]
    fn empty_table_still_has_footer() {
        let mut out = Vec::new();
        let todo = render_table(&mut out, &[], NOW).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(todo, 0);
        assert!(text.contains("ToDo"));
    }

    #[test]
    fn categories_listed_in_given_order() {
        let categories = vec![
            Category { id: 1, name: "default".into() },
            Category { id: 2, name: "home".into() },
        ];
        let mut out = Vec::new();
        render_categories(&mut out, &categories).unwrap();
        let text = String::from_utf8(out).unwrap();

        let default_at = text.find("default").unwrap();
        let home_at = text.find("home").unwrap();
        assert!(text.contains("Name"));
        assert!(default_at < home_at);
    }
}
