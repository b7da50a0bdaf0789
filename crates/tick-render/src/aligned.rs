use std::io::{self, Write};

use colored::Colorize;
use indexmap::IndexMap;
use tick_core::Task;

use crate::style::{checkbox, title_case};

/// Tasks of one category, as shown in the grouped view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedGroup {
    pub category: String,
    pub tasks: Vec<Task>,
    pub done_count: usize,
    pub total_count: usize,
}

impl AlignedGroup {
    fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            tasks: Vec::new(),
            done_count: 0,
            total_count: 0,
        }
    }

    fn push(&mut self, task: &Task) {
        self.total_count += 1;
        if task.done {
            self.done_count += 1;
        }
        self.tasks.push(task.clone());
    }
}

/// Completion counts across every rendered group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub done: usize,
}

impl Summary {
    pub fn remaining(&self) -> usize {
        self.total - self.done
    }
}

/// Group tasks by category name in a single pass.
///
/// Groups come out in the order their category is first seen, and tasks keep
/// their relative order within a group.
pub fn group_by_category(tasks: &[Task]) -> Vec<AlignedGroup> {
    let mut groups: IndexMap<&str, AlignedGroup> = IndexMap::new();
    for task in tasks {
        groups
            .entry(task.category_name.as_str())
            .or_insert_with(|| AlignedGroup::new(&task.category_name))
            .push(task);
    }
    groups.into_values().collect()
}

/// Write the grouped view and return the global counts.
///
/// ```text
/// Home - [1/2]
///     ✓  1 Clean Room
///     ⨉  3 Go Shopping
///
/// 1 left, 1 done
/// ```
pub fn render_aligned<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<Summary> {
    let mut summary = Summary::default();

    writeln!(out)?;
    for group in group_by_category(tasks) {
        render_group(out, &group)?;
        writeln!(out)?;
        summary.total += group.total_count;
        summary.done += group.done_count;
    }

    writeln!(out, "{} left, {} done", summary.remaining(), summary.done)?;
    writeln!(out)?;
    Ok(summary)
}

fn render_group<W: Write>(out: &mut W, group: &AlignedGroup) -> io::Result<()> {
    writeln!(
        out,
        "{} - [{}/{}]",
        title_case(&group.category).underline(),
        group.done_count,
        group.total_count
    )?;

    for task in &group.tasks {
        let description = if task.done {
            task.description.strikethrough()
        } else {
            task.description.normal()
        };
        writeln!(out, "    {}  {} {}", checkbox(task.done), task.id, description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, description: &str, category: &str, done: bool) -> Task {
        Task {
            id,
            description: description.to_string(),
            created: 0,
            until: 0,
            done,
            category_id: 0,
            category_name: category.to_string(),
        }
    }

    fn render(tasks: &[Task]) -> (String, Summary) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let summary = render_aligned(&mut out, tasks).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn groups_in_first_seen_order() {
        let tasks = vec![
            task(1, "Clean Room", "home", false),
            task(2, "Add Tests", "coding", true),
            task(3, "Go Shopping", "home", true),
            task(4, "Read", "default", false),
        ];

        let groups = group_by_category(&tasks);
        let names: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["home", "coding", "default"]);

        let home = &groups[0];
        assert_eq!((home.done_count, home.total_count), (1, 2));
        let ids: Vec<i64> = home.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn input_order_decides_group_order() {
        let tasks = vec![task(5, "b", "zeta", false), task(1, "a", "alpha", false)];
        let names: Vec<String> = group_by_category(&tasks).into_iter().map(|g| g.category).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn renders_groups_and_summary() {
        let tasks = vec![
            task(1, "Clean Room", "home", true),
            task(2, "Add Tests", "coding", false),
            task(3, "Go Shopping", "home", false),
        ];

        let (text, summary) = render(&tasks);
        let expected = "\n\
Home - [1/2]
    ✓  1 Clean Room
    ⨉  3 Go Shopping

Coding - [0/1]
    ⨉  2 Add Tests

2 left, 1 done

";
        assert_eq!(text, expected);
        assert_eq!(summary, Summary { total: 3, done: 1 });
        assert_eq!(summary.remaining(), 2);
    }

    #[test]
    fn empty_listing_only_prints_summary() {
        let (text, summary) = render(&[]);
        assert_eq!(text, "\n0 left, 0 done\n\n");
        assert_eq!(summary, Summary::default());
    }
}
