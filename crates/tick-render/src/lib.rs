//! Terminal rendering of task listings.
//!
//! Renderers take already-ordered tasks and write to any [`std::io::Write`]
//! sink; they never touch the store.

pub mod aligned;
pub mod style;
pub mod table;

pub use aligned::{group_by_category, render_aligned, AlignedGroup, Summary};
pub use table::{category_table, render_categories, render_table, task_table};
