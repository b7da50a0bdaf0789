use colored::{ColoredString, Colorize};
use tick_core::Urgency;

pub const CHECK_MARK: &str = "\u{2713}";
pub const CROSS_MARK: &str = "\u{2A09}";

/// Green check mark for done tasks, red cross otherwise.
pub fn checkbox(done: bool) -> ColoredString {
    if done {
        CHECK_MARK.green()
    } else {
        CROSS_MARK.red()
    }
}

pub fn checkbox_glyph(done: bool) -> &'static str {
    if done {
        CHECK_MARK
    } else {
        CROSS_MARK
    }
}

/// Table color for a deadline bucket.
pub fn urgency_color(urgency: Urgency) -> Option<comfy_table::Color> {
    match urgency {
        Urgency::Neutral => None,
        Urgency::Urgent => Some(comfy_table::Color::Red),
        Urgency::Warning => Some(comfy_table::Color::Magenta),
        Urgency::Safe => Some(comfy_table::Color::Green),
    }
}

/// Uppercase the first letter of every whitespace separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
