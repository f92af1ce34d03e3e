//! Terminal styling for the board rendering.

use console::{Color, StyledObject, style};

use crate::client::board::category_color_index;
use crate::ticket::{Priority, TicketStatus};

/// Display color buckets for category labels, indexed by
/// `category_color_index`.
pub const CATEGORY_PALETTE: [Color; 5] = [
    Color::Blue,
    Color::Magenta,
    Color::Red,
    Color::Cyan,
    Color::Green,
];

/// Human column title for a status.
pub fn column_title(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Todo => "To Do",
        TicketStatus::InProgress => "In Progress",
        TicketStatus::Done => "Done",
    }
}

pub fn priority_badge(priority: Priority) -> StyledObject<&'static str> {
    match priority {
        Priority::High => style("High").red(),
        Priority::Medium => style("Medium").yellow(),
        Priority::Low => style("Low").green(),
    }
}

pub fn category_badge(category: &str) -> StyledObject<&str> {
    style(category).fg(CATEGORY_PALETTE[category_color_index(category)])
}
