//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

use crate::db::UserSummary;

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Comma-separated member names, or "-" when there are none
pub fn format_members(members: &[UserSummary]) -> String {
    if members.is_empty() {
        "-".to_string()
    } else {
        members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
