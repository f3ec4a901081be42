//! Built-in command modules.

pub mod dashboard;
pub mod plugins;
pub mod themes;

pub use dashboard::Dashboard;
pub use plugins::Plugins;
pub use themes::Themes;

use anyhow::Result;

use crate::content::ContentLine;
use crate::layout::{ColumnSpec, TableRow, format_header, format_row};
use crate::registry::Content;
use crate::source::Record;
use crate::theme::ColorRole;

/// Name, Status, Version, Update Available, AU.
#[must_use]
pub fn record_columns() -> ColumnSpec {
    ColumnSpec::flexible_first(
        "Name",
        [
            ("Status", 8),
            ("Version", 10),
            ("Update Available", 17),
            ("AU", 3),
        ],
    )
}

fn record_row(record: &Record) -> TableRow {
    TableRow::new([
        record.name.as_str(),
        record.status.as_str(),
        record.version.as_str(),
        record.update.as_str(),
        record.auto_update.as_str(),
    ])
}

/// Row color: hover for the cursor row, active for rows with an update pending.
#[must_use]
pub fn row_role(record: &Record, under_cursor: bool) -> ColorRole {
    match (record.update_available(), under_cursor) {
        (true, true) => ColorRole::ActiveHover,
        (true, false) => ColorRole::Active,
        (false, true) => ColorRole::Hover,
        (false, false) => ColorRole::Default,
    }
}

/// Header, rule and one row per record, or `empty` when there are none.
///
/// # Errors
/// Fails only if a row does not match the column layout.
pub fn record_table(
    records: Vec<Record>,
    cursor: usize,
    width: usize,
    empty: &str,
) -> Result<Content> {
    if records.is_empty() {
        return Ok(Content::placeholder(empty));
    }
    let columns = record_columns();
    let (header, rule) = format_header(&columns, width);
    let mut lines = vec![
        ContentLine::styled(header, ColorRole::Title),
        ContentLine::plain(rule),
    ];
    for (idx, record) in records.iter().enumerate() {
        let text = format_row(&columns, &record_row(record), width)?;
        lines.push(ContentLine::styled(text, row_role(record, idx == cursor)));
    }
    Ok(Content {
        lines,
        records,
        header_rows: 2,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::record;
    use super::*;

    #[test]
    fn empty_list_renders_placeholder_only() {
        let content = record_table(Vec::new(), 0, 80, "No plugins found.").unwrap();
        assert_eq!(content.lines, vec![ContentLine::plain("No plugins found.")]);
        assert_eq!(content.entry_count(), 0);
    }

    #[test]
    fn cursor_and_updates_pick_row_roles() {
        let records = vec![
            record("akismet", "active", "none", "off"),
            record("jetpack", "inactive", "available", "on"),
            record("hello", "inactive", "available", "off"),
        ];
        let content = record_table(records, 1, 80, "").unwrap();
        assert_eq!(content.header_rows, 2);
        let roles: Vec<_> = content.lines[2..].iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![
                Some(ColorRole::Default),
                Some(ColorRole::ActiveHover),
                Some(ColorRole::Active)
            ]
        );
        assert_eq!(content.lines[0].text.len(), 78);
        assert!(content.lines[3].text.starts_with("jetpack"));
    }

    #[test]
    fn update_column_shows_the_reported_value() {
        let records = vec![
            record("akismet", "active", "none", "off"),
            record("jetpack", "inactive", "available", "on"),
        ];
        let content = record_table(records, 0, 80, "").unwrap();
        let update_cell = |line: usize| {
            content.lines[line]
                .text
                .split('|')
                .nth(3)
                .map(str::trim)
                .map(str::to_string)
        };
        assert_eq!(update_cell(2).as_deref(), Some("none"));
        assert_eq!(update_cell(3).as_deref(), Some("available"));
    }
}
