//! Fixed-column table formatting.
//!
//! A table is described by a [`ColumnSpec`]: an ordered list of labelled
//! columns, each with a fixed character width. Width `0` marks the single
//! flexible column which absorbs whatever the viewport leaves over.

use thiserror::Error;
use tracing::warn;

/// Columns reserved for the surrounding pane border.
pub const TABLE_MARGIN: usize = 2;

const SEPARATOR: char = '|';
const RULE: char = '-';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("table declares {0} flexible columns, at most one is allowed")]
    TooManyFlexible(usize),
    #[error("row has {got} cells but the table has {expected} columns")]
    ColumnMismatch { expected: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    /// `0` means flexible.
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

/// Widths resolved against a concrete viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub widths: Vec<usize>,
    /// The flexible column would have gone negative and was clamped to zero.
    pub clamped: bool,
}

impl ResolvedColumns {
    /// Total rendered width including separators.
    #[must_use]
    pub fn total_width(&self) -> usize {
        self.widths.iter().sum::<usize>() + self.widths.len().saturating_sub(1)
    }
}

impl ColumnSpec {
    /// # Errors
    /// Returns [`LayoutError::TooManyFlexible`] if more than one column has width `0`.
    pub fn new<I, S>(columns: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(label, width)| Column {
                label: label.into(),
                width,
            })
            .collect();
        let flexible = columns.iter().filter(|c| c.width == 0).count();
        if flexible > 1 {
            return Err(LayoutError::TooManyFlexible(flexible));
        }
        Ok(Self { columns })
    }

    /// A flexible first column followed by fixed ones.
    ///
    /// Fixed widths of `0` are bumped to `1` so the result is always valid.
    pub fn flexible_first<S: Into<String>>(
        flexible: S,
        fixed: impl IntoIterator<Item = (&'static str, usize)>,
    ) -> Self {
        let mut columns = vec![Column {
            label: flexible.into(),
            width: 0,
        }];
        columns.extend(fixed.into_iter().map(|(label, width)| Column {
            label: label.to_string(),
            width: width.max(1),
        }));
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assign the viewport remainder to the flexible column.
    ///
    /// The remainder is `viewport - fixed - separators - TABLE_MARGIN`. When the
    /// fixed columns do not fit, the flexible width is clamped to zero and the
    /// overflow is reported through `clamped` instead of failing.
    #[must_use]
    pub fn resolve(&self, viewport_width: usize) -> ResolvedColumns {
        let fixed: usize = self.columns.iter().map(|c| c.width).sum();
        let separators = self.columns.len().saturating_sub(1);
        let needed = fixed + separators + TABLE_MARGIN;
        let flex = viewport_width.checked_sub(needed);
        let has_flexible = self.columns.iter().any(|c| c.width == 0);
        let clamped = has_flexible && flex.is_none();
        if clamped {
            warn!(
                viewport_width,
                needed, "fixed columns exceed viewport, flexible column clamped to 0"
            );
        }
        let widths = self
            .columns
            .iter()
            .map(|c| {
                if c.width == 0 {
                    flex.unwrap_or(0)
                } else {
                    c.width
                }
            })
            .collect();
        ResolvedColumns { widths, clamped }
    }
}

/// One table row; cell order follows the [`ColumnSpec`] it is rendered under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

fn pad_cell(text: &str, width: usize) -> String {
    // Overlong text is kept whole and simply overflows its column.
    format!("{text:<width$}")
}

fn join_cells<'a>(cells: impl Iterator<Item = (&'a str, usize)>) -> String {
    let mut line = String::new();
    for (idx, (text, width)) in cells.enumerate() {
        if idx > 0 {
            line.push(SEPARATOR);
        }
        line.push_str(&pad_cell(text, width));
    }
    line
}

/// Render the header line and its `-` rule for `columns`.
#[must_use]
pub fn format_header(columns: &ColumnSpec, viewport_width: usize) -> (String, String) {
    let resolved = columns.resolve(viewport_width);
    let header = join_cells(
        columns
            .columns
            .iter()
            .map(|c| c.label.as_str())
            .zip(resolved.widths.iter().copied()),
    );

    let mut rule = String::new();
    for (idx, (column, width)) in columns.columns.iter().zip(&resolved.widths).enumerate() {
        let cell_len = (*width).max(column.label.chars().count());
        if idx > 0 {
            rule.push(SEPARATOR);
        }
        rule.extend(std::iter::repeat(RULE).take(cell_len));
    }
    (header, rule)
}

/// Render one row under the header produced for the same `columns`.
///
/// # Errors
/// Returns [`LayoutError::ColumnMismatch`] when the row and the spec disagree on
/// the number of columns.
pub fn format_row(
    columns: &ColumnSpec,
    row: &TableRow,
    viewport_width: usize,
) -> Result<String, LayoutError> {
    if row.cells.len() != columns.len() {
        return Err(LayoutError::ColumnMismatch {
            expected: columns.len(),
            got: row.cells.len(),
        });
    }
    let resolved = columns.resolve(viewport_width);
    Ok(join_cells(
        row.cells
            .iter()
            .map(String::as_str)
            .zip(resolved.widths.iter().copied()),
    ))
}
