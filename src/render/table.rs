//! ASCII table rendering.
//!
//! Each section becomes one row and each of its lines one cell. Rows of
//! different widths are not padded or truncated: uneven data is treated as
//! not tabular at all and reported as [`TableOutcome::StructuralFallback`].

use log::debug;

use crate::model::QueryResult;

use super::text::code_block;

/// Row data derived from a query result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowMatrix {
    rows: Vec<Vec<String>>,
}

impl RowMatrix {
    /// Build a matrix from rows of cells.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// One row per section, one cell per line.
    pub fn from_result(result: &QueryResult) -> Self {
        Self::new(
            result
                .sections()
                .iter()
                .map(|s| s.lines.clone())
                .collect(),
        )
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Common cell count, or the first row that breaks it.
    pub fn uniform_width(&self) -> Result<usize, FallbackReason> {
        let Some(first) = self.rows.first() else {
            return Err(FallbackReason::Empty);
        };
        let expected = first.len();
        if expected == 0 {
            return Err(FallbackReason::Empty);
        }
        for (row, cells) in self.rows.iter().enumerate().skip(1) {
            if cells.len() != expected {
                return Err(FallbackReason::UnevenRows {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(expected)
    }

    fn column_widths(&self, columns: usize) -> Vec<usize> {
        let mut widths = vec![1; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let widest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                widths[i] = widths[i].max(widest);
            }
        }
        widths
    }

    /// Draw the grid without the code block wrapper.
    fn draw(&self, columns: usize) -> String {
        let widths = self.column_widths(columns);
        let rule = |fill: char| {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };

        let mut out = vec![rule('-')];
        for (r, row) in self.rows.iter().enumerate() {
            let cell_lines: Vec<Vec<&str>> = row.iter().map(|c| c.lines().collect()).collect();
            let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

            for h in 0..height {
                let mut line = String::from("|");
                for (c, w) in widths.iter().enumerate() {
                    let text = cell_lines[c].get(h).copied().unwrap_or("");
                    line.push_str(&format!(" {:<width$} |", text, width = w));
                }
                out.push(line);
            }

            let fill = if r == 0 && self.rows.len() > 1 { '=' } else { '-' };
            out.push(rule(fill));
        }
        out.join("\n")
    }
}

/// Why row data could not be tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No rows, or rows without cells
    Empty,
    /// A row's cell count differs from the first row's
    UnevenRows {
        /// Index of the offending row
        row: usize,
        /// Cell count of the first row
        expected: usize,
        /// Cell count of the offending row
        found: usize,
    },
}

/// A successfully drawn table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// The tabulated rows
    pub matrix: RowMatrix,
    /// Grid text wrapped in a code block, ready to send
    pub text: String,
}

/// Result of attempting a table rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// Uniform rows, drawn as a grid
    Table(RenderedTable),
    /// Row data is not tabular; render as flat text instead
    StructuralFallback(FallbackReason),
}

impl TableOutcome {
    /// The rendered table, if tabulation succeeded.
    pub fn table(&self) -> Option<&RenderedTable> {
        match self {
            TableOutcome::Table(t) => Some(t),
            TableOutcome::StructuralFallback(_) => None,
        }
    }

    /// Check if this is a structural fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, TableOutcome::StructuralFallback(_))
    }
}

/// Table renderer.
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    lang: String,
}

impl TableRenderer {
    /// Create a renderer wrapping tables in an untagged code block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code block language tag.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Attempt to tabulate a query result.
    pub fn render(&self, result: &QueryResult) -> TableOutcome {
        let matrix = RowMatrix::from_result(result);
        match matrix.uniform_width() {
            Ok(columns) => {
                let text = code_block(&matrix.draw(columns), &self.lang);
                debug!("table: {} x {}, {} bytes", matrix.row_count(), columns, text.len());
                TableOutcome::Table(RenderedTable { matrix, text })
            }
            Err(reason) => {
                debug!("table: structural fallback ({:?})", reason);
                TableOutcome::StructuralFallback(reason)
            }
        }
    }
}

/// Attempt to tabulate a query result with default settings.
pub fn to_table(result: &QueryResult) -> TableOutcome {
    TableRenderer::new().render(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn result(rows: &[&[&str]]) -> QueryResult {
        QueryResult::new(rows.iter().map(|cells| Section {
            lines: cells.iter().map(|c| c.to_string()).collect(),
            ..Section::default()
        }))
    }

    #[test]
    fn test_single_column_table() {
        let outcome = to_table(&result(&[&["4"], &["2+2=4"]]));
        let table = outcome.table().expect("uniform rows should tabulate");

        let expected = "```\n\
            +-------+\n\
            | 4     |\n\
            +=======+\n\
            | 2+2=4 |\n\
            +-------+\n\
            ```";
        assert_eq!(table.text, expected);
        assert_eq!(table.matrix.row_count(), 2);
    }

    #[test]
    fn test_multi_line_cells() {
        let outcome = to_table(&result(&[&["a", "b\nbb"], &["ccc", "d"]]));
        let table = outcome.table().unwrap();

        let expected = "```\n\
            +-----+----+\n\
            | a   | b  |\n\
            |     | bb |\n\
            +=====+====+\n\
            | ccc | d  |\n\
            +-----+----+\n\
            ```";
        assert_eq!(table.text, expected);
    }

    #[test]
    fn test_single_row_has_no_header_rule() {
        let outcome = to_table(&result(&[&["only"]]));
        assert_eq!(
            outcome.table().unwrap().text,
            "```\n+------+\n| only |\n+------+\n```"
        );
    }

    #[test]
    fn test_uneven_rows_fall_back() {
        let outcome = to_table(&result(&[&["a", "b"], &["c"]]));
        assert_eq!(
            outcome,
            TableOutcome::StructuralFallback(FallbackReason::UnevenRows {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_image_only_section_breaks_width() {
        let result = QueryResult::new(vec![
            Section::with_line("a"),
            Section::new().image("http://img"),
        ]);
        assert!(to_table(&result).is_fallback());
    }

    #[test]
    fn test_empty_result_falls_back() {
        assert_eq!(
            to_table(&QueryResult::default()),
            TableOutcome::StructuralFallback(FallbackReason::Empty)
        );
    }

    #[test]
    fn test_lang_tag() {
        let outcome = TableRenderer::new()
            .with_lang("text")
            .render(&result(&[&["x"]]));
        assert!(outcome.table().unwrap().text.starts_with("```text\n"));
    }

    #[test]
    fn test_columns_align_on_characters() {
        let outcome = to_table(&result(&[&["é"], &["ab"]]));
        let text = &outcome.table().unwrap().text;
        assert!(text.contains("| é  |"));
        assert!(text.contains("| ab |"));
    }
}
