use log::debug;

use crate::error::{LedgerError, Result};
use crate::schema::{Cell, RawTable};

/// Label substituted for column headers the extraction step could not read.
/// Repeated for every missing header in a page, never deduplicated.
pub const NULL_COLUMN_LABEL: &str = "null_column";

/// Columns blank beyond this percentage are stray cell boundaries from the
/// PDF grid, not data. Sparse-but-real columns (optional narrative fields)
/// stay under it.
const BLANK_PRUNE_THRESHOLD_PCT: usize = 98;

/// All statement pages stacked under the first data page's header.
#[derive(Debug, Clone)]
pub struct ConsolidatedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ConsolidatedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Stack a statement's per-page tables into one table.
///
/// The first table is the title block and is discarded. The second table is
/// the reference: its (repaired) labels become the consolidated header and
/// are never pruned. Every later page has its missing labels repaired and
/// its near-empty artifact columns dropped, then must line up with the
/// reference column-for-column. Alignment is positional, so a divergent
/// column count would silently shift every cell one slot over; that is an
/// ingestion failure, not a merge.
pub fn consolidate(tables: &[RawTable]) -> Result<ConsolidatedTable> {
    if tables.len() < 2 {
        return Err(LedgerError::EmptyStatement);
    }

    let reference = &tables[1];
    let columns = repaired_labels(reference);
    let width = columns.len();

    let mut rows: Vec<Vec<Cell>> = reference
        .rows
        .iter()
        .map(|row| squared_row(row, width))
        .collect();

    for (page, table) in tables.iter().enumerate().skip(2) {
        let counts = blank_counts(table);
        let total = table.rows.len();

        // Exact integer comparison: a column is pruned only when its blank
        // share strictly exceeds the threshold (99% goes, 97% and 98% stay).
        let kept: Vec<usize> = (0..table.width())
            .filter(|&col| counts[col] * 100 <= total * BLANK_PRUNE_THRESHOLD_PCT)
            .collect();

        if kept.len() < table.width() {
            debug!(
                "page {}: pruned {} near-empty column(s)",
                page,
                table.width() - kept.len()
            );
        }

        if kept.len() != width {
            return Err(LedgerError::ColumnCountMismatch {
                page,
                expected: width,
                found: kept.len(),
            });
        }

        for row in &table.rows {
            let squared = squared_row(row, table.width());
            rows.push(kept.iter().map(|&col| squared[col].clone()).collect());
        }
    }

    debug!(
        "consolidated {} page(s) into {} rows x {} columns",
        tables.len(),
        rows.len(),
        width
    );

    Ok(ConsolidatedTable { columns, rows })
}

/// Per-column percentage of blank cells, for extraction-quality profiling.
/// An empty table profiles as fully present.
pub fn missing_percentages(table: &RawTable) -> Vec<f64> {
    let counts = blank_counts(table);
    if table.rows.is_empty() {
        return vec![0.0; table.width()];
    }
    counts
        .iter()
        .map(|&blank| 100.0 * blank as f64 / table.rows.len() as f64)
        .collect()
}

fn blank_counts(table: &RawTable) -> Vec<usize> {
    let mut counts = vec![0usize; table.width()];
    for row in &table.rows {
        for (col, count) in counts.iter_mut().enumerate() {
            // cells past a short row's end are blank
            if row.get(col).map_or(true, Cell::is_blank) {
                *count += 1;
            }
        }
    }
    counts
}

fn repaired_labels(table: &RawTable) -> Vec<String> {
    table
        .columns
        .iter()
        .map(|label| match label {
            Some(l) => l.clone(),
            None => NULL_COLUMN_LABEL.to_string(),
        })
        .collect()
}

/// Rectangularity repair within a single page: pad short rows with nulls,
/// drop cells past the header width.
fn squared_row(row: &[Cell], width: usize) -> Vec<Cell> {
    let mut out = row.to_vec();
    out.resize(width, Cell::Null);
    out
}
