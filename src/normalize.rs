use log::debug;

use crate::consolidate::ConsolidatedTable;
use crate::error::{LedgerError, Result};
use crate::schema::Cell;

pub const CODE: &str = "CODE";
pub const TIME: &str = "TIME";
pub const DETAILS: &str = "DETAILS";
pub const STATUS: &str = "STATUS";
pub const MONEY_IN: &str = "MONEY IN";
pub const MONEY_OUT: &str = "MONEY OUT";
pub const BALANCE: &str = "BALANCE";

/// Statement header -> canonical column name. The STATUS source header
/// carries an embedded carriage return, exactly as extracted from the PDF.
const RENAMES: &[(&str, &str)] = &[
    ("Receipt No.", CODE),
    ("Completion Time", TIME),
    ("Details", DETAILS),
    ("Transaction\rStatus", STATUS),
    ("Paid In", MONEY_IN),
    ("Withdrawn", MONEY_OUT),
    ("Balance", BALANCE),
];

const MONETARY_COLUMNS: &[&str] = &[MONEY_IN, MONEY_OUT, BALANCE];

/// Canonicalize headers and repair the rows the statement layout injects.
///
/// Rows without a receipt code are subtotal/footer furniture, not
/// transactions, and are dropped. Blank monetary cells mean "zero" in this
/// statement format (the renderer elides zero amounts), so they are filled
/// here. Default-fill stops at blanks; everything non-blank goes through
/// field derivation's strict parsing untouched.
pub fn normalize(mut table: ConsolidatedTable) -> Result<ConsolidatedTable> {
    for label in table.columns.iter_mut() {
        if let Some(&(_, canonical)) = RENAMES.iter().find(|(source, _)| *source == label.as_str()) {
            *label = canonical.to_string();
        }
    }

    for &(_, canonical) in RENAMES {
        if table.column_index(canonical).is_none() {
            return Err(LedgerError::MissingColumn(canonical));
        }
    }

    let code = table.column_index(CODE).unwrap();
    let details = table.column_index(DETAILS).unwrap();

    let before = table.rows.len();
    table.rows.retain(|row| !row[code].is_blank());
    if table.rows.len() < before {
        debug!(
            "dropped {} code-less subtotal/footer row(s)",
            before - table.rows.len()
        );
    }

    let monetary: Vec<usize> = MONETARY_COLUMNS
        .iter()
        .map(|name| table.column_index(name).unwrap())
        .collect();

    for row in table.rows.iter_mut() {
        if let Cell::Text(text) = &row[details] {
            if text.contains('\r') {
                row[details] = Cell::Text(text.replace('\r', " "));
            }
        }
        for &col in &monetary {
            if row[col].is_blank() {
                row[col] = Cell::Number(0.0);
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn statement_table(rows: Vec<Vec<Cell>>) -> ConsolidatedTable {
        ConsolidatedTable {
            columns: vec![
                "Receipt No.".to_string(),
                "Completion Time".to_string(),
                "Details".to_string(),
                "Transaction\rStatus".to_string(),
                "Paid In".to_string(),
                "Withdrawn".to_string(),
                "Balance".to_string(),
            ],
            rows,
        }
    }

    fn sample_row(code: &str) -> Vec<Cell> {
        vec![
            text(code),
            text("2020-03-01 10:15:00"),
            text("Pay Bill to KPLC"),
            text("Completed"),
            Cell::Null,
            text("-1,200.00"),
            text("4,500.00"),
        ]
    }

    #[test]
    fn test_headers_become_canonical() {
        let table = normalize(statement_table(vec![sample_row("QA1")])).unwrap();
        assert_eq!(
            table.columns,
            vec![CODE, TIME, DETAILS, STATUS, MONEY_IN, MONEY_OUT, BALANCE]
        );
    }

    #[test]
    fn test_missing_statement_column_is_an_error() {
        let table = ConsolidatedTable {
            columns: vec!["Receipt No.".to_string(), "Details".to_string()],
            rows: vec![],
        };
        assert!(matches!(
            normalize(table),
            Err(LedgerError::MissingColumn(TIME))
        ));
    }

    #[test]
    fn test_codeless_rows_are_dropped() {
        let mut footer = sample_row("");
        footer[0] = Cell::Null;
        let mut subtotal = sample_row("  ");
        subtotal[2] = text("Disbursements Total");
        let table = normalize(statement_table(vec![
            sample_row("QA1"),
            footer,
            subtotal,
            sample_row("QA2"),
        ]))
        .unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], text("QA2"));
    }

    #[test]
    fn test_carriage_returns_in_details_become_spaces() {
        let mut row = sample_row("QA1");
        row[2] = text("Customer Transfer\rto 0712");
        let table = normalize(statement_table(vec![row])).unwrap();
        assert_eq!(table.rows[0][2], text("Customer Transfer to 0712"));
    }

    #[test]
    fn test_blank_monetary_cells_are_zero_filled() {
        let mut row = sample_row("QA1");
        row[4] = Cell::Null;
        row[5] = text(" ");
        let table = normalize(statement_table(vec![row])).unwrap();

        assert_eq!(table.rows[0][4], Cell::Number(0.0));
        assert_eq!(table.rows[0][5], Cell::Number(0.0));
        // non-blank cells are left for strict parsing
        assert_eq!(table.rows[0][6], text("4,500.00"));
    }
}
