use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::classify::classify;
use crate::consolidate::ConsolidatedTable;
use crate::error::{LedgerError, Result};
use crate::ledger::Transaction;
use crate::normalize::{BALANCE, CODE, DETAILS, MONEY_IN, MONEY_OUT, STATUS, TIME};
use crate::schema::Cell;

/// Completion-time formats seen across statement vintages.
const TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Turn the normalized table into fully-typed transactions.
///
/// Parsing here is strict: blank monetary cells were already zero-filled
/// upstream, so anything unparseable at this point is real corruption and
/// fails the build with the offending row and column, never a silent zero.
pub fn derive_transactions(table: &ConsolidatedTable) -> Result<Vec<Transaction>> {
    let column = |name: &'static str| {
        table
            .column_index(name)
            .ok_or(LedgerError::MissingColumn(name))
    };
    let code_col = column(CODE)?;
    let time_col = column(TIME)?;
    let details_col = column(DETAILS)?;
    let status_col = column(STATUS)?;
    let money_in_col = column(MONEY_IN)?;
    let money_out_col = column(MONEY_OUT)?;
    let balance_col = column(BALANCE)?;

    let mut transactions = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let time = parse_timestamp(&row[time_col].text(), row_idx)?;
        let money_in = parse_amount(&row[money_in_col], row_idx, MONEY_IN)?;
        // statements render outflows negative; the ledger keeps magnitudes
        let money_out = parse_amount(&row[money_out_col], row_idx, MONEY_OUT)?.abs();
        let balance = parse_amount(&row[balance_col], row_idx, BALANCE)?;

        let details = row[details_col].text();
        let recipient = details
            .split_once('-')
            .map(|(_, after)| after.to_string());

        let year = time.year();
        let month = time.format("%B").to_string();
        let quarter = (time.month() - 1) / 3 + 1;
        let cohort = format!("{year}_{month}");
        let activity = classify(&details);

        transactions.push(Transaction {
            code: row[code_col].text(),
            time,
            details,
            status: row[status_col].text(),
            money_in,
            money_out,
            balance,
            recipient,
            year,
            month,
            quarter,
            cohort,
            activity,
            total_amount: money_out + money_in,
        });
    }

    Ok(transactions)
}

fn parse_amount(cell: &Cell, row: usize, column: &'static str) -> Result<f64> {
    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Text(raw) => {
            let cleaned = raw.trim().replace(',', "");
            cleaned.parse().map_err(|_| LedgerError::InvalidAmount {
                row,
                column,
                value: raw.clone(),
            })
        }
        Cell::Null => Err(LedgerError::InvalidAmount {
            row,
            column,
            value: String::new(),
        }),
    }
}

fn parse_timestamp(raw: &str, row: usize) -> Result<NaiveDateTime> {
    let value = raw.trim();

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(time);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(LedgerError::InvalidTimestamp {
        row,
        value: raw.to_string(),
    })
}
