use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

/// Column order of the exported CSV; matches `Transaction`'s serde names.
const HEADERS: [&str; 14] = [
    "CODE",
    "TIME",
    "DETAILS",
    "STATUS",
    "MONEY IN",
    "MONEY OUT",
    "BALANCE",
    "RECIPIENT",
    "year",
    "month",
    "quarter",
    "COHORT",
    "ACTIVITY",
    "TOTAL AMOUNT",
];

/// Serialize a (possibly filtered) ledger to CSV bytes for download.
/// An empty selection still yields the header row.
pub fn write_csv(ledger: &Ledger) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for transaction in ledger.transactions() {
        writer.serialize(transaction)?;
    }

    writer
        .into_inner()
        .map_err(|e| LedgerError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Activity;
    use crate::ledger::Transaction;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction {
            code: "QA7XK1".to_string(),
            time: NaiveDate::from_ymd_opt(2020, 3, 15)
                .unwrap()
                .and_hms_opt(14, 22, 10)
                .unwrap(),
            details: "Customer Transfer to 254712 - John".to_string(),
            status: "Completed".to_string(),
            money_in: 0.0,
            money_out: 1250.0,
            balance: 4750.5,
            recipient: Some(" John".to_string()),
            year: 2020,
            month: "March".to_string(),
            quarter: 1,
            cohort: "2020_March".to_string(),
            activity: Activity::Sending,
            total_amount: 1250.0,
        }
    }

    #[test]
    fn test_csv_has_canonical_headers_and_values() {
        let bytes = write_csv(&Ledger::new(vec![sample()])).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "CODE,TIME,DETAILS,STATUS,MONEY IN,MONEY OUT,BALANCE,RECIPIENT,year,month,quarter,COHORT,ACTIVITY,TOTAL AMOUNT"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("QA7XK1,2020-03-15 14:22:10,"));
        assert!(row.contains("Sending"));
        assert!(row.contains("2020_March"));
    }

    #[test]
    fn test_empty_ledger_exports_header_only() {
        let bytes = write_csv(&Ledger::default()).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
