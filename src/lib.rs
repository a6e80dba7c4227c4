//! # M-Pesa Ledger
//!
//! A library for consolidating a personal M-Pesa statement (extracted from
//! a password-protected PDF into per-page raw tables) into one typed,
//! classified transaction ledger with read-only filtering, aggregation and
//! CSV export for a dashboard UI.
//!
//! ## Core Concepts
//!
//! - **Statement Extract**: the hand-off from the PDF extraction step: one
//!   raw table per page, headers possibly missing, cells possibly blank
//! - **Consolidation**: pages stacked positionally under the first data
//!   page's header, artifact columns pruned, misaligned pages rejected
//! - **Normalization**: canonical column names, footer rows dropped, blank
//!   monetary cells zero-filled
//! - **Derivation**: strict money/timestamp parsing, counterparty
//!   extraction, year/month/quarter/cohort buckets
//! - **Classification**: ordered substring rules mapping description text to
//!   a fixed activity taxonomy, `unclassified` fallback
//!
//! ## Example
//!
//! ```rust,ignore
//! use mpesa_ledger::*;
//!
//! let extract: StatementExtract = serde_json::from_str(&extraction_json)?;
//! let ledger = build_ledger(&extract.tables)?;
//!
//! let march = ledger.filter(&LedgerFilter {
//!     year: Some(2020),
//!     months: Some(vec!["March".to_string()]),
//!     ..Default::default()
//! });
//! let csv_bytes = write_csv(&march)?;
//! ```

pub mod classify;
pub mod consolidate;
pub mod derive;
pub mod error;
pub mod export;
pub mod ledger;
pub mod normalize;
pub mod schema;

pub use classify::{classify, Activity, RULES};
pub use consolidate::{consolidate, missing_percentages, ConsolidatedTable, NULL_COLUMN_LABEL};
pub use derive::derive_transactions;
pub use error::{LedgerError, Result};
pub use export::write_csv;
pub use ledger::{CohortSummary, Ledger, LedgerFilter, Transaction};
pub use normalize::normalize;
pub use schema::{Cell, RawTable, StatementExtract};

use log::{debug, info};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct LedgerBuilder;

impl LedgerBuilder {
    /// Run the four pipeline stages over a statement's extracted tables.
    ///
    /// Fatal conditions (no ledger produced): an extract with no data
    /// tables, pages whose column counts diverge after pruning, and
    /// unparseable monetary or timestamp fields. Everything else the
    /// statement layout is known to do (missing headers, blank monetary
    /// cells, code-less footer rows) is repaired in place.
    pub fn build(tables: &[schema::RawTable]) -> Result<Ledger> {
        info!("building ledger from {} extracted table(s)", tables.len());

        let consolidated = consolidate::consolidate(tables)?;
        let normalized = normalize::normalize(consolidated)?;
        let transactions = derive::derive_transactions(&normalized)?;
        let ledger = Ledger::new(transactions);

        debug!(
            "ledger spans {} transaction(s) across year(s) {:?}",
            ledger.len(),
            ledger.years()
        );

        Ok(ledger)
    }
}

pub fn build_ledger(tables: &[schema::RawTable]) -> Result<Ledger> {
    LedgerBuilder::build(tables)
}
