use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::classify::Activity;

/// One ledger row. Serde names follow the statement's display vocabulary so
/// exports read like the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "CODE")]
    pub code: String,

    #[serde(rename = "TIME", with = "statement_time")]
    pub time: NaiveDateTime,

    #[serde(rename = "DETAILS")]
    pub details: String,

    #[serde(rename = "STATUS")]
    pub status: String,

    #[serde(rename = "MONEY IN")]
    pub money_in: f64,

    #[serde(rename = "MONEY OUT")]
    pub money_out: f64,

    #[serde(rename = "BALANCE")]
    pub balance: f64,

    /// Counterparty text after the first dash in DETAILS, if any.
    #[serde(rename = "RECIPIENT")]
    pub recipient: Option<String>,

    pub year: i32,

    /// Full month name ("January" .. "December").
    pub month: String,

    pub quarter: u32,

    /// Year-month bucket label, `"{year}_{month}"`.
    #[serde(rename = "COHORT")]
    pub cohort: String,

    #[serde(rename = "ACTIVITY")]
    pub activity: Activity,

    /// MONEY OUT + MONEY IN.
    #[serde(rename = "TOTAL AMOUNT")]
    pub total_amount: f64,
}

mod statement_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        time: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The consolidated transaction ledger: built once per statement, ordered
/// ascending by time, immutable afterwards. The dashboard reads it through
/// filters, distinct-value accessors and summaries; it never mutates rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Build a ledger, establishing the time ordering. The sort is stable:
    /// rows sharing a timestamp keep their statement order.
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|t| t.time);
        Ledger { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct years, ascending. Selector fodder for the dashboard.
    pub fn years(&self) -> Vec<i32> {
        self.transactions
            .iter()
            .map(|t| t.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct month names, alphabetical.
    pub fn months(&self) -> Vec<String> {
        self.transactions
            .iter()
            .map(|t| t.month.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct activities, ordered by label.
    pub fn activities(&self) -> Vec<Activity> {
        let mut distinct: Vec<Activity> = self
            .transactions
            .iter()
            .map(|t| t.activity)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        distinct.sort_by_key(|a| a.label());
        distinct
    }

    /// Read-only selection; the original ledger is untouched.
    pub fn filter(&self, filter: &LedgerFilter) -> Ledger {
        Ledger {
            transactions: self
                .transactions
                .iter()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect(),
        }
    }

    /// Aggregate by (cohort, activity, recipient): transaction count and
    /// money-in / money-out / total sums. Deterministic key order.
    pub fn summarize(&self) -> Vec<CohortSummary> {
        let mut groups: BTreeMap<(String, Activity, Option<String>), CohortSummary> =
            BTreeMap::new();

        for t in &self.transactions {
            let key = (t.cohort.clone(), t.activity, t.recipient.clone());
            let entry = groups.entry(key).or_insert_with(|| CohortSummary {
                cohort: t.cohort.clone(),
                activity: t.activity,
                recipient: t.recipient.clone(),
                count: 0,
                money_in: 0.0,
                money_out: 0.0,
                total_amount: 0.0,
            });
            entry.count += 1;
            entry.money_in += t.money_in;
            entry.money_out += t.money_out;
            entry.total_amount += t.total_amount;
        }

        groups.into_values().collect()
    }
}

/// Dashboard filter state. `None` fields pass every transaction, matching
/// an unselected widget.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Exact-match year.
    pub year: Option<i32>,
    /// Month-name membership.
    pub months: Option<Vec<String>>,
    /// Activity membership.
    pub activities: Option<Vec<Activity>>,
}

impl LedgerFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(year) = self.year {
            if transaction.year != year {
                return false;
            }
        }
        if let Some(months) = &self.months {
            if !months.contains(&transaction.month) {
                return false;
            }
        }
        if let Some(activities) = &self.activities {
            if !activities.contains(&transaction.activity) {
                return false;
            }
        }
        true
    }
}

/// One aggregation row for the dashboard's grouped view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub cohort: String,
    pub activity: Activity,
    pub recipient: Option<String>,
    pub count: usize,
    pub money_in: f64,
    pub money_out: f64,
    pub total_amount: f64,
}
