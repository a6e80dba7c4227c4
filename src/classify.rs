//! Deterministic activity classification over statement description text.
//!
//! Rules are data, not control flow: an ordered list of substring triggers
//! scanned top to bottom, first match wins. The order is the contract; some
//! triggers are substrings of later ones ("Pay Bill" shadows "Pay Bill
//! Charge") and reordering would relabel historic exports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending/income taxonomy for a statement transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Activity {
    Charges,
    #[serde(rename = "Business Payments")]
    BusinessPayments,
    #[serde(rename = "Loan Repayment")]
    LoanRepayment,
    #[serde(rename = "Received-International")]
    ReceivedInternational,
    Airtime,
    Sending,
    Fuliza,
    Withdrawal,
    #[serde(rename = "Buy Bundles")]
    BuyBundles,
    #[serde(rename = "Pay Bills")]
    PayBills,
    #[serde(rename = "Merchant Payments")]
    MerchantPayments,
    Received,
    Overdraft,
    #[serde(rename = "Promotion Payments")]
    PromotionPayments,
    Deposit,
    #[serde(rename = "M-Shwari Deposit")]
    MShwariDeposit,
    #[serde(rename = "M-Shwari Withdraws")]
    MShwariWithdraws,
    #[serde(rename = "M-Shwari Deposits")]
    MShwariDeposits,
    #[serde(rename = "M-Shwari Loan")]
    MShwariLoan,
    Reversal,
    #[serde(rename = "unclassified")]
    Unclassified,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Charges => "Charges",
            Activity::BusinessPayments => "Business Payments",
            Activity::LoanRepayment => "Loan Repayment",
            Activity::ReceivedInternational => "Received-International",
            Activity::Airtime => "Airtime",
            Activity::Sending => "Sending",
            Activity::Fuliza => "Fuliza",
            Activity::Withdrawal => "Withdrawal",
            Activity::BuyBundles => "Buy Bundles",
            Activity::PayBills => "Pay Bills",
            Activity::MerchantPayments => "Merchant Payments",
            Activity::Received => "Received",
            Activity::Overdraft => "Overdraft",
            Activity::PromotionPayments => "Promotion Payments",
            Activity::Deposit => "Deposit",
            Activity::MShwariDeposit => "M-Shwari Deposit",
            Activity::MShwariWithdraws => "M-Shwari Withdraws",
            Activity::MShwariDeposits => "M-Shwari Deposits",
            Activity::MShwariLoan => "M-Shwari Loan",
            Activity::Reversal => "Reversal",
            Activity::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The ordered trigger table. Literal priority order from the provider's
/// statement vocabulary; entries 12 and 20 sit in the shadow of earlier,
/// broader triggers and are kept at their positions regardless.
pub const RULES: &[(&str, Activity)] = &[
    ("Funds Charge", Activity::Charges),
    ("Business Payment from", Activity::BusinessPayments),
    ("Loan Repayment", Activity::LoanRepayment),
    ("Receive International Transfer From", Activity::ReceivedInternational),
    ("Airtime", Activity::Airtime),
    ("Customer Transfer to", Activity::Sending),
    ("Customer Transfer Fuliza", Activity::Fuliza),
    ("Customer Withdrawal At", Activity::Withdrawal),
    ("Withdrawal Charge", Activity::Charges),
    ("Buy Bundles", Activity::BuyBundles),
    ("Pay Bill", Activity::PayBills),
    ("Pay Bill Charge", Activity::Charges),
    ("Merchant Payment", Activity::MerchantPayments),
    ("Funds received from", Activity::Received),
    ("OverDraft", Activity::Overdraft),
    ("Promotion Payment from", Activity::PromotionPayments),
    ("Deposit of Funds at ", Activity::Deposit),
    ("M-Shwari Deposit", Activity::MShwariDeposit),
    ("M-Shwari Withdraw", Activity::MShwariWithdraws),
    ("Pay Merchant Charge", Activity::Charges),
    ("Reversal", Activity::Reversal),
    ("M-Shwari Lock Deposit", Activity::MShwariDeposits),
    ("M-Shwari Loan Disburse", Activity::MShwariLoan),
];

/// Classify a transaction's description. Pure: same text, same label.
pub fn classify(details: &str) -> Activity {
    RULES
        .iter()
        .find(|(trigger, _)| details.contains(trigger))
        .map(|&(_, activity)| activity)
        .unwrap_or(Activity::Unclassified)
}
