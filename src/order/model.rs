use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parsed order file: the purchase-order header plus its merchant groups.
#[derive(Debug, Deserialize, Serialize)]
pub struct OrderFile {
    pub order: PurchaseOrder,
    #[serde(default, rename = "merchant")]
    pub merchants: Vec<MerchantGroup>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PurchaseOrder {
    pub number: String,
    pub created: NaiveDate,
    #[serde(default)]
    pub expected_delivery: Option<NaiveDate>,
    pub currency: String,
    pub total: f64,
}

/// A merchant identity plus the order items sourced from that merchant.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MerchantGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "item")]
    pub items: Vec<OrderItem>,
}

impl MerchantGroup {
    /// Count of items still awaiting receipt from this merchant.
    pub fn awaiting_count(&self) -> usize {
        self.items.iter().filter(|i| i.awaits_receipt()).count()
    }

    pub fn has_pending_items(&self) -> bool {
        self.items.iter().any(|i| i.awaits_receipt())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrderItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub ordered: i64,
    #[serde(default, rename = "receipt")]
    pub receipts: Vec<Receipt>,
}

impl OrderItem {
    /// Total quantity accepted without defect across all receipts.
    pub fn received_quantity(&self) -> i64 {
        self.receipts.iter().map(|r| r.good).sum()
    }

    /// Quantity considered resolved: good receipts plus issue quantities,
    /// excluding issues the merchant must redeliver.
    pub fn processed_quantity(&self) -> i64 {
        self.receipts
            .iter()
            .map(|r| {
                r.good
                    + r.issues
                        .iter()
                        .filter(|i| i.counts_as_processed())
                        .map(|i| i.affected)
                        .sum::<i64>()
            })
            .sum()
    }

    /// Ordered minus processed. Negative on over-receipt; rendered as-is.
    pub fn remaining_quantity(&self) -> i64 {
        self.ordered - self.processed_quantity()
    }

    pub fn awaits_receipt(&self) -> bool {
        self.remaining_quantity() > 0
    }
}

/// One delivered batch for an item.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Receipt {
    pub good: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "issue")]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Issue {
    pub affected: i64,
    pub resolution: IssueResolution,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub note: Option<String>,
}

impl Issue {
    /// An issue counts toward processed quantity unless it was resolved by
    /// redelivery, in which case the affected quantity stays outstanding.
    pub fn counts_as_processed(&self) -> bool {
        !(self.resolution == IssueResolution::Redelivery && self.status == IssueStatus::Resolved)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueResolution {
    Redelivery,
    Refund,
    Replacement,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    Open,
    Resolved,
}
