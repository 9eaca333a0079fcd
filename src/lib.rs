pub mod config;
pub mod error;
pub mod order;
pub mod pdf;
pub mod report;

pub use config::{Company, Config};
pub use error::{ReceivingError, Result};
pub use order::{
    Issue, IssueResolution, IssueStatus, MerchantGroup, OrderFile, OrderItem, PurchaseOrder,
    Receipt,
};
pub use report::{
    build_all_merchants_report, build_single_merchant_report, Language, ReportDocument,
};
