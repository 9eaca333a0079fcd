mod model;

pub use model::{
    Issue, IssueResolution, IssueStatus, MerchantGroup, OrderFile, OrderItem, PurchaseOrder,
    Receipt,
};
