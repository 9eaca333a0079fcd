mod builder;
mod layout;
mod locale;

pub use builder::{build_all_merchants_report, build_single_merchant_report};
pub use layout::{
    AllMerchantsDoc, ColumnSpec, DocumentLayout, HeaderBlock, ItemDataWarning, LocaleInfo,
    MerchantBlock, MerchantSection, ReportDocument, SignatureBlock, SingleMerchantDoc, TableBlock,
};
pub use locale::{to_arabic_indic, Direction, Language, Locale};
