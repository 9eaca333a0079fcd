use serde::Serialize;

/// Locale facts the rendering backend needs: text direction and language
/// tag. Numeral glyphs and column order are already baked into the cells.
#[derive(Debug, Serialize)]
pub struct LocaleInfo {
    pub lang: String,
    pub direction: String,
}

#[derive(Debug, Serialize)]
pub struct HeaderBlock {
    pub title: String,
    pub order_line: String,
    pub company: String,
    pub generated: String,
}

/// Merchant identity: name plus contact lines with absent fields omitted.
#[derive(Debug, Serialize)]
pub struct MerchantBlock {
    pub name: String,
    pub contact_lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ColumnSpec {
    pub label: String,
    pub align: String,
}

/// A laid-out table: column specs and stringly-typed cells, both already in
/// the locale's column order.
#[derive(Debug, Serialize)]
pub struct TableBlock {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SignatureBlock {
    pub role: String,
    pub signature_label: String,
    pub date_label: String,
}

#[derive(Debug, Serialize)]
pub struct SingleMerchantDoc {
    pub header: HeaderBlock,
    pub merchant: MerchantBlock,
    pub table: TableBlock,
    pub totals_line: String,
    pub signatures: Vec<SignatureBlock>,
    pub notes_label: String,
    pub notes_lines: u32,
    pub locale: LocaleInfo,
}

#[derive(Debug, Serialize)]
pub struct MerchantSection {
    pub merchant: MerchantBlock,
    pub table: TableBlock,
}

#[derive(Debug, Serialize)]
pub struct AllMerchantsDoc {
    pub header: HeaderBlock,
    pub sections: Vec<MerchantSection>,
    pub summary_title: String,
    pub summary: TableBlock,
    pub grand_totals: Vec<String>,
    pub signatures: Vec<SignatureBlock>,
    pub locale: LocaleInfo,
}

#[derive(Debug)]
pub enum DocumentLayout {
    SingleMerchant(SingleMerchantDoc),
    AllMerchants(AllMerchantsDoc),
}

/// Missing item metadata repaired with a placeholder during layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDataWarning {
    pub merchant: String,
    pub ordinal: usize,
    pub field: &'static str,
}

/// A built report: the layout tree for the renderer, the suggested output
/// filename, and the non-fatal data warnings collected along the way.
#[derive(Debug)]
pub struct ReportDocument {
    pub layout: DocumentLayout,
    pub filename: String,
    pub warnings: Vec<ItemDataWarning>,
}
