use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::error::{ReceivingError, Result};
use crate::order::{MerchantGroup, OrderItem, PurchaseOrder};
use crate::report::layout::{
    AllMerchantsDoc, ColumnSpec, DocumentLayout, HeaderBlock, ItemDataWarning, LocaleInfo,
    MerchantBlock, MerchantSection, ReportDocument, SignatureBlock, SingleMerchantDoc, TableBlock,
};
use crate::report::locale::{Language, Locale};

/// Fixed height of the handwritten-notes area.
const NOTES_LINES: u32 = 3;

/// Build the receiving checklist for one merchant: the items still awaiting
/// receipt, a totals strip, signature blocks, and a notes area.
pub fn build_single_merchant_report(
    order: &PurchaseOrder,
    group: &MerchantGroup,
    company: &str,
    language: Language,
    now: DateTime<Local>,
) -> Result<ReportDocument> {
    let locale = Locale::resolve(language);
    let mut warnings = Vec::new();

    let pending: Vec<&OrderItem> = group.items.iter().filter(|i| i.awaits_receipt()).collect();
    if pending.is_empty() {
        return Err(ReceivingError::EmptyReport(format!(
            "merchant '{}'",
            group.name
        )));
    }

    let rows = pending
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let resolved = resolve_item(item, idx + 1, &group.name, &locale, &mut warnings);
            item_row(&resolved, &locale)
        })
        .collect();

    let strings = locale.strings();
    let doc = SingleMerchantDoc {
        header: header_block(order, company, strings.title_single, &locale, now),
        merchant: merchant_block(group, &locale),
        table: TableBlock {
            columns: item_columns(&locale),
            rows,
        },
        totals_line: format!(
            "{}: {}",
            strings.items_total,
            locale.format_quantity(pending.len() as i64)
        ),
        signatures: vec![
            signature_block(strings.received_by, &locale),
            signature_block(strings.approved_by, &locale),
        ],
        notes_label: strings.notes.to_string(),
        notes_lines: NOTES_LINES,
        locale: locale_info(&locale),
    };

    Ok(ReportDocument {
        layout: DocumentLayout::SingleMerchant(doc),
        filename: single_merchant_filename(&group.name, language, now),
        warnings,
    })
}

/// Build one checklist covering every merchant with outstanding items, plus
/// a cross-merchant summary aggregated by item type.
pub fn build_all_merchants_report(
    order: &PurchaseOrder,
    merchants: &[MerchantGroup],
    company: &str,
    language: Language,
    now: DateTime<Local>,
) -> Result<ReportDocument> {
    let locale = Locale::resolve(language);
    let mut warnings = Vec::new();

    let qualifying: Vec<&MerchantGroup> =
        merchants.iter().filter(|g| g.has_pending_items()).collect();
    if qualifying.is_empty() {
        return Err(ReceivingError::EmptyReport(format!(
            "order {}",
            order.number
        )));
    }

    // Aggregate totals keyed by item-type identity, in first-seen order.
    // Each component is a straight sum over the merchant-scoped rows;
    // remaining is never re-derived from the other aggregates.
    let mut index: HashMap<ItemTypeKey, usize> = HashMap::new();
    let mut aggregates: Vec<(ItemTypeKey, TypeTotals)> = Vec::new();

    let mut sections = Vec::new();
    for group in &qualifying {
        let mut rows = Vec::new();
        for (idx, item) in group
            .items
            .iter()
            .filter(|i| i.awaits_receipt())
            .enumerate()
        {
            let resolved = resolve_item(item, idx + 1, &group.name, &locale, &mut warnings);

            let key = ItemTypeKey {
                name: resolved.name.clone(),
                category: resolved.category.clone(),
                unit: resolved.unit.clone(),
            };
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                aggregates.push((key, TypeTotals::default()));
                aggregates.len() - 1
            });
            let totals = &mut aggregates[slot].1;
            totals.ordered += resolved.ordered;
            totals.received += resolved.received;
            totals.remaining += resolved.remaining;

            rows.push(item_row(&resolved, &locale));
        }

        sections.push(MerchantSection {
            merchant: merchant_block(group, &locale),
            table: TableBlock {
                columns: item_columns(&locale),
                rows,
            },
        });
    }

    let summary_rows = aggregates
        .iter()
        .enumerate()
        .map(|(idx, (key, totals))| {
            locale.order_cells(vec![
                locale.format_quantity((idx + 1) as i64),
                key.name.clone(),
                key.category.clone(),
                key.unit.clone(),
                locale.format_quantity(totals.ordered),
                locale.format_quantity(totals.received),
                locale.format_quantity(totals.remaining),
            ])
        })
        .collect();

    let strings = locale.strings();
    let doc = AllMerchantsDoc {
        header: header_block(order, company, strings.title_all, &locale, now),
        sections,
        summary_title: strings.summary_title.to_string(),
        summary: TableBlock {
            columns: item_columns(&locale),
            rows: summary_rows,
        },
        grand_totals: vec![
            format!(
                "{}: {}",
                strings.merchants_total,
                locale.format_quantity(qualifying.len() as i64)
            ),
            format!(
                "{}: {}",
                strings.item_types_total,
                locale.format_quantity(aggregates.len() as i64)
            ),
        ],
        signatures: vec![signature_block(strings.prepared_by, &locale)],
        locale: locale_info(&locale),
    };

    Ok(ReportDocument {
        layout: DocumentLayout::AllMerchants(doc),
        filename: all_merchants_filename(language, now),
        warnings,
    })
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct ItemTypeKey {
    name: String,
    category: String,
    unit: String,
}

#[derive(Debug, Default)]
struct TypeTotals {
    ordered: i64,
    received: i64,
    remaining: i64,
}

/// An item with placeholders substituted and quantities computed.
struct ResolvedItem {
    ordinal: usize,
    name: String,
    category: String,
    unit: String,
    ordered: i64,
    received: i64,
    remaining: i64,
}

fn resolve_item(
    item: &OrderItem,
    ordinal: usize,
    merchant: &str,
    locale: &Locale,
    warnings: &mut Vec<ItemDataWarning>,
) -> ResolvedItem {
    let strings = locale.strings();

    let name = match &item.name {
        Some(n) => n.clone(),
        None => {
            warnings.push(ItemDataWarning {
                merchant: merchant.to_string(),
                ordinal,
                field: "name",
            });
            strings.unknown_item.to_string()
        }
    };
    let unit = match &item.unit {
        Some(u) => u.clone(),
        None => {
            warnings.push(ItemDataWarning {
                merchant: merchant.to_string(),
                ordinal,
                field: "unit",
            });
            strings.default_unit.to_string()
        }
    };
    let category = item
        .category
        .clone()
        .unwrap_or_else(|| strings.default_category.to_string());

    ResolvedItem {
        ordinal,
        name,
        category,
        unit,
        ordered: item.ordered,
        received: item.received_quantity(),
        remaining: item.remaining_quantity(),
    }
}

fn item_row(item: &ResolvedItem, locale: &Locale) -> Vec<String> {
    locale.order_cells(vec![
        locale.format_quantity(item.ordinal as i64),
        item.name.clone(),
        item.category.clone(),
        item.unit.clone(),
        locale.format_quantity(item.ordered),
        locale.format_quantity(item.received),
        locale.format_quantity(item.remaining),
    ])
}

fn item_columns(locale: &Locale) -> Vec<ColumnSpec> {
    let strings = locale.strings();
    let logical = vec![
        (strings.col_ordinal, "center"),
        (strings.col_item, "left"),
        (strings.col_category, "left"),
        (strings.col_unit, "left"),
        (strings.col_ordered, "right"),
        (strings.col_received, "right"),
        (strings.col_remaining, "right"),
    ];
    let mirrored = locale.mirrors_columns();
    locale.order_cells(
        logical
            .into_iter()
            .map(|(label, align)| ColumnSpec {
                label: label.to_string(),
                align: mirror_align(align, mirrored).to_string(),
            })
            .collect(),
    )
}

fn mirror_align(align: &'static str, mirrored: bool) -> &'static str {
    if !mirrored {
        return align;
    }
    match align {
        "left" => "right",
        "right" => "left",
        other => other,
    }
}

fn header_block(
    order: &PurchaseOrder,
    company: &str,
    title: &str,
    locale: &Locale,
    now: DateTime<Local>,
) -> HeaderBlock {
    HeaderBlock {
        title: title.to_string(),
        order_line: format!("{} {}", locale.strings().order_label, order.number),
        company: company.to_string(),
        generated: locale.localize_digits(&now.format("%Y-%m-%d %H:%M").to_string()),
    }
}

fn merchant_block(group: &MerchantGroup, locale: &Locale) -> MerchantBlock {
    let strings = locale.strings();
    let mut contact_lines = Vec::new();
    if let Some(phone) = &group.phone {
        contact_lines.push(format!("{}: {}", strings.phone, phone));
    }
    if let Some(email) = &group.email {
        contact_lines.push(format!("{}: {}", strings.email, email));
    }
    MerchantBlock {
        name: group.name.clone(),
        contact_lines,
    }
}

fn signature_block(role: &str, locale: &Locale) -> SignatureBlock {
    let strings = locale.strings();
    SignatureBlock {
        role: role.to_string(),
        signature_label: strings.signature.to_string(),
        date_label: strings.date.to_string(),
    }
}

fn locale_info(locale: &Locale) -> LocaleInfo {
    LocaleInfo {
        lang: locale.language().code().to_string(),
        direction: locale.direction().code().to_string(),
    }
}

/// Collapse runs of non-alphanumeric characters to single underscores and
/// trim the ends, so merchant names embed cleanly in filenames.
fn sanitize_filename_component(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_gap = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_gap && !out.is_empty() {
                out.push('_');
            }
            pending_gap = false;
            out.push(ch);
        } else {
            pending_gap = true;
        }
    }
    if out.is_empty() {
        out.push_str("Merchant");
    }
    out
}

fn single_merchant_filename(merchant_name: &str, language: Language, now: DateTime<Local>) -> String {
    format!(
        "Receiving_{}_{}_{}.pdf",
        sanitize_filename_component(merchant_name),
        language.code(),
        now.format("%Y-%m-%d")
    )
}

fn all_merchants_filename(language: Language, now: DateTime<Local>) -> String {
    format!(
        "Receiving_All_Merchants_{}_{}.pdf",
        language.code(),
        now.format("%Y-%m-%d")
    )
}
