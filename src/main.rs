mod config;
mod error;
mod order;
mod pdf;
mod report;

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::config::{
    config_dir, load_config, load_order, resolve_dir, CONFIG_TEMPLATE, ORDER_TEMPLATE,
};
use crate::error::{ReceivingError, Result};
use crate::order::{MerchantGroup, OrderFile};
use crate::pdf::{ensure_cached, render_pdf, FontSpec, HttpFontProvider, RenderFont};
use crate::report::{
    build_all_merchants_report, build_single_merchant_report, DocumentLayout, Language,
    ReportDocument,
};

#[derive(Parser)]
#[command(name = "receiving")]
#[command(version, about = "CLI for purchase-order receiving checklists", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.receiving or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List the merchant groups on an order
    Merchants {
        /// Path to the order file
        #[arg(long)]
        order: PathBuf,
    },

    /// List order items with received and remaining quantities
    Items {
        /// Path to the order file
        #[arg(long)]
        order: PathBuf,

        /// Restrict the listing to one merchant id
        #[arg(short, long)]
        merchant: Option<String>,
    },

    /// Show receiving progress for an order
    Status {
        /// Path to the order file
        #[arg(long)]
        order: PathBuf,
    },

    /// Generate a receiving checklist PDF
    Report {
        /// Path to the order file
        #[arg(long)]
        order: PathBuf,

        /// Merchant id from the order file
        #[arg(short, long, conflicts_with = "all")]
        merchant: Option<String>,

        /// Cover every merchant with outstanding items
        #[arg(long)]
        all: bool,

        /// Report language: en or ar (default from config)
        #[arg(short, long)]
        lang: Option<String>,

        /// Custom output file path (default: output_dir/<suggested name>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Merchants { order } => cmd_merchants(&order),
        Commands::Items { order, merchant } => cmd_items(&order, merchant.as_deref()),
        Commands::Status { order } => cmd_status(&cfg_dir, &order),
        Commands::Report {
            order,
            merchant,
            all,
            lang,
            output,
            open,
        } => cmd_report(&cfg_dir, &order, merchant.as_deref(), all, lang, output, open),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReceivingError::AlreadyInitialized(cfg_dir.clone()));
    }

    // Create directories
    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    // Write template files
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("sample-order.toml"), ORDER_TEMPLATE)?;

    println!("Initialized receiving config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Describe your order:        see {}/sample-order.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then generate your first checklist:");
    println!("  receiving report --order <order.toml> --merchant <merchant-id>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct MerchantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ITEMS")]
    items: usize,
    #[tabled(rename = "AWAITING")]
    awaiting: usize,
}

#[derive(Tabled)]
struct ItemListRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "MERCHANT")]
    merchant: String,
    #[tabled(rename = "ITEM")]
    item: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "ORDERED")]
    ordered: i64,
    #[tabled(rename = "RECEIVED")]
    received: i64,
    #[tabled(rename = "REMAINING")]
    remaining: i64,
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Append a merged totals strip to the items table: the five leading label
/// columns collapse into one cell, the three quantity columns keep their
/// widths so the sums line up under ORDERED / RECEIVED / REMAINING.
fn add_quantity_footer(table: &str, ordered: &str, received: &str, remaining: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 8 {
        return table.to_string();
    }

    // Merge #, MERCHANT, ITEM, CATEGORY, UNIT into one label cell
    let left_width = widths[..5].iter().sum::<usize>() + 4; // +4 for the four ┴ replaced by spaces
    let ordered_width = widths[5];
    let received_width = widths[6];
    let remaining_width = widths[7];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    out.push_str(&format!(
        "├{}┴{}┴{}┴{}┴{}┼{}┼{}┼{}┤\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(widths[3]),
        "─".repeat(widths[4]),
        "─".repeat(ordered_width),
        "─".repeat(received_width),
        "─".repeat(remaining_width),
    ));

    out.push_str(&format!(
        "│ {:>left$} │ {:>ow$} │ {:>rw$} │ {:>mw$} │\n",
        "TOTALS",
        ordered,
        received,
        remaining,
        left = left_width - 2,
        ow = ordered_width - 2,
        rw = received_width - 2,
        mw = remaining_width - 2
    ));

    out.push_str(&format!(
        "╰{}┴{}┴{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(ordered_width),
        "─".repeat(received_width),
        "─".repeat(remaining_width)
    ));

    out
}

/// List the merchant groups on an order
fn cmd_merchants(order_path: &Path) -> Result<()> {
    let order_file = load_order(order_path)?;

    if order_file.merchants.is_empty() {
        println!("No merchants on order {}.", order_file.order.number);
        return Ok(());
    }

    let rows: Vec<MerchantRow> = order_file
        .merchants
        .iter()
        .map(|group| MerchantRow {
            id: group.id.clone(),
            name: group.name.clone(),
            email: group.email.clone().unwrap_or_else(|| "-".to_string()),
            items: group.items.len(),
            awaiting: group.awaiting_count(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn find_merchant<'a>(order_file: &'a OrderFile, id: &str) -> Result<&'a MerchantGroup> {
    order_file
        .merchants
        .iter()
        .find(|g| g.id == id)
        .ok_or_else(|| ReceivingError::MerchantNotFound(id.to_string()))
}

/// List order items with computed quantities and a totals footer
fn cmd_items(order_path: &Path, merchant: Option<&str>) -> Result<()> {
    let order_file = load_order(order_path)?;

    let groups: Vec<&MerchantGroup> = match merchant {
        Some(id) => vec![find_merchant(&order_file, id)?],
        None => order_file.merchants.iter().collect(),
    };

    let mut rows = Vec::new();
    let mut total_ordered = 0i64;
    let mut total_received = 0i64;
    let mut total_remaining = 0i64;
    let mut awaiting = 0usize;

    for group in &groups {
        for item in &group.items {
            let received = item.received_quantity();
            let remaining = item.remaining_quantity();
            total_ordered += item.ordered;
            total_received += received;
            total_remaining += remaining;
            if item.awaits_receipt() {
                awaiting += 1;
            }
            rows.push(ItemListRow {
                index: rows.len() + 1,
                merchant: group.name.clone(),
                item: item.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                category: item
                    .category
                    .clone()
                    .unwrap_or_else(|| "Uncategorized".to_string()),
                unit: item.unit.clone().unwrap_or_else(|| "units".to_string()),
                ordered: item.ordered,
                received,
                remaining,
            });
        }
    }

    if rows.is_empty() {
        println!("No items on order {}.", order_file.order.number);
        return Ok(());
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_quantity_footer(
        &table,
        &format_grouped_int(total_ordered),
        &format_grouped_int(total_received),
        &format_grouped_int(total_remaining),
    );
    println!("{table}");

    println!();
    println!("{awaiting} item(s) awaiting receipt");

    Ok(())
}

/// Show receiving progress for an order
fn cmd_status(cfg_dir: &PathBuf, order_path: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReceivingError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let order_file = load_order(order_path)?;
    let order = &order_file.order;

    let item_count: usize = order_file.merchants.iter().map(|g| g.items.len()).sum();
    let awaiting: usize = order_file.merchants.iter().map(|g| g.awaiting_count()).sum();
    let pending_merchants = order_file
        .merchants
        .iter()
        .filter(|g| g.has_pending_items())
        .count();

    println!("Receiving Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!("Order:            {} (created {})", order.number, order.created);
    if let Some(expected) = order.expected_delivery {
        println!("Expected:         {expected}");
    }
    println!(
        "Order total:      {} {}",
        order.currency,
        format_grouped_int(order.total.round() as i64)
    );
    println!("Merchants:        {}", order_file.merchants.len());
    println!("Items:            {item_count}");
    println!("Awaiting receipt: {awaiting} item(s) across {pending_merchants} merchant(s)");

    Ok(())
}

/// Generate a receiving checklist PDF
fn cmd_report(
    cfg_dir: &PathBuf,
    order_path: &Path,
    merchant: Option<&str>,
    all: bool,
    lang: Option<String>,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReceivingError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let order_file = load_order(order_path)?;

    let lang_code = lang.unwrap_or_else(|| config.report.default_language.clone());
    let language = Language::parse(&lang_code)?;

    let now = Local::now();
    let document = match (merchant, all) {
        (Some(id), _) => {
            let group = find_merchant(&order_file, id)?;
            build_single_merchant_report(
                &order_file.order,
                group,
                &config.company.name,
                language,
                now,
            )?
        }
        (None, true) => build_all_merchants_report(
            &order_file.order,
            &order_file.merchants,
            &config.company.name,
            language,
            now,
        )?,
        (None, false) => return Err(ReceivingError::ReportScope),
    };

    // Right-to-left rendering needs the Arabic typeface on disk before any
    // text is placed; fetch failures abort here, before rendering starts.
    let font = match language {
        Language::Ar => {
            let cache_dir = resolve_dir(&config.fonts.cache_dir, cfg_dir);
            let spec = FontSpec {
                family: config.fonts.arabic_family.clone(),
                url: config.fonts.arabic_url.clone(),
            };
            let provider = HttpFontProvider::new();
            ensure_cached(&cache_dir, &spec, &provider)?;
            Some(RenderFont {
                family: config.fonts.arabic_family.clone(),
                dir: cache_dir,
            })
        }
        Language::En => None,
    };

    // Determine output path
    let pdf_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_dir(&config.pdf.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            output_dir.join(&document.filename)
        }
    };

    render_pdf(&document, &pdf_path, font.as_ref())?;

    print_report_summary(&document, &lang_code, &pdf_path);

    if open {
        open_path(&pdf_path)?;
    }

    Ok(())
}

fn print_report_summary(document: &ReportDocument, lang_code: &str, pdf_path: &Path) {
    match &document.layout {
        DocumentLayout::SingleMerchant(doc) => {
            println!("Generated receiving checklist for '{}'", doc.merchant.name);
            println!("  Items:      {}", doc.table.rows.len());
        }
        DocumentLayout::AllMerchants(doc) => {
            println!("Generated all-merchants receiving checklist");
            println!("  Merchants:  {}", doc.sections.len());
            println!("  Item types: {}", doc.summary.rows.len());
        }
    }
    println!("  Language:   {lang_code}");
    println!("  Saved:      {}", pdf_path.display());

    if !document.warnings.is_empty() {
        for w in &document.warnings {
            eprintln!(
                "Warning: item {} from {} is missing its {}; placeholder used",
                w.ordinal, w.merchant, w.field
            );
        }
        eprintln!(
            "Warning: {} item field(s) were missing; placeholders used",
            document.warnings.len()
        );
    }
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReceivingError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReceivingError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", pdf_path.to_str().unwrap_or("")])
            .spawn()
            .map_err(ReceivingError::Io)?;
    }
    Ok(())
}
