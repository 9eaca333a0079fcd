mod settings;

pub use settings::{Company, Config, FontSettings, PdfSettings, ReportSettings};

use crate::error::{ReceivingError, Result};
use crate::order::OrderFile;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.receiving/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "receiving") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.receiving/
    let home = dirs_home().ok_or_else(|| {
        ReceivingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".receiving"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs_home() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReceivingError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReceivingError::ConfigParse { path, source: e })
}

/// Load a purchase-order snapshot from a TOML file
pub fn load_order(path: &Path) -> Result<OrderFile> {
    if !path.exists() {
        return Err(ReceivingError::OrderFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ReceivingError::OrderParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve a configured directory against the config dir: absolute and
/// ~-prefixed paths stand alone, anything else is relative to the config dir.
pub fn resolve_dir(configured: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(configured);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Your Company Name"
# phone = "+1-555-123-4567"              # optional
# email = "warehouse@yourcompany.com"    # optional

[report]
default_language = "en"   # "en" or "ar"

[pdf]
output_dir = "~/.receiving/output"

[fonts]
# Typeface fetched on demand for Arabic reports, cached locally.
arabic_family = "Amiri"
arabic_url = "https://raw.githubusercontent.com/google/fonts/main/ofl/amiri/Amiri-Regular.ttf"
cache_dir = "~/.receiving/fonts"
"#;

/// Template content for the sample order file written by 'receiving init'
pub const ORDER_TEMPLATE: &str = r#"# A purchase-order snapshot used to build receiving checklists.
#
# Each [[merchant]] groups the order items sourced from that merchant.
# Receipts record delivered batches; issues record affected quantities and
# how they were resolved. An issue resolved by redelivery stays outstanding.
#
# Generate a checklist with:
#   receiving report --order sample-order.toml --merchant acme-foods
#   receiving report --order sample-order.toml --all --lang ar

[order]
number = "PO-2026-0001"
created = "2026-07-01"
expected_delivery = "2026-08-15"
currency = "USD"
total = 18750.0

[[merchant]]
id = "acme-foods"
name = "Acme Foods"
phone = "+1-555-010-2200"
email = "orders@acmefoods.example"

[[merchant.item]]
name = "Basmati Rice"
category = "Dry Goods"
unit = "kg"
ordered = 100

[[merchant.item.receipt]]
good = 60
date = "2026-07-20"

[[merchant.item.receipt.issue]]
affected = 40
resolution = "redelivery"
status = "resolved"

[[merchant.item]]
name = "Olive Oil"
category = "Oils"
unit = "bottle"
ordered = 48

[[merchant]]
id = "blue-harvest"
name = "Blue Harvest Co."
email = "supply@blueharvest.example"

[[merchant.item]]
name = "Basmati Rice"
category = "Dry Goods"
unit = "kg"
ordered = 50

[[merchant.item.receipt]]
good = 50
date = "2026-07-18"

[[merchant.item]]
name = "Sea Salt"
unit = "kg"
ordered = 25
"#;
