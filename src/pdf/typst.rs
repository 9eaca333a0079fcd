use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::error::{ReceivingError, Result};
use crate::report::{DocumentLayout, ReportDocument};

/// Embedded Typst template for the single-merchant checklist
/// Placeholders are replaced with the data file path and the main typeface
const SINGLE_MERCHANT_TEMPLATE: &str = r##"// Receiving checklist template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#let dir = if data.locale.direction == "rtl" { rtl } else { ltr }

#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 1.8cm, right: 1.8cm),
)

#set text(font: ("MAIN_FONT", "Helvetica"), size: 10pt, dir: dir, lang: data.locale.lang)

#let cell-align(name) = {
  if name == "right" { right } else if name == "center" { center } else { left }
}

#let quantity-table(spec) = table(
  columns: spec.columns.len(),
  align: (x, y) => cell-align(spec.columns.at(x).align),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 7pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },
  ..spec.columns.map(c => [*#c.label*]),
  ..spec.rows.flatten(),
)

// Header: title, order number, company, generation timestamp
#grid(
  columns: (1fr, auto),
  align: (start, end),
  [
    #text(size: 18pt, weight: "bold")[#data.header.title]
    #v(0.3em)
    #data.header.order_line \
    #data.header.company
  ],
  [
    #text(size: 9pt, fill: gray)[#data.header.generated]
  ],
)

#v(0.6em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(0.8em)

// Merchant identity; absent contact fields are already omitted
#text(weight: "bold", size: 12pt)[#data.merchant.name]
#for line in data.merchant.contact_lines [
  \ #line
]

#v(1em)

#quantity-table(data.table)

#v(0.8em)
#text(weight: "bold")[#data.totals_line]

#v(2.5em)

// Signature blocks: role, blank signature line, blank date line
#grid(
  columns: (1fr, 1fr),
  gutter: 3em,
  ..data.signatures.map(s => [
    #text(weight: "bold")[#s.role]
    #v(2em)
    #line(length: 80%, stroke: 0.5pt)
    #text(size: 9pt)[#s.signature_label]
    #v(1.6em)
    #line(length: 80%, stroke: 0.5pt)
    #text(size: 9pt)[#s.date_label]
  ]),
)

#v(2em)

// Ruled notes area
#text(weight: "bold")[#data.notes_label]
#for _ in range(data.notes_lines) [
  #v(1.4em)
  #line(length: 100%, stroke: 0.5pt + gray)
]
"##;

/// Embedded Typst template for the all-merchants checklist
const ALL_MERCHANTS_TEMPLATE: &str = r##"// All-merchants receiving checklist template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#let dir = if data.locale.direction == "rtl" { rtl } else { ltr }

#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 1.8cm, right: 1.8cm),
)

#set text(font: ("MAIN_FONT", "Helvetica"), size: 10pt, dir: dir, lang: data.locale.lang)

#let cell-align(name) = {
  if name == "right" { right } else if name == "center" { center } else { left }
}

#let quantity-table(spec) = table(
  columns: spec.columns.len(),
  align: (x, y) => cell-align(spec.columns.at(x).align),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 7pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },
  ..spec.columns.map(c => [*#c.label*]),
  ..spec.rows.flatten(),
)

// Header: title, order number, company, generation timestamp
#grid(
  columns: (1fr, auto),
  align: (start, end),
  [
    #text(size: 18pt, weight: "bold")[#data.header.title]
    #v(0.3em)
    #data.header.order_line \
    #data.header.company
  ],
  [
    #text(size: 9pt, fill: gray)[#data.header.generated]
  ],
)

#v(0.6em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(0.8em)

// One section per qualifying merchant. The identity header is sticky so it
// is never stranded at a page bottom away from its table; the table itself
// may continue across pages.
#for section in data.sections [
  #block(sticky: true)[
    #text(weight: "bold", size: 12pt)[#section.merchant.name]
    #for line in section.merchant.contact_lines [
      \ #line
    ]
    #v(0.4em)
  ]
  #quantity-table(section.table)
  #v(1.4em)
]

#block(sticky: true)[
  #text(weight: "bold", size: 14pt)[#data.summary_title]
  #v(0.4em)
]
#quantity-table(data.summary)

#v(0.8em)
#for line in data.grand_totals [
  #text(weight: "bold")[#line] \
]

#v(2.5em)

#grid(
  columns: (1fr, 1fr),
  gutter: 3em,
  ..data.signatures.map(s => [
    #text(weight: "bold")[#s.role]
    #v(2em)
    #line(length: 80%, stroke: 0.5pt)
    #text(size: 9pt)[#s.signature_label]
    #v(1.6em)
    #line(length: 80%, stroke: 0.5pt)
    #text(size: 9pt)[#s.date_label]
  ]),
)
"##;

/// A provisioned typeface for rendering: the family name Typst should
/// select, plus the directory holding the fetched font file.
#[derive(Debug, Clone)]
pub struct RenderFont {
    pub family: String,
    pub dir: PathBuf,
}

/// Render a built report to PDF using the Typst CLI
pub fn render_pdf(
    document: &ReportDocument,
    output_path: &PathBuf,
    font: Option<&RenderFont>,
) -> Result<()> {
    match &document.layout {
        DocumentLayout::SingleMerchant(doc) => compile(
            SINGLE_MERCHANT_TEMPLATE,
            "single_merchant",
            doc,
            output_path,
            font,
        ),
        DocumentLayout::AllMerchants(doc) => compile(
            ALL_MERCHANTS_TEMPLATE,
            "all_merchants",
            doc,
            output_path,
            font,
        ),
    }
}

fn compile<T: Serialize>(
    template: &str,
    stem: &str,
    data: &T,
    output_path: &PathBuf,
    font: Option<&RenderFont>,
) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(ReceivingError::TypstNotFound);
    }

    // Create temp directory for template
    let temp_dir = std::env::temp_dir().join("receiving-cli");
    std::fs::create_dir_all(&temp_dir)?;

    // Serialize layout tree to JSON
    let json_data =
        serde_json::to_string(data).map_err(|e| ReceivingError::PdfGeneration(e.to_string()))?;

    let data_filename = format!("{stem}_data.json");
    let json_path = temp_dir.join(&data_filename);
    std::fs::write(&json_path, &json_data)?;

    // Write template with the data path and main typeface substituted
    let main_font = font.map(|f| f.family.as_str()).unwrap_or("Helvetica");
    let template_content = template
        .replace("DATA_JSON_PATH", &data_filename)
        .replace("MAIN_FONT", main_font);
    let template_path = temp_dir.join(format!("{stem}.typ"));
    std::fs::write(&template_path, &template_content)?;

    // Run typst compile with root set to temp directory, pointing it at the
    // fetched font directory when one was provisioned
    let mut command = Command::new("typst");
    command.args([
        "compile",
        "--root",
        temp_dir.to_str().unwrap(),
    ]);
    if let Some(font) = font {
        command.arg("--font-path").arg(font_dir_arg(&font.dir));
    }
    let output = command
        .arg(template_path.to_str().unwrap())
        .arg(output_path.to_str().unwrap())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReceivingError::PdfGeneration(stderr.to_string()));
    }

    // Clean up temp files
    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);

    Ok(())
}

fn font_dir_arg(dir: &Path) -> &str {
    dir.to_str().unwrap_or(".")
}
