use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceivingError {
    #[error("Config directory not found at {0}. Run 'receiving init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Order file not found: {0}")]
    OrderFileNotFound(PathBuf),

    #[error("Failed to parse order file {path}: {source}")]
    OrderParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Merchant '{0}' not found in the order")]
    MerchantNotFound(String),

    #[error("Nothing awaiting receipt for {0}")]
    EmptyReport(String),

    #[error("Unsupported report language '{0}'. Use 'en' or 'ar'.")]
    UnsupportedLanguage(String),

    #[error("Failed to fetch typeface '{family}': {reason}")]
    FontFetch { family: String, reason: String },

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Specify a report scope: --merchant <id> or --all")]
    ReportScope,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

pub type Result<T> = std::result::Result<T, ReceivingError>;
