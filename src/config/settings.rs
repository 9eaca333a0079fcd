use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub company: Company,
    pub report: ReportSettings,
    pub pdf: PdfSettings,
    pub fonts: FontSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSettings {
    pub default_language: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}

/// Typeface provisioning for right-to-left reports.
#[derive(Debug, Deserialize, Serialize)]
pub struct FontSettings {
    pub arabic_family: String,
    pub arabic_url: String,
    pub cache_dir: String,
}
