use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ReceivingError, Result};

/// A typeface to provision before right-to-left rendering.
#[derive(Debug, Clone)]
pub struct FontSpec {
    pub family: String,
    pub url: String,
}

/// Fetches raw font bytes. Injected so report generation stays testable
/// without network access.
pub trait FontProvider {
    fn fetch(&self, spec: &FontSpec) -> Result<Vec<u8>>;
}

/// Production provider: a plain HTTP GET with a bounded global timeout.
pub struct HttpFontProvider {
    timeout: Duration,
}

impl HttpFontProvider {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFontProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for HttpFontProvider {
    fn fetch(&self, spec: &FontSpec) -> Result<Vec<u8>> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let bytes = agent
            .get(&spec.url)
            .call()
            .map_err(|e| ReceivingError::FontFetch {
                family: spec.family.clone(),
                reason: e.to_string(),
            })?
            .body_mut()
            .read_to_vec()
            .map_err(|e| ReceivingError::FontFetch {
                family: spec.family.clone(),
                reason: e.to_string(),
            })?;

        if bytes.is_empty() {
            return Err(ReceivingError::FontFetch {
                family: spec.family.clone(),
                reason: "empty response body".to_string(),
            });
        }

        Ok(bytes)
    }
}

/// Return the cached font file for `spec`, fetching it first when missing.
/// The cache is keyed by font family. Writes go through a temp file and a
/// rename, so concurrent generations only ever read complete files.
pub fn ensure_cached(
    cache_dir: &Path,
    spec: &FontSpec,
    provider: &dyn FontProvider,
) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir)?;

    let path = cache_dir.join(format!("{}.ttf", file_key(&spec.family)));
    if path.exists() {
        return Ok(path);
    }

    let bytes = provider.fetch(spec)?;

    let tmp = cache_dir.join(format!(
        "{}.ttf.part-{}",
        file_key(&spec.family),
        std::process::id()
    ));
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, &path)?;

    Ok(path)
}

fn file_key(family: &str) -> String {
    family
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
