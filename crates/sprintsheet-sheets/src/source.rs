//! Sheet sources.
//!
//! A [`SheetSource`] produces the raw CSV body of the issue export. The
//! production source is [`GvizSource`], which talks to the Google
//! visualization endpoint; [`FileSource`] reads a local export and
//! [`StaticSource`] serves a fixed body.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sprintsheet_core::config::SheetConfig;
use sprintsheet_core::{Error, Result};

/// Something that can produce the CSV export of the issue sheet.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the full CSV body.
    async fn fetch(&self) -> Result<String>;

    /// Short description for logs and health reporting.
    fn describe(&self) -> String;
}

/// Build the source selected by configuration.
///
/// A configured `csv_path` wins over the Google sheet id.
pub fn source_from_config(config: &SheetConfig) -> Result<Arc<dyn SheetSource>> {
    match &config.csv_path {
        Some(path) => Ok(Arc::new(FileSource::new(path))),
        None => Ok(Arc::new(GvizSource::new(config)?)),
    }
}

// ============================================================================
// Google visualization endpoint
// ============================================================================

/// Reads a sheet through `gviz/tq?tqx=out:csv`.
#[derive(Debug, Clone)]
pub struct GvizSource {
    client: reqwest::Client,
    base_url: String,
    sheet_id: String,
    sheet_name: String,
}

impl GvizSource {
    /// Create a source for the configured sheet.
    pub fn new(config: &SheetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("sprintsheet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::fetch_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sheet_id: config.sheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
        })
    }

    /// The CSV export URL for this sheet.
    pub fn csv_url(&self) -> String {
        csv_url(&self.base_url, &self.sheet_id, &self.sheet_name)
    }
}

/// Build the CSV export URL for a sheet tab.
pub fn csv_url(base_url: &str, sheet_id: &str, sheet_name: &str) -> String {
    format!(
        "{}/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
        base_url.trim_end_matches('/'),
        sheet_id,
        urlencoding::encode(sheet_name)
    )
}

#[async_trait]
impl SheetSource for GvizSource {
    async fn fetch(&self) -> Result<String> {
        let url = self.csv_url();
        tracing::debug!("Fetching sheet from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch_with_source("request to Google Sheets failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!(
                "Google Sheets returned HTTP {status} for sheet '{}'",
                self.sheet_name
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::fetch_with_source("failed to read Google Sheets response", e))
    }

    fn describe(&self) -> String {
        format!("gviz:{}/{}", self.sheet_id, self.sheet_name)
    }
}

// ============================================================================
// Local file
// ============================================================================

/// Reads a CSV export from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path` (a leading `~/` is expanded).
    pub fn new(path: &str) -> Self {
        Self {
            path: sprintsheet_core::util::resolver::expand_tilde(path),
        }
    }
}

#[async_trait]
impl SheetSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::fetch_with_source(format!("failed to read {}", self.path.display()), e)
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// ============================================================================
// Fixed body
// ============================================================================

/// Serves the same CSV body on every fetch.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    /// Create a source named `name` serving `body`.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl SheetSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.name)
    }
}

// ============================================================================
// Tests
// ============================================================================
