//! TTL-cached access to the parsed sheet.
//!
//! [`SheetService`] owns a [`SheetSource`] and serves the parsed sheet from
//! memory until it is older than the configured TTL. Concurrent callers that
//! miss the cache share one fetch. A failed fetch keeps the previous entry
//! in place and marks the [`SourceHandle`] failed.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;
use sprintsheet_core::{Config, Result, Sheet, SourceHandle};
use tokio::sync::Mutex;

use crate::parse::{ParseOptions, parse_csv};
use crate::source::{SheetSource, source_from_config};

/// Default cache lifetime (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A parsed sheet with the instant it was stored.
struct CachedSheet {
    sheet: Arc<Sheet>,
    stored_at: Instant,
}

/// Cached, parsed view of a sheet source.
pub struct SheetService {
    source: Arc<dyn SheetSource>,
    options: ParseOptions,
    ttl: Duration,
    cached: RwLock<Option<CachedSheet>>,
    fetch_lock: Mutex<()>,
    handle: SourceHandle,
}

impl SheetService {
    /// Create a service over `source`.
    pub fn new(source: Arc<dyn SheetSource>, options: ParseOptions, ttl: Duration) -> Self {
        let handle = SourceHandle::new(source.describe());
        Self {
            source,
            options,
            ttl,
            cached: RwLock::new(None),
            fetch_lock: Mutex::new(()),
            handle,
        }
    }

    /// Create a service from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = source_from_config(&config.sheet)?;
        Ok(Self::new(
            source,
            ParseOptions::from(&config.sheet),
            Duration::from_secs(config.sheet.cache_seconds),
        ))
    }

    /// The parsed sheet, fetching when the cache is empty or stale.
    pub async fn sheet(&self) -> Result<Arc<Sheet>> {
        if let Some(sheet) = self.fresh_cached() {
            tracing::debug!("Sheet cache hit ({} rows)", sheet.len());
            return Ok(sheet);
        }

        let _guard = self.fetch_lock.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(sheet) = self.fresh_cached() {
            return Ok(sheet);
        }
        self.fetch_and_store().await
    }

    /// Fetch regardless of cache age.
    pub async fn refresh(&self) -> Result<Arc<Sheet>> {
        let _guard = self.fetch_lock.lock().await;
        self.fetch_and_store().await
    }

    /// Age of the current cache entry, if any.
    pub fn cache_age(&self) -> Option<Duration> {
        let cache = self.cached.read().ok()?;
        cache.as_ref().map(|c| c.stored_at.elapsed())
    }

    /// Health handle updated after every fetch.
    pub fn handle(&self) -> &SourceHandle {
        &self.handle
    }

    /// Description of the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    fn fresh_cached(&self) -> Option<Arc<Sheet>> {
        let cache = self.cached.read().ok()?;
        let cached = cache.as_ref()?;
        (cached.stored_at.elapsed() < self.ttl).then(|| Arc::clone(&cached.sheet))
    }

    async fn fetch_and_store(&self) -> Result<Arc<Sheet>> {
        let started = Instant::now();
        match self.load().await {
            Ok(sheet) => {
                let sheet = Arc::new(sheet);
                let mut cache = self.cached.write().unwrap_or_else(PoisonError::into_inner);
                *cache = Some(CachedSheet {
                    sheet: Arc::clone(&sheet),
                    stored_at: Instant::now(),
                });
                drop(cache);

                self.handle.mark_ready();
                tracing::info!(
                    "Fetched {} rows x {} columns from {} in {}ms",
                    sheet.len(),
                    sheet.columns().len(),
                    self.source.describe(),
                    started.elapsed().as_millis()
                );
                Ok(sheet)
            }
            Err(e) => {
                tracing::warn!("Sheet fetch from {} failed: {e}", self.source.describe());
                self.handle.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn load(&self) -> Result<Sheet> {
        let body = self.source.fetch().await?;
        parse_csv(&body, &self.options, Utc::now())
    }
}

impl std::fmt::Debug for SheetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetService")
            .field("source", &self.source.describe())
            .field("ttl", &self.ttl)
            .field("cache_age", &self.cache_age())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
