//! Shared handler state.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use sprintsheet_core::{Config, Result};
use sprintsheet_sheets::SheetService;
use sprintsheet_sprint::SprintRules;
use sprintsheet_table::PageLimits;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    sheets: Arc<SheetService>,
    config: Arc<Config>,
    today: Option<NaiveDate>,
}

impl AppState {
    /// Create state over an existing sheet service.
    pub fn new(sheets: Arc<SheetService>, config: Arc<Config>) -> Self {
        Self {
            sheets,
            config,
            today: None,
        }
    }

    /// Create state and the sheet service from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let sheets = SheetService::from_config(&config)?;
        Ok(Self::new(Arc::new(sheets), Arc::new(config)))
    }

    /// Pin "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The cached sheet service.
    pub fn sheets(&self) -> &SheetService {
        &self.sheets
    }

    /// Loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current local date, or the pinned date.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Page size limits for table queries.
    pub fn page_limits(&self) -> PageLimits {
        PageLimits::from(&self.config.server)
    }

    /// Done/bug rules for sprint metrics.
    pub fn sprint_rules(&self) -> SprintRules {
        SprintRules::from(&self.config.sprint)
    }
}
