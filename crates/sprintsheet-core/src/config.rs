//! Configuration for sprintsheet.
//!
//! Configuration is read from a TOML file, then overridden by environment
//! variables, then validated. Every field has a default so an absent file is
//! a valid (if not very useful) configuration.
//!
//! ```toml
//! [sheet]
//! sheet_id = "1AbC..."
//! sheet_name = "Issues"
//! cache_seconds = 300
//!
//! [server]
//! port = 8000
//!
//! [sprint]
//! done_statuses = ["Done", "Closed"]
//!
//! [[sprints]]
//! name = "Sprint 23"
//! start_date = "2025-01-06"
//! end_date = "2025-01-17"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::resolver::PathResolver;

/// Project name used for env var prefixes and config directories.
pub const PROJECT_NAME: &str = "sprintsheet";

/// Default Google Sheets host.
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";

// ============================================================================
// Sections
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the sheet lives and how to read it.
    pub sheet: SheetConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Sprint metric settings.
    pub sprint: SprintConfig,
    /// Known sprint windows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sprints: Vec<SprintCalendarEntry>,
}

/// Sheet source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Google spreadsheet id.
    pub sheet_id: String,
    /// Tab name inside the spreadsheet.
    pub sheet_name: String,
    /// Base URL of the Sheets host (overridable for tests and proxies).
    pub base_url: String,
    /// Read from a local CSV file instead of Google Sheets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<String>,
    /// Cache time-to-live in seconds.
    pub cache_seconds: u64,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Headers parsed as dates.
    pub date_columns: Vec<String>,
    /// Headers parsed as numbers.
    pub number_columns: Vec<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_id: String::new(),
            sheet_name: "Sheet1".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            csv_path: None,
            cache_seconds: 300,
            timeout_seconds: 30,
            date_columns: ["Created", "Updated", "Resolved", "Due date"]
                .map(String::from)
                .to_vec(),
            number_columns: ["Story Points", "BusinessPoints", "T-Size", "Confidence"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
    /// Page size used when a request does not name one.
    pub default_page_size: usize,
    /// Largest accepted page size.
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: [
                "http://localhost:3000",
                "http://localhost:3001",
                "http://localhost:5173",
            ]
            .map(String::from)
            .to_vec(),
            default_page_size: 100,
            max_page_size: 1000,
        }
    }
}

/// Sprint metric settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintConfig {
    /// Statuses counted as completed (case-insensitive).
    pub done_statuses: Vec<String>,
    /// Issue type counted as a bug (case-insensitive).
    pub bug_issue_type: String,
    /// Board name reported for sprints without a calendar entry.
    /// Empty means "use the sheet name".
    pub board_name: String,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            done_statuses: ["Done", "Closed", "Resolved"].map(String::from).to_vec(),
            bug_issue_type: "Bug".to_string(),
            board_name: String::new(),
        }
    }
}

/// A sprint window declared in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintCalendarEntry {
    /// Sprint label as it appears in the `Sprint` column.
    pub name: String,
    /// Tracker id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Board the sprint belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_name: Option<String>,
    /// Tracker state ("active", "closed", "future").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// First day of the sprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Day the sprint ends (exclusive for working-day counts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Day the sprint was actually closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<NaiveDate>,
    /// Sprint goal.
    pub goal: String,
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Resolver used to locate the config file.
    pub fn resolver() -> PathResolver {
        PathResolver::new(PROJECT_NAME)
    }

    /// Load configuration from the resolved file plus process environment.
    ///
    /// A missing file yields defaults; an unreadable or invalid file is an
    /// error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let config = Self::load_unvalidated(explicit)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`] but without [`Config::validate`], for inspecting
    /// incomplete configuration.
    pub fn load_unvalidated(explicit: Option<&str>) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let mut config = match Self::resolver().config_file(explicit) {
            Some(path) if path.exists() => Self::from_path(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    /// Parse a config file without env overrides or validation.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply `SPRINTSHEET_*` overrides from `lookup`.
    ///
    /// Unparseable numeric overrides are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolver = Self::resolver();
        let get = |suffix: &str| lookup(&resolver.env_var(suffix)).filter(|v| !v.is_empty());

        if let Some(v) = get("SHEET_ID") {
            self.sheet.sheet_id = v;
        }
        if let Some(v) = get("SHEET_NAME") {
            self.sheet.sheet_name = v;
        }
        if let Some(v) = get("CSV_PATH") {
            self.sheet.csv_path = Some(v);
        }
        if let Some(v) = get("HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("PORT") {
            match v.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {v}", resolver.env_var("PORT")),
            }
        }
        if let Some(v) = get("CACHE_SECONDS") {
            match v.parse() {
                Ok(secs) => self.sheet.cache_seconds = secs,
                Err(_) => {
                    tracing::warn!("Ignoring invalid {}: {v}", resolver.env_var("CACHE_SECONDS"))
                }
            }
        }
    }

    /// Check invariants the rest of the system relies on.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.csv_path.is_none() && self.sheet.sheet_id.trim().is_empty() {
            return Err(Error::config(
                "sheet.sheet_id must be set (or sheet.csv_path for a local file)",
            ));
        }
        if self.sheet.cache_seconds == 0 {
            return Err(Error::config("sheet.cache_seconds must be > 0"));
        }
        if self.sheet.timeout_seconds == 0 {
            return Err(Error::config("sheet.timeout_seconds must be > 0"));
        }
        if self.server.max_page_size < 10 {
            return Err(Error::config("server.max_page_size must be >= 10"));
        }
        if !(10..=self.server.max_page_size).contains(&self.server.default_page_size) {
            return Err(Error::config(format!(
                "server.default_page_size must be between 10 and {}",
                self.server.max_page_size
            )));
        }
        for entry in &self.sprints {
            if entry.name.trim().is_empty() {
                return Err(Error::config("sprints entries need a name"));
            }
            if let (Some(start), Some(end)) = (entry.start_date, entry.end_date) {
                if end < start {
                    return Err(Error::config(format!(
                        "sprint '{}' ends before it starts",
                        entry.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Board name for derived sprint info.
    pub fn board_name(&self) -> &str {
        if self.sprint.board_name.is_empty() {
            &self.sheet.sheet_name
        } else {
            &self.sprint.board_name
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.sheet.sheet_id = "abc123".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sheet.cache_seconds, 300);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.default_page_size, 100);
        assert!(config.sheet.date_columns.contains(&"Due date".to_string()));
        assert!(config.sprint.done_statuses.contains(&"Done".to_string()));
    }

    #[test]
    fn test_default_requires_sheet_id() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("sheet_id"));
    }

    #[test]
    fn test_csv_path_replaces_sheet_id() {
        let mut config = Config::default();
        config.sheet.csv_path = Some("issues.csv".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = valid();
        config.server.default_page_size = 5;
        assert!(config.validate().is_err());
        config.server.default_page_size = 2000;
        assert!(config.validate().is_err());
        config.server.default_page_size = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [sheet]
            sheet_id = "xyz"

            [[sprints]]
            name = "Sprint 23"
            start_date = "2025-01-06"
            end_date = "2025-01-17"
            goal = "Ship it"
            "#,
        )
        .unwrap();
        assert_eq!(config.sheet.sheet_id, "xyz");
        assert_eq!(config.sheet.sheet_name, "Sheet1");
        let entry = &config.sprints[0];
        assert_eq!(entry.name, "Sprint 23");
        assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(entry.goal, "Ship it");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reversed_sprint_window_rejected() {
        let mut config = valid();
        config.sprints.push(SprintCalendarEntry {
            name: "S1".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_preserves_calendar() {
        let mut config = valid();
        config.sprints.push(SprintCalendarEntry {
            name: "Sprint 1".into(),
            id: Some(7),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
            ..Default::default()
        });
        let text = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            "SPRINTSHEET_SHEET_ID" => Some("from-env".to_string()),
            "SPRINTSHEET_PORT" => Some("9001".to_string()),
            "SPRINTSHEET_HOST" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.sheet.sheet_id, "from-env");
        assert_eq!(config.server.port, 9001);
        // Empty values do not override.
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| {
            (key == "SPRINTSHEET_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8123\n").unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_unvalidated_accepts_incomplete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8123\n").unwrap();
        let path = path.to_str().unwrap();

        let config = Config::load_unvalidated(Some(path)).unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_board_name_falls_back_to_sheet_name() {
        let mut config = valid();
        config.sheet.sheet_name = "Issues".into();
        assert_eq!(config.board_name(), "Issues");
        config.sprint.board_name = "Team Board".into();
        assert_eq!(config.board_name(), "Team Board");
    }
}
