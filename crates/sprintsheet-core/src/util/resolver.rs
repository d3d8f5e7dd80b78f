//! Config file path resolution.
//!
//! `PathResolver` locates the config file for a project using, in order, an
//! explicit path, an environment variable, and the platform config directory.
//!
//! # Example
//!
//! ```no_run
//! use sprintsheet_core::util::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("sprintsheet");
//! // Checks SPRINTSHEET_CONFIG, then ~/.config/sprintsheet/config.toml
//! if let Some(path) = resolver.config_file(None) {
//!     println!("Config: {}", path.display());
//! }
//! ```

use std::env;
use std::path::PathBuf;

/// Name of the config file inside the project's config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configurable path resolver for a specific project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "sprintsheet")
    project_name: String,
    /// Environment variable prefix (e.g., "SPRINTSHEET")
    env_prefix: String,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "sprintsheet" → "SPRINTSHEET"
    /// - "sprint-sheet" → "SPRINT_SHEET"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
        }
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use sprintsheet_core::util::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("sprintsheet");
    /// assert_eq!(resolver.env_var("CONFIG"), "SPRINTSHEET_CONFIG");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolve the config file path from the process environment.
    pub fn config_file(&self, explicit: Option<&str>) -> Option<PathBuf> {
        self.config_file_with(explicit, |key| env::var(key).ok())
    }

    /// Resolve the config file path with a custom environment lookup.
    ///
    /// Checks in order:
    /// 1. The explicit path, if given
    /// 2. `{PROJECT}_CONFIG` from `lookup`
    /// 3. `<platform config dir>/{project}/config.toml`
    pub fn config_file_with<F>(&self, explicit: Option<&str>, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }

        if let Some(path) = lookup(&self.env_var("CONFIG")).filter(|p| !p.is_empty()) {
            return Some(expand_tilde(&path));
        }

        self.default_config_file()
    }

    /// The platform default config file location.
    pub fn default_config_file(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(&self.project_name).join(CONFIG_FILE_NAME))
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_simple_name() {
        let resolver = PathResolver::new("sprintsheet");
        assert_eq!(resolver.project_name(), "sprintsheet");
        assert_eq!(resolver.env_prefix(), "SPRINTSHEET");
    }

    #[test]
    fn test_new_kebab_case_name() {
        let resolver = PathResolver::new("sprint-sheet");
        assert_eq!(resolver.env_prefix(), "SPRINT_SHEET");
    }

    #[test]
    fn test_env_var() {
        let resolver = PathResolver::new("sprintsheet");
        assert_eq!(resolver.env_var("CONFIG"), "SPRINTSHEET_CONFIG");
        assert_eq!(resolver.env_var("PORT"), "SPRINTSHEET_PORT");
    }

    #[test]
    fn test_explicit_path_wins() {
        let resolver = PathResolver::new("sprintsheet");
        let path = resolver.config_file_with(Some("/etc/sprintsheet.toml"), |_| {
            Some("/ignored.toml".to_string())
        });
        assert_eq!(path, Some(PathBuf::from("/etc/sprintsheet.toml")));
    }

    #[test]
    fn test_env_path_used_when_no_explicit() {
        let resolver = PathResolver::new("sprintsheet");
        let path = resolver.config_file_with(None, |key| {
            (key == "SPRINTSHEET_CONFIG").then(|| "/tmp/from-env.toml".to_string())
        });
        assert_eq!(path, Some(PathBuf::from("/tmp/from-env.toml")));
    }

    #[test]
    fn test_empty_env_falls_back_to_default() {
        let resolver = PathResolver::new("sprintsheet");
        let path = resolver.config_file_with(None, |_| Some(String::new()));
        assert_eq!(path, resolver.default_config_file());
    }

    #[test]
    fn test_default_config_file_shape() {
        let resolver = PathResolver::new("sprintsheet");
        if let Some(path) = resolver.default_config_file() {
            assert!(path.ends_with("sprintsheet/config.toml"));
        }
    }

    #[test]
    fn test_expand_tilde_plain_path() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/path"), PathBuf::from("rel/path"));
    }
}
