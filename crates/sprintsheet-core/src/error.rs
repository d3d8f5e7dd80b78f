//! Error types shared by all sprintsheet crates.

/// Errors that can occur while loading, querying, or reporting on a sheet.
///
/// All variants are marked `#[non_exhaustive]` at the enum level so new
/// failure kinds can be added without breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The sheet could not be retrieved from its source.
    #[error("Fetch error: {message}")]
    Fetch {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The sheet body could not be parsed as CSV.
    #[error("Parse error: {message}")]
    Parse {
        /// What went wrong
        message: String,
    },

    /// A request parameter is out of range or malformed.
    #[error("Validation error: {message}")]
    Validation {
        /// Parameter that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A named entity (sprint, column) does not exist.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Kind of entity ("Sprint", "Column")
        kind: &'static str,
        /// Name that was looked up
        name: String,
    },

    /// The request is well formed but the data cannot answer it.
    #[error("Unprocessable: {message}")]
    Unprocessable {
        /// Why the data cannot answer the request
        message: String,
    },

    /// I/O error (config files, local CSV files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias used throughout sprintsheet.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Fetch { .. } => true,
            Error::Io(_) => true,
            Error::Config { .. } => false,
            Error::Parse { .. } => false,
            Error::Validation { .. } => false,
            Error::NotFound { .. } => false,
            Error::Unprocessable { .. } => false,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new fetch error with a message.
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Error::Fetch {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new fetch error with a message and source error.
    pub fn fetch_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Fetch {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error naming the offending parameter.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a "sprint not found" error.
    pub fn sprint_not_found<S: Into<String>>(name: S) -> Self {
        Error::NotFound {
            kind: "Sprint",
            name: name.into(),
        }
    }

    /// Creates a new unprocessable error.
    pub fn unprocessable<S: Into<String>>(message: S) -> Self {
        Error::Unprocessable {
            message: message.into(),
        }
    }
}
