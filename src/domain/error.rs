//! Domain error types.
//!
//! The analytical core never surfaces these from a scan: loaders downgrade them
//! to empty/zero values. They exist for the adapters, configuration and CLI.

/// Errors raised while parsing a symbol universe definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty entry in universe list")]
    EmptyEntry,

    #[error("malformed universe entry {entry:?}: expected symbol|name|sector")]
    Malformed { entry: String },

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

/// Top-level error type for vcphunter.
#[derive(Debug, thiserror::Error)]
pub enum HunterError {
    #[error("http request failed: {reason}")]
    Http { reason: String },

    #[error("data source returned {status}: {reason}")]
    Api { status: u16, reason: String },

    #[error("could not parse {dataset} payload: {reason}")]
    DataParse { dataset: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("unknown strategy {0:?} (expected standard or power_play)")]
    UnknownStrategy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HunterError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        HunterError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for HunterError {
    fn from(err: reqwest::Error) -> Self {
        HunterError::Http {
            reason: err.to_string(),
        }
    }
}

impl From<&HunterError> for std::process::ExitCode {
    fn from(err: &HunterError) -> Self {
        let code: u8 = match err {
            HunterError::Io(_) => 1,
            HunterError::ConfigParse { .. }
            | HunterError::ConfigMissing { .. }
            | HunterError::ConfigInvalid { .. }
            | HunterError::UnknownStrategy(_) => 2,
            HunterError::Http { .. } | HunterError::Api { .. } | HunterError::DataParse { .. } => 3,
            HunterError::Universe(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
