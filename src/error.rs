use thiserror::Error;

/// Main error type for optreg operations
#[derive(Debug, Error)]
pub enum OptregError {
    #[error("unsupported option type: {0}")]
    UnsupportedType(String),

    #[error("flag '{flag}' not found")]
    FlagNotFound { flag: String },

    #[error("flag '{flag}' already defined")]
    FlagRedefined { flag: String },

    #[error("invalid binding: {0}")]
    InvalidBinding(String),

    #[error("failed to add option '{name}': {source}")]
    AddOption {
        name: String,
        #[source]
        source: Box<OptregError>,
    },

    #[error("failed to bind option '{name}': {source}")]
    BindOption {
        name: String,
        #[source]
        source: Box<OptregError>,
    },

    #[error("configuration store error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("flag access error: {0}")]
    FlagAccess(#[from] clap::parser::MatchesError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptregError {
    pub fn unsupported_type<S: Into<String>>(kind: S) -> Self {
        Self::UnsupportedType(kind.into())
    }

    pub fn flag_not_found<S: Into<String>>(flag: S) -> Self {
        Self::FlagNotFound { flag: flag.into() }
    }

    pub fn flag_redefined<S: Into<String>>(flag: S) -> Self {
        Self::FlagRedefined { flag: flag.into() }
    }

    pub fn invalid_binding<S: Into<String>>(msg: S) -> Self {
        Self::InvalidBinding(msg.into())
    }

    pub fn add_option<S: Into<String>>(name: S, source: OptregError) -> Self {
        Self::AddOption {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn bind_option<S: Into<String>>(name: S, source: OptregError) -> Self {
        Self::BindOption {
            name: name.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for optreg operations
pub type Result<T> = std::result::Result<T, OptregError>;
