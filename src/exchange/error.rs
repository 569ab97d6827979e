use std::path::PathBuf;

/// Errors raised while reading a shape file and building its geometry
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("The following key does not exist: {0}")]
    MissingKey(String),
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("Unsupported shape type: {found}")]
    UnsupportedShapeType {
        found: String,
        supported: Vec<&'static str>,
    },
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0:#}")]
    Geometry(#[from] anyhow::Error),
}

impl ExchangeError {
    pub(crate) fn invalid(key: &str, reason: impl ToString) -> Self {
        ExchangeError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
