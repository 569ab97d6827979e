use crate::exchange::ExchangeError;

/// Failure of a command, displayed as the exact message printed to the user
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(
        "The command {} does not exist. Please run 'geomdl help' for command reference.",
        .0.to_uppercase()
    )]
    UnknownCommand(String),
    #[error(
        "To execute {} command {required} command line argument(s) required.",
        .name.to_uppercase()
    )]
    MissingArguments { name: String, required: usize },
    #[error("Unsupported shape type: {found}\n\nPossible values are: {}", .supported.join(", "))]
    UnsupportedShapeType {
        found: String,
        supported: Vec<&'static str>,
    },
    #[error("Problem with the YAML file. The following key does not exist: {0}")]
    MissingKey(String),
    #[error("An error occurred: {0}")]
    Failed(String),
}

impl From<ExchangeError> for CommandError {
    fn from(value: ExchangeError) -> Self {
        match value {
            ExchangeError::MissingKey(key) => CommandError::MissingKey(key),
            ExchangeError::UnsupportedShapeType { found, supported } => {
                CommandError::UnsupportedShapeType { found, supported }
            }
            other => CommandError::Failed(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(value: anyhow::Error) -> Self {
        CommandError::Failed(format!("{value:#}"))
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        CommandError::Failed(value.to_string())
    }
}
