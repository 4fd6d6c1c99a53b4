//! Error handling for the HiCT CLI

use hict_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HiCT CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid session: {message}")]
    Session { message: String },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Invalid edit: {message}")]
    Edit { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session { message: message.into() }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn edit<S: Into<String>>(message: S) -> Self {
        Self::Edit { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::session(format!("JSON error: {}", err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSelection { message } => Self::edit(message),
            other => Self::session(other.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Session { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • The session file must be the JSON response of the open-file request\n\
                 • Check that resolutions and pixelResolutions have the same length and descend\n\
                 • Check that matrixSizesBins has one entry per resolution",
            );
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Each trace line must be a JSON object with a \"type\" of \"wheel\" or \"poll\"\n\
                 • Blank lines and lines starting with '#' are ignored",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your hict.toml configuration file\n\
                 • Use 'hict config --example' to generate a sample configuration",
            );
        }

        CliError::Edit { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Bins are counted at the resolution given with --resolution\n\
                 • Use 'hict inspect' to list the bin count of every resolution",
            );
        }

        _ => {}
    }

    message
}
