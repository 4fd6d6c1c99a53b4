//! Error types for hict-core

use thiserror::Error;

/// Errors raised while building or querying contact-map bookkeeping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid resolution table: {message}")]
    InvalidResolutionTable { message: String },

    #[error("Unknown bin resolution: {resolution}")]
    UnknownResolution { resolution: u64 },

    #[error("Invalid resolution key: {key:?}")]
    InvalidResolutionKey { key: String },

    #[error("Invalid assembly: {message}")]
    InvalidAssembly { message: String },

    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    #[error("Unknown enum code {code} for {kind}")]
    UnknownCode { kind: &'static str, code: u8 },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl CoreError {
    pub fn resolution_table<S: Into<String>>(message: S) -> Self {
        Self::InvalidResolutionTable { message: message.into() }
    }

    pub fn unknown_resolution(resolution: u64) -> Self {
        Self::UnknownResolution { resolution }
    }

    pub fn resolution_key<S: Into<String>>(key: S) -> Self {
        Self::InvalidResolutionKey { key: key.into() }
    }

    pub fn assembly<S: Into<String>>(message: S) -> Self {
        Self::InvalidAssembly { message: message.into() }
    }

    pub fn selection<S: Into<String>>(message: S) -> Self {
        Self::InvalidSelection { message: message.into() }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse { message: message.into() }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", err))
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
