use thiserror::Error;

use crate::http::HttpError;

/// Rejected edit. The table and history are left untouched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("row {index} is out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("column {index} is out of range ({len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },
}

/// Failure talking to the directory service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("file error: {0}")]
    Io(String),
}

impl DirectoryError {
    /// Text shown to the user.
    ///
    /// Status errors show the server's message alone, the way the login form
    /// shows "Credenciales inválidas".
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<HttpError> for DirectoryError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
