use std::fmt;

/// Custom error types for SRT telemetry parsing
#[derive(Debug)]
pub enum SrtError {
    /// I/O errors
    Io(std::io::Error),
    /// UTF-8 parsing errors
    Utf8(std::str::Utf8Error),
    /// A token matched a field pattern but numeric conversion failed
    Parse(String),
    /// Empty or otherwise unusable input to the track projector
    Input(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for SrtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SrtError::Io(err) => write!(f, "I/O error: {}", err),
            SrtError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            SrtError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SrtError::Input(msg) => write!(f, "Input error: {}", msg),
            SrtError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for SrtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SrtError::Io(err) => Some(err),
            SrtError::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SrtError {
    fn from(err: std::io::Error) -> Self {
        SrtError::Io(err)
    }
}

impl From<std::str::Utf8Error> for SrtError {
    fn from(err: std::str::Utf8Error) -> Self {
        SrtError::Utf8(err)
    }
}

pub type Result<T> = std::result::Result<T, SrtError>;
