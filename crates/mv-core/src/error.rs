use thiserror::Error;

/// Errors raised by timeline configuration and registry management.
///
/// Missing data (empty sources, unknown features) is never an error; sources
/// clamp or ignore instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f64),

    #[error("Playback speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("No source registered under key '{0}'")]
    UnknownSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
