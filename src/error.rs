use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid playback speed: {0}")]
    InvalidSpeed(f64),

    #[error("message not found: {0}")]
    MessageNotFound(u64),

    #[error("index {index} out of range for {len} message(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
