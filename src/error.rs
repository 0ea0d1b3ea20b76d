//! Error type shared by the frame buffer, display manager and platform layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Pixel storage for the requested size could not be reserved
    #[error("out of memory allocating a {width}x{height} frame buffer")]
    OutOfMemory { width: u32, height: u32 },

    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Window system failure (SDL reports these as strings)
    #[error("platform error: {0}")]
    Platform(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
