use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be finite and positive, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("minimum distance must be finite and positive, got {0}")]
    InvalidMinDistance(f64),

    #[error("candidate attempts must be at least 1, got {0}")]
    InvalidAttempts(u32),

    #[error("marker size must be finite and non-negative, got {0}")]
    InvalidMarkerSize(f64),

    #[error("background grid of {columns} x {rows} cells exceeds {limit} cells")]
    GridTooLarge { columns: f64, rows: f64, limit: usize },

    #[error("image of {width} x {height} pixels exceeds {limit} pixels")]
    ImageTooLarge { width: f64, height: f64, limit: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, Error>;
