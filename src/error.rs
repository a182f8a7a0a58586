use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("boundary not found for \"{0}\"")]
    BoundaryNotFound(String),

    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("malformed grid file: {0}")]
    MalformedGridFile(String),

    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("no polygon rings supplied")]
    EmptyGeometry,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid GeoJSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
