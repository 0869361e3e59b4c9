/// Rejected command-line settings.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one generation must be displayed")]
    NoGenerations,
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
    #[error("seed must be four comma-separated numbers x1,y1,x2,y2, got {0:?}")]
    InvalidSeed(String),
    /// `segments` saturates at `u64::MAX`.
    #[error("{rule} generation {generation} would hold {segments} segments (limit {limit})")]
    TooManySegments {
        rule: String,
        generation: u32,
        segments: u64,
        limit: u64,
    },
}

/// Window and frame-buffer failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixels error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("surface resize failed: {0}")]
    Resize(#[from] pixels::TextureError),
}

pub type RenderResult<T> = Result<T, RenderError>;
