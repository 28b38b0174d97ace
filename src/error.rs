use thiserror::Error;

/// Errors raised at the edges of the puzzle: loading images and settings, and
/// preparing geometry for a drawing backend.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to triangulate outline with {0} points")]
    Triangulation(usize),
}

/// Result type for puzzle operations that can fail
pub type PuzzleResult<T> = Result<T, PuzzleError>;
