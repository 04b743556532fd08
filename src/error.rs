// src/error.rs
// Error taxonomy for pool loading, card dealing and card state changes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BingoError {
    #[error("Photo folder not found: {}", .0.display())]
    PoolNotFound(PathBuf),

    #[error("Not enough photos: {required} required, {available} available")]
    InsufficientPool { required: usize, available: usize },

    #[error("Cannot load image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("Cell index {0} is outside the card")]
    CellOutOfRange(usize),

    #[error("A card holds exactly 9 photos, got {0}")]
    InvalidCardSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BingoError>;
