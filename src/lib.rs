// lib.rs
// Library modules for the photo bingo game

pub mod defs;
pub mod error;
pub mod logging;
pub mod config;
pub mod pool;
pub mod seed;
pub mod card;
pub mod board;
pub mod score;
pub mod story;
pub mod simulation;
pub mod terminal;

pub use error::{BingoError, Result};
