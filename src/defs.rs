// src/defs.rs
// Card geometry and the fixed set of winning lines.

use std::path::Path;
use serde::{Deserialize, Serialize};

pub const GRID_SIDE: usize = 3; // cells per row and per column
pub const CARD_CELLS: usize = GRID_SIDE * GRID_SIDE;

pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row,
    Column,
    Diagonal,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Row => "Row",
            LineKind::Column => "Column",
            LineKind::Diagonal => "Diagonal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinPattern {
    pub kind: LineKind,
    pub cells: [usize; GRID_SIDE],
}

const fn pattern(kind: LineKind, cells: [usize; GRID_SIDE]) -> WinPattern {
    WinPattern { kind, cells }
}

pub const WIN_PATTERNS: [WinPattern; 8] = [
    pattern(LineKind::Row, [0, 1, 2]),
    pattern(LineKind::Row, [3, 4, 5]),
    pattern(LineKind::Row, [6, 7, 8]),
    pattern(LineKind::Column, [0, 3, 6]),
    pattern(LineKind::Column, [1, 4, 7]),
    pattern(LineKind::Column, [2, 5, 8]),
    pattern(LineKind::Diagonal, [0, 4, 8]),
    pattern(LineKind::Diagonal, [2, 4, 6]),
];

/// Grid position of a cell as `(row, col)`.
pub fn cell_position(index: usize) -> (usize, usize) {
    (index / GRID_SIDE, index % GRID_SIDE)
}

pub fn has_image_extension(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_patterns_cover_every_line() {
        let rows = WIN_PATTERNS.iter().filter(|p| p.kind == LineKind::Row).count();
        let cols = WIN_PATTERNS.iter().filter(|p| p.kind == LineKind::Column).count();
        let diags = WIN_PATTERNS.iter().filter(|p| p.kind == LineKind::Diagonal).count();
        assert_eq!((rows, cols, diags), (3, 3, 2));

        for p in WIN_PATTERNS.iter() {
            assert!(p.cells.iter().all(|&c| c < CARD_CELLS));
            match p.kind {
                LineKind::Row => {
                    let row = cell_position(p.cells[0]).0;
                    assert!(p.cells.iter().all(|&c| cell_position(c).0 == row));
                }
                LineKind::Column => {
                    let col = cell_position(p.cells[0]).1;
                    assert!(p.cells.iter().all(|&c| cell_position(c).1 == col));
                }
                LineKind::Diagonal => assert!(p.cells.contains(&4)),
            }
        }
    }

    #[test]
    fn test_cell_position() {
        assert_eq!(cell_position(0), (0, 0));
        assert_eq!(cell_position(5), (1, 2));
        assert_eq!(cell_position(7), (2, 1));
    }

    #[test]
    fn test_image_extensions() {
        assert!(has_image_extension(Path::new("a/b/photo.JPG")));
        assert!(has_image_extension(Path::new("x.webp")));
        assert!(has_image_extension(Path::new("x.jpeg")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("README")));
    }
}
