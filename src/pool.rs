// src/pool.rs
// The photo pool: every usable photo found below the photo folder,
// split into the priority folder and everything else.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::ImageReader;
use walkdir::WalkDir;

use crate::defs::{has_image_extension, CARD_CELLS};
use crate::error::{BingoError, Result};
use crate::logging::{log_info, log_warning};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoPool {
    priority: Vec<String>,
    other: Vec<String>,
}

impl PhotoPool {
    /// Build a pool from photo identifiers (`/`-separated relative paths).
    /// Entries whose first path component is `priority_folder` go to the priority subset.
    pub fn new<I, S>(entries: I, priority_folder: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = entries.into_iter().map(Into::into).collect();
        let (priority, other) = sorted
            .into_iter()
            .partition(|entry| is_in_folder(entry, priority_folder));
        PhotoPool { priority, other }
    }

    /// Walk `dir` and collect the photos stored in its sub-folders.
    /// Files at the root of `dir` are ignored. With `verify_images` set, files
    /// that are not recognisable images are logged and left out.
    pub fn scan<P: AsRef<Path>>(dir: P, priority_folder: Option<&str>, verify_images: bool) -> Result<Self> {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(BingoError::PoolNotFound(root.to_path_buf()));
        }

        let mut entries = Vec::new();
        let mut skipped = 0;

        for entry in WalkDir::new(root).min_depth(2).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log_warning(&format!("Skipping unreadable path: {e}"));
                    skipped += 1;
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !has_image_extension(path) {
                continue;
            }

            if verify_images {
                if let Err(e) = check_readable(path) {
                    log_warning(&format!("Skipping photo: {e}"));
                    skipped += 1;
                    continue;
                }
            }

            if let Some(id) = relative_id(root, path) {
                entries.push(id);
            }
        }

        let pool = Self::new(entries, priority_folder);
        log_info(&format!(
            "Scanned {}: {} photos ({} priority, {} skipped)",
            root.display(),
            pool.len(),
            pool.priority.len(),
            skipped
        ));
        Ok(pool)
    }

    /// Scan and require enough usable photos for one card.
    pub fn load<P: AsRef<Path>>(dir: P, priority_folder: Option<&str>, verify_images: bool) -> Result<Self> {
        let pool = Self::scan(dir, priority_folder, verify_images)?;
        pool.require(CARD_CELLS)?;
        Ok(pool)
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    pub fn other(&self) -> &[String] {
        &self.other
    }

    pub fn len(&self) -> usize {
        self.priority.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, entry: &str) -> bool {
        let key = entry.to_string();
        self.priority.binary_search(&key).is_ok() || self.other.binary_search(&key).is_ok()
    }

    pub fn require(&self, required: usize) -> Result<()> {
        if self.len() < required {
            return Err(BingoError::InsufficientPool { required, available: self.len() });
        }
        Ok(())
    }
}

fn is_in_folder(entry: &str, folder: Option<&str>) -> bool {
    match folder {
        Some(folder) => entry.split('/').next() == Some(folder),
        None => false,
    }
}

fn relative_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Check that `path` opens and its first bytes match a known image format.
/// The file extension plays no part in the decision.
pub fn check_readable(path: &Path) -> Result<()> {
    let unreadable = |reason: String| BingoError::UnreadableImage {
        path: path.to_path_buf(),
        reason,
    };

    // `ImageReader::new` starts without a format, so only the content sniff can set one
    let reader = File::open(path)
        .and_then(|file| ImageReader::new(BufReader::new(file)).with_guessed_format())
        .map_err(|e| unreadable(e.to_string()))?;

    match reader.format() {
        Some(_) => Ok(()),
        None => Err(unreadable("unrecognised image format".to_string())),
    }
}
