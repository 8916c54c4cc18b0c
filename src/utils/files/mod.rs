#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CHUNK_SIZE: usize = 64 * 1024;

/// Recursively list the files under `root`, skipping hidden files.
///
/// Symlinks are not followed, so a link back to an ancestor cannot yield the
/// same file twice. Paths come back sorted so repeated runs see messages in
/// the same order.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !root.is_dir() {
        return Err(AppError::new(
            ErrorCategory::IoError,
            format!("{} is not a directory", root.display()),
        ));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to walk {}: {}", root.display(), e),
            )
        })?;
        if entry.file_type().is_file() && !is_hidden(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

pub fn is_file_empty(path: &Path) -> Result<bool, AppError> {
    let metadata = fs::metadata(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read metadata of {}: {}", path.display(), e),
        )
    })?;
    Ok(metadata.len() == 0)
}

/// Hex-encoded SHA-256 of a file, read in 64 KiB chunks.
pub fn sha256_digest(path: &Path) -> Result<String, AppError> {
    let mut file = fs::File::open(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to open {}: {}", path.display(), e),
        )
    })?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hex-encoded SHA-256 of bytes already in memory.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
