//! Progress persistence: one JSON file per book under the local data directory.

use super::types::Progress;
use anyhow::{Context, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

/// Bytes of the book file that feed the book id.
const HASH_PREFIX_BYTES: u64 = 1024 * 1024;

/// Get the directory holding progress files.
fn get_progress_dir() -> Result<PathBuf> {
    let progress_dir = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("ereader").join("progress"))
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

    Ok(progress_dir)
}

fn progress_file(dir: &Path, book_id: &str) -> PathBuf {
    dir.join(format!("{book_id}.json"))
}

/// Compute a stable id for a book file.
///
/// Uses SHA256 of the first 1MB for speed with large files.
pub fn compute_book_id(book_path: &Path) -> Result<String> {
    let file = File::open(book_path)
        .with_context(|| format!("Failed to open {} for hashing", book_path.display()))?;

    let mut buffer = Vec::new();
    BufReader::new(file)
        .take(HASH_PREFIX_BYTES)
        .read_to_end(&mut buffer)?;

    let digest = Sha256::digest(&buffer);
    Ok(format!("{:x}", digest)[..16].to_string())
}

/// Load saved progress for a book, if any.
pub fn load_progress(book_id: &str) -> Result<Option<Progress>> {
    load_progress_in(&get_progress_dir()?, book_id)
}

/// Save progress, stamping it with the current time.
pub fn save_progress(progress: &Progress) -> Result<()> {
    save_progress_in(&get_progress_dir()?, progress)
}

fn load_progress_in(dir: &Path, book_id: &str) -> Result<Option<Progress>> {
    let path = progress_file(dir, book_id);
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(&path).context("Failed to open progress file")?;
    let progress = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse progress file {}", path.display()))?;
    Ok(Some(progress))
}

fn save_progress_in(dir: &Path, progress: &Progress) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut progress = progress.clone();
    progress.updated_at = Utc::now();

    let file = File::create(progress_file(dir, &progress.book_id))
        .context("Failed to create progress file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), &progress)
        .context("Failed to write progress JSON")?;
    log::debug!(
        "saved progress for {} at {}:{}",
        progress.book_id,
        progress.chapter_idx,
        progress.page_idx
    );

    Ok(())
}
