use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::format::{self, FormatPiece};
use crate::types::Summary;
use crate::{date, metadata};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Processes one folder: renames every recognized image in it and, with
/// `recursive`, descends depth-first into subfolders. Everything else counts
/// as skipped. Fatal errors propagate immediately and abort the whole run.
pub fn process_folder(
    folder: &Path,
    pieces: &[FormatPiece],
    recursive: bool,
    summary: &mut Summary,
) -> Result<()> {
    summary.folders += 1;

    // Snapshot and sort the listing so files renamed below are never
    // re-observed and the processing order is deterministic.
    let mut entries = fs::read_dir(folder)
        .with_context(|| format!("failed to read folder {}", folder.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<PathBuf>>>()
        .with_context(|| format!("failed to list folder {}", folder.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() && recursive {
            process_folder(&path, pieces, recursive, summary)?;
        } else if is_image(&path) {
            summary.images += 1;
            rename_image(&path, pieces)
                .with_context(|| format!("failed to rename {}", path.display()))?;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(())
}

fn rename_image(path: &Path, pieces: &[FormatPiece]) -> Result<()> {
    let candidates = metadata::timestamp_candidates(path);
    let resolved = date::resolve(candidates)?;
    let base = format::render(pieces, &resolved);

    let folder = path.parent().context("image has no parent folder")?;
    let ext = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let target = format::available_path(folder, &base, &ext)?;
    fs::rename(path, &target)?;
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS.iter().any(|valid| ext.eq_ignore_ascii_case(valid))
        })
        .unwrap_or(false)
}
