//! Photo discovery and listing files.
//!
//! Walks a directory tree for image files and turns them into [`Photo`]
//! records ready for layout. Also reads and writes the JSON listings that
//! the `layout` and `browse` commands consume.
//!
//! ## Directory Structure
//!
//! ```text
//! photos/
//! ├── 001-harbour.jpg
//! ├── 001-harbour.txt          # Sidecar description (optional)
//! ├── beach_1600x900.jpg       # Dimensions in the name: no probe needed
//! └── trips/
//!     ├── .draft.jpg           # Hidden: skipped
//!     └── kyoto.png
//! ```
//!
//! ## Rules
//!
//! - Files are visited in path order; the id is the 1-based position.
//! - `path` is relative to the scanned root, with `/` separators.
//! - A `.txt` file next to an image with the same stem becomes its
//!   description. The resolver reads `W x H` hints from it like any other
//!   description.
//! - With a probe, photos whose ratio cannot be resolved from name, path or
//!   description get their pixel size from the image header. Probes run in
//!   parallel. A failed probe is logged and leaves the photo without
//!   dimensions.

use crate::imaging::{DimensionProbe, is_supported_image};
use crate::ratio::resolve_ratio_from_metadata;
use crate::types::{Listing, Photo};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid photo listing: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan `root` for photos.
///
/// When `probe` is given, photos without resolvable dimensions are probed.
pub fn scan(root: &Path, probe: Option<&dyn DimensionProbe>) -> Result<Vec<Photo>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let files = collect_images(root)?;
    let mut photos = files
        .iter()
        .enumerate()
        .map(|(index, file)| build_photo(index as u64 + 1, file, root))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(probe) = probe {
        probe_missing(&mut photos, root, probe);
    }

    tracing::info!(root = %root.display(), photos = photos.len(), "scan finished");
    Ok(photos)
}

/// Read a photo listing: a bare JSON array or an `{items, total}` envelope.
pub fn load_photos(path: &Path) -> Result<Vec<Photo>, ScanError> {
    let content = fs::read_to_string(path)?;
    let listing: Listing<Photo> = serde_json::from_str(&content)?;
    Ok(listing.into_items())
}

/// Write photos as a pretty-printed JSON array.
pub fn save_photos(path: &Path, photos: &[Photo]) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(photos)?;
    fs::write(path, json)?;
    Ok(())
}

fn collect_images(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn build_photo(id: u64, file: &Path, root: &Path) -> Result<Photo, ScanError> {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let rel_path = file
        .strip_prefix(root)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let mut photo = Photo {
        filename: filename.clone(),
        ..Photo::new(id, rel_path).with_original_name(filename)
    };
    if let Some(description) = read_sidecar(file)? {
        photo.description = Some(description);
    }
    Ok(photo)
}

/// Trimmed contents of `<stem>.txt` next to the image, if present and
/// non-empty.
fn read_sidecar(file: &Path) -> Result<Option<String>, ScanError> {
    let sidecar = file.with_extension("txt");
    if !sidecar.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&sidecar)?.trim().to_string();
    Ok((!content.is_empty()).then_some(content))
}

fn probe_missing(photos: &mut [Photo], root: &Path, probe: &dyn DimensionProbe) {
    photos
        .par_iter_mut()
        .filter(|photo| resolve_ratio_from_metadata(photo).is_none())
        .for_each(|photo| {
            let source = root.join(&photo.path);
            match probe.dimensions(&source) {
                Ok(dims) => {
                    photo.width = Some(f64::from(dims.width));
                    photo.height = Some(f64::from(dims.height));
                }
                Err(e) => {
                    tracing::warn!(path = %photo.path, error = %e, "could not probe dimensions");
                }
            }
        });
}
