//! Shared test utilities for the photowall test suite.
//!
//! Provides float comparison, layout assertions, photo fixtures and a tiny
//! image writer for filesystem tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let photos = square_photos(3);
//! let tiles = pack_ratios(&[1.0, 1.0, 1.0], 900.0, &LayoutParams::default());
//! assert_rows_fill_width(&tiles, 900.0, 2.0);
//! assert!(approx_eq(tiles[1].left, 451.0));
//! ```

use std::path::Path;

use crate::grid::Tile;
use crate::types::Photo;

// =========================================================================
// Float comparison
// =========================================================================

/// Tolerance for comparing computed layout values.
pub const EPSILON: f64 = 1e-6;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =========================================================================
// Layout assertions
// =========================================================================

/// Assert every row spans exactly `container_width`.
///
/// Multi-tile rows must have widths plus inner gaps summing to the container
/// width; single-tile rows must be exactly the container width.
pub fn assert_rows_fill_width(tiles: &[Tile], container_width: f64, gap: f64) {
    let row_count = tiles.iter().map(|t| t.row + 1).max().unwrap_or(0);
    for row in 0..row_count {
        let members: Vec<&Tile> = tiles.iter().filter(|t| t.row == row).collect();
        assert!(!members.is_empty(), "row {row} has no tiles");
        if let [only] = members.as_slice() {
            assert_eq!(
                only.width, container_width,
                "single-tile row {row} should span the container"
            );
            continue;
        }
        let used: f64 = members.iter().map(|t| t.width).sum::<f64>()
            + gap * (members.len() - 1) as f64;
        assert!(
            (used - container_width).abs() < 1e-3,
            "row {row} spans {used}, expected {container_width}"
        );
    }
}

// =========================================================================
// Photo fixtures
// =========================================================================

/// `n` square photos with explicit 100x100 dimensions, ids 1..=n, named
/// `photo-{id}.jpg`.
pub fn square_photos(n: u64) -> Vec<Photo> {
    (1..=n)
        .map(|id| {
            let name = format!("photo-{id}.jpg");
            Photo {
                filename: name.clone(),
                ..Photo::new(id, name).with_dimensions(100.0, 100.0)
            }
        })
        .collect()
}

/// Find the photo whose path contains `needle`. Panics with a clear message
/// if none matches.
pub fn find_photo<'a>(photos: &'a [Photo], needle: &str) -> &'a Photo {
    photos
        .iter()
        .find(|p| p.path.contains(needle))
        .unwrap_or_else(|| {
            let paths: Vec<&str> = photos.iter().map(|p| p.path.as_str()).collect();
            panic!("no photo matching '{needle}'. Available: {paths:?}")
        })
}

// =========================================================================
// Image files
// =========================================================================

/// Write a solid-colour PNG of the given size.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]));
    img.save(path).unwrap();
}
