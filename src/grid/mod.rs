//! Brick-laid photo grid.
//!
//! Photos of mixed aspect ratio are tiled into rows that each span the full
//! container width, like a justified gallery. The layout depends on how many
//! photos there are:
//!
//! | Photos | Layout |
//! |---|---|
//! | 0 | empty |
//! | 1 | full width, height from the photo's ratio |
//! | 2 | one shared row, width split by orientation (see [`allocate_pair`]) |
//! | 3+ | search over candidate row heights for the layout whose overall ratio is closest to the target |
//!
//! ## The search
//!
//! For each candidate height the photos are assigned greedily to rows at that
//! nominal height, then every row is rescaled to fill the container exactly.
//! Rows with one photo stretch to full width; rows with several are scaled
//! uniformly so tile ratios are preserved. Rows are stacked with a fixed gap.
//! The realized grid ratio (`container_width / total_height`) is compared to
//! the target and the closest candidate wins. Candidates are tried from the
//! lowest height up and only a strictly better deviation replaces the current
//! best, so ties resolve to the lower height.
//!
//! Output is always one [`GridItem`] per input photo, in input order.

mod packer;
mod params;

pub use packer::{PairAllocation, Tile, allocate_pair, grid_height, pack_ratios};
pub use params::LayoutParams;

use crate::ratio::resolve_ratio;
use crate::types::Photo;
use rayon::prelude::*;
use serde::Serialize;

/// A photo with its computed position and size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridItem<'a> {
    pub photo: &'a Photo,
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
    pub top: f64,
    pub left: f64,
    pub row: usize,
}

impl GridItem<'_> {
    /// Absolute-position CSS declarations for this item.
    ///
    /// ```
    /// # use photowall::grid::{pack, LayoutParams};
    /// # use photowall::types::Photo;
    /// let photos = [Photo::new(1, "a_400x300.jpg")];
    /// let items = pack(&photos, 400.0, &LayoutParams::default());
    /// assert_eq!(
    ///     items[0].to_css(),
    ///     "position: absolute; top: 0px; left: 0px; width: 400px; height: 300px; overflow: hidden;"
    /// );
    /// ```
    pub fn to_css(&self) -> String {
        format!(
            "position: absolute; top: {}px; left: {}px; width: {}px; height: {}px; overflow: hidden;",
            self.top, self.left, self.width, self.height
        )
    }
}

/// Lay out `photos` in a container `container_width` units wide.
pub fn pack<'a>(
    photos: &'a [Photo],
    container_width: f64,
    params: &LayoutParams,
) -> Vec<GridItem<'a>> {
    let ratios: Vec<f64> = photos.iter().map(resolve_ratio).collect();
    pack_ratios(&ratios, container_width, params)
        .into_iter()
        .zip(photos)
        .map(|(tile, photo)| GridItem {
            photo,
            width: tile.width,
            height: tile.height,
            ratio: tile.ratio,
            top: tile.top,
            left: tile.left,
            row: tile.row,
        })
        .collect()
}

/// Lay out the same photos at several container widths in parallel.
///
/// Results come back in the order of `widths`.
pub fn pack_responsive<'a>(
    photos: &'a [Photo],
    widths: &[f64],
    params: &LayoutParams,
) -> Vec<(f64, Vec<GridItem<'a>>)> {
    widths
        .par_iter()
        .map(|&width| (width, pack(photos, width, params)))
        .collect()
}

/// Total height of a photo layout.
pub fn layout_height(items: &[GridItem<'_>]) -> f64 {
    items
        .iter()
        .map(|item| item.top + item.height)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{approx_eq, square_photos};

    #[test]
    fn pack_empty() {
        assert!(pack(&[], 900.0, &LayoutParams::default()).is_empty());
    }

    #[test]
    fn pack_single_photo_uses_resolved_ratio() {
        let photos = [Photo::new(1, "pano_3000x1000.jpg")];
        let items = pack(&photos, 900.0, &LayoutParams::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].width, 900.0);
        assert!(approx_eq(items[0].height, 300.0));
        assert!(approx_eq(items[0].ratio, 3.0));
    }

    #[test]
    fn pack_single_photo_without_metadata_uses_default_ratio() {
        let photos = [Photo::new(1, "unknown.jpg")];
        let items = pack(&photos, 800.0, &LayoutParams::default());
        assert!(approx_eq(items[0].height, 600.0));
    }

    #[test]
    fn pack_preserves_order_and_identity() {
        let photos: Vec<Photo> = (1..=9)
            .map(|i| Photo::new(i, format!("p{i}.jpg")).with_dimensions(100.0 + i as f64 * 40.0, 300.0))
            .collect();
        let items = pack(&photos, 1200.0, &LayoutParams::default());
        assert_eq!(items.len(), photos.len());
        for (item, photo) in items.iter().zip(&photos) {
            assert_eq!(item.photo.id, photo.id);
        }
    }

    #[test]
    fn to_css_renders_absolute_position() {
        let photos = square_photos(3);
        let items = pack(&photos, 900.0, &LayoutParams::default());
        let css = items[1].to_css();
        assert!(css.starts_with("position: absolute; top: 0px; left: 451"));
        assert!(css.ends_with("overflow: hidden;"));
    }

    #[test]
    fn pack_responsive_keeps_width_order() {
        let photos = square_photos(4);
        let layouts = pack_responsive(&photos, &[1200.0, 600.0, 900.0], &LayoutParams::default());
        let widths: Vec<f64> = layouts.iter().map(|(w, _)| *w).collect();
        assert_eq!(widths, vec![1200.0, 600.0, 900.0]);
        for (width, items) in &layouts {
            assert_eq!(items.len(), 4);
            assert_eq!(*items, pack(&photos, *width, &LayoutParams::default()));
        }
    }

    #[test]
    fn layout_height_matches_tile_height() {
        let photos = square_photos(3);
        let items = pack(&photos, 900.0, &LayoutParams::default());
        assert!(approx_eq(layout_height(&items), 1351.0));
    }
}
