//! Aspect-ratio resolution for photo records.
//!
//! Photos reach the grid with very uneven metadata. Some carry explicit pixel
//! dimensions, others only hint at them in free text or in the storage path
//! (uploads get renamed to `name_800x600.jpg`, CDN URLs carry `?w=800&h=600`).
//! The resolver checks each source in a fixed priority order and the first
//! source that yields a positive width and height wins:
//!
//! ```text
//! 1. explicit width / height fields
//! 2. "W x H" in the description        (1024 x 768, 1024×768, 1024X768)
//! 3. "WxH" or w= / h= in the storage path
//! 4. "W x H" in the original filename
//! 5. DEFAULT_RATIO (4:3)
//! ```
//!
//! Missing or malformed metadata is never an error: it degrades to the
//! default ratio.

use crate::types::Photo;
use regex::Regex;
use std::sync::LazyLock;

/// Ratio used when no source yields usable dimensions.
pub const DEFAULT_RATIO: f64 = 4.0 / 3.0;

/// `W x H` with optional whitespace and an `x`, `X` or `×` separator.
static SPACED_DIMENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*[x×]\s*(\d+)").expect("valid dimensions regex"));

/// `WxH` as it appears in storage paths, no whitespace.
static PATH_DIMENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)x(\d+)").expect("valid path dimensions regex"));

/// A single metadata source, tried in order by [`resolve_ratio`].
type RatioSource = fn(&Photo) -> Option<f64>;

const SOURCES: &[RatioSource] = &[
    from_explicit_dimensions,
    from_description,
    from_path,
    from_original_name,
];

/// Resolve the aspect ratio (width / height) of a photo.
///
/// Always returns a positive, finite number.
pub fn resolve_ratio(photo: &Photo) -> f64 {
    SOURCES
        .iter()
        .find_map(|source| source(photo))
        .unwrap_or(DEFAULT_RATIO)
}

/// Like [`resolve_ratio`], but `None` when only the default would apply.
pub fn resolve_ratio_from_metadata(photo: &Photo) -> Option<f64> {
    SOURCES.iter().find_map(|source| source(photo))
}

fn from_explicit_dimensions(photo: &Photo) -> Option<f64> {
    ratio_of(photo.width?, photo.height?)
}

fn from_description(photo: &Photo) -> Option<f64> {
    photo
        .description
        .as_deref()
        .and_then(|text| first_match(&SPACED_DIMENSIONS, text))
}

fn from_path(photo: &Photo) -> Option<f64> {
    if photo.path.is_empty() {
        return None;
    }
    first_match(&PATH_DIMENSIONS, &photo.path).or_else(|| from_query(&photo.path))
}

fn from_original_name(photo: &Photo) -> Option<f64> {
    if photo.original_name.is_empty() {
        return None;
    }
    first_match(&SPACED_DIMENSIONS, &photo.original_name)
}

/// Ratio from the first occurrence of `pattern`.
///
/// Only the first occurrence counts: `0x600` followed by `800x600` yields
/// nothing for this source.
fn first_match(pattern: &Regex, text: &str) -> Option<f64> {
    let caps = pattern.captures(text)?;
    let width = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let height = caps.get(2)?.as_str().parse::<f64>().ok()?;
    ratio_of(width, height)
}

/// Ratio from `w`/`width` and `h`/`height` query parameters.
fn from_query(path: &str) -> Option<f64> {
    let query = path.split('?').nth(1)?;
    let param = |names: &[&str]| {
        names.iter().find_map(|name| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
                .filter(|value| !value.is_empty())
        })
    };
    let width = leading_number(param(&["w", "width"])?)?;
    let height = leading_number(param(&["h", "height"])?)?;
    ratio_of(width, height)
}

/// Parse the leading run of ASCII digits, ignoring any trailing unit.
fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn ratio_of(width: f64, height: f64) -> Option<f64> {
    let ratio = width / height;
    (width > 0.0 && height > 0.0 && ratio.is_finite()).then_some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ratio(photo: &Photo, expected: f64) {
        let ratio = resolve_ratio(photo);
        assert!(
            (ratio - expected).abs() < 1e-12,
            "expected ratio {expected}, got {ratio}"
        );
    }

    // =========================================================================
    // Explicit dimensions
    // =========================================================================

    #[test]
    fn explicit_dimensions_win() {
        let photo = Photo::new(1, "x_100x100.jpg")
            .with_dimensions(1920.0, 1080.0)
            .with_description("shot at 300x900");
        assert_ratio(&photo, 1920.0 / 1080.0);
    }

    #[test]
    fn explicit_dimensions_exact_quotient() {
        for (w, h) in [(1.0, 3.0), (4000.0, 3000.0), (17.0, 13.0)] {
            let photo = Photo::new(1, "").with_dimensions(w, h);
            assert_eq!(resolve_ratio(&photo), w / h);
        }
    }

    #[test]
    fn non_positive_explicit_dimensions_are_skipped() {
        let photo = Photo::new(1, "a_300x150.jpg").with_dimensions(0.0, 600.0);
        assert_ratio(&photo, 2.0);
        let photo = Photo::new(1, "a_300x150.jpg").with_dimensions(800.0, -1.0);
        assert_ratio(&photo, 2.0);
    }

    #[test]
    fn half_explicit_dimensions_are_skipped() {
        let mut photo = Photo::new(1, "a_300x150.jpg");
        photo.width = Some(800.0);
        assert_ratio(&photo, 2.0);
    }

    // =========================================================================
    // Description
    // =========================================================================

    #[test]
    fn description_with_spaces_and_multiplication_sign() {
        assert_ratio(
            &Photo::new(1, "").with_description("Scan, 1024 × 768, film"),
            1024.0 / 768.0,
        );
        assert_ratio(&Photo::new(1, "").with_description("3000X2000"), 1.5);
        assert_ratio(&Photo::new(1, "").with_description("600 x 900 px"), 600.0 / 900.0);
    }

    #[test]
    fn description_beats_path() {
        let photo = Photo::new(1, "photo_800x600.jpg").with_description("1000x1000");
        assert_ratio(&photo, 1.0);
    }

    #[test]
    fn description_without_dimensions_falls_through() {
        let photo = Photo::new(1, "photo_800x400.jpg").with_description("Sunset at the lake");
        assert_ratio(&photo, 2.0);
    }

    // =========================================================================
    // Path
    // =========================================================================

    #[test]
    fn path_dimension_suffix() {
        assert_ratio(&Photo::new(1, "photo_123_800x600.jpg"), 800.0 / 600.0);
    }

    #[test]
    fn path_query_parameters() {
        assert_ratio(&Photo::new(1, "/media/p.jpg?w=300&h=200"), 1.5);
        assert_ratio(&Photo::new(1, "/media/p.jpg?width=300&height=600"), 0.5);
        assert_ratio(&Photo::new(1, "/media/p.jpg?h=100px&w=250px"), 2.5);
    }

    #[test]
    fn path_query_with_missing_height_falls_through() {
        assert_ratio(&Photo::new(1, "/media/p.jpg?w=300"), DEFAULT_RATIO);
    }

    #[test]
    fn path_first_match_only() {
        // The first WxH occurrence has a zero side, so the path source yields
        // nothing even though a valid pair follows.
        assert_ratio(&Photo::new(1, "0x600/800x400.jpg"), DEFAULT_RATIO);
    }

    #[test]
    fn path_pattern_requires_no_whitespace() {
        assert_ratio(&Photo::new(1, "photo 800 x 400.jpg"), DEFAULT_RATIO);
    }

    // =========================================================================
    // Original filename
    // =========================================================================

    #[test]
    fn original_name_is_last_metadata_source() {
        let photo = Photo::new(1, "b7f3.jpg").with_original_name("beach 3000 x 2000.jpg");
        assert_ratio(&photo, 1.5);
    }

    #[test]
    fn path_beats_original_name() {
        let photo = Photo::new(1, "b7f3_500x1000.jpg").with_original_name("beach 3000x2000.jpg");
        assert_ratio(&photo, 0.5);
    }

    // =========================================================================
    // Default
    // =========================================================================

    #[test]
    fn no_metadata_yields_default() {
        assert_ratio(&Photo::default(), DEFAULT_RATIO);
        assert_ratio(
            &Photo::new(5, "/uploads/abc.jpg").with_description("no numbers here"),
            DEFAULT_RATIO,
        );
    }

    #[test]
    fn metadata_only_resolution_reports_absence() {
        assert_eq!(resolve_ratio_from_metadata(&Photo::new(1, "abc.jpg")), None);
        assert_eq!(
            resolve_ratio_from_metadata(&Photo::new(1, "abc_200x100.jpg")),
            Some(2.0)
        );
    }

    #[test]
    fn huge_digit_runs_stay_finite() {
        let photo = Photo::new(1, "").with_description("1x99999999999999999999999999");
        let ratio = resolve_ratio(&photo);
        assert!(ratio.is_finite() && ratio > 0.0);
    }
}
