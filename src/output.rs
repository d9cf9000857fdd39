//! CLI output formatting for every command.
//!
//! Output is information-first: each entity (photo, grid row, sidebar
//! module) gets a header line with its positional index and name, followed by
//! indented context lines. Paths and raw numbers are secondary context.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Photos
//! 001 001-harbour.jpg
//!     Source: 001-harbour.jpg
//!     Description: Harbour at dawn
//!     Ratio: 0.75 (600x800)
//! 002 beach_1600x900.jpg
//!     Source: beach_1600x900.jpg
//!     Ratio: 1.78 (from metadata)
//!
//! Scanned 2 photos, 2 with known dimensions
//! ```
//!
//! ## Layout
//!
//! ```text
//! Width 900px: grid 900 x 1351 (2 rows)
//!     Row 1 (height 449)
//!         001 a.jpg  449 x 449 at (0, 0)
//!         002 b.jpg  449 x 449 at (451, 0)
//!     Row 2 (height 900)
//!         003 c.jpg  900 x 900 at (0, 451)
//! ```
//!
//! ## Browse
//!
//! ```text
//! Page 0: 20 photos (20 loaded)
//! Page 1: 5 photos (25 loaded)
//! End of list
//! ```
//!
//! ## Modules
//!
//! ```text
//! 001 Player [player]
//!     Id: player-module
//!     Order: 1
//!     Shows: Mini player
//! 002 Play queue [queue_manager] (hidden)
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::grid::{GridItem, layout_height};
use crate::paginate::{FetchOutcome, Paginator};
use crate::ratio::{resolve_ratio, resolve_ratio_from_metadata};
use crate::sidebar::{RenderTable, SidebarModule};
use crate::types::Photo;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display name for a photo: the filename, falling back to the storage path.
fn photo_name(photo: &Photo) -> &str {
    if photo.filename.is_empty() {
        &photo.path
    } else {
        &photo.filename
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Round to whole pixels for display.
fn px(value: f64) -> String {
    format!("{:.0}", value)
}

// ============================================================================
// Scan
// ============================================================================

/// Format the photos found by `photowall scan`.
pub fn format_scan_output(photos: &[Photo]) -> Vec<String> {
    let mut lines = vec!["Photos".to_string()];

    for (i, photo) in photos.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), photo_name(photo)));
        lines.push(format!("{}Source: {}", indent(1), photo.path));
        if let Some(desc) = photo.description.as_deref() {
            let truncated = truncate_desc(desc.trim(), 60);
            if !truncated.is_empty() {
                lines.push(format!("{}Description: {}", indent(1), truncated));
            }
        }
        let source = match (photo.width, photo.height) {
            (Some(w), Some(h)) => format!("{}x{}", px(w), px(h)),
            _ if resolve_ratio_from_metadata(photo).is_some() => "from metadata".to_string(),
            _ => "default".to_string(),
        };
        lines.push(format!(
            "{}Ratio: {:.2} ({})",
            indent(1),
            resolve_ratio(photo),
            source
        ));
    }

    let known = photos
        .iter()
        .filter(|p| resolve_ratio_from_metadata(p).is_some())
        .count();
    lines.push(String::new());
    lines.push(format!(
        "Scanned {} photos, {} with known dimensions",
        photos.len(),
        known
    ));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(photos: &[Photo]) {
    for line in format_scan_output(photos) {
        println!("{}", line);
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Format one computed layout, grouped by row.
pub fn format_layout_output(container_width: f64, items: &[GridItem<'_>]) -> Vec<String> {
    let row_count = items.iter().map(|item| item.row + 1).max().unwrap_or(0);
    let mut lines = vec![format!(
        "Width {}px: grid {} x {} ({} rows)",
        px(container_width),
        px(container_width),
        px(layout_height(items)),
        row_count
    )];

    for row in 0..row_count {
        let row_items: Vec<(usize, &GridItem<'_>)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.row == row)
            .collect();
        let height = row_items
            .first()
            .map(|(_, item)| item.height)
            .unwrap_or_default();
        lines.push(format!("{}Row {} (height {})", indent(1), row + 1, px(height)));
        for (i, item) in row_items {
            lines.push(format!(
                "{}{} {}  {} x {} at ({}, {})",
                indent(2),
                format_index(i + 1),
                photo_name(item.photo),
                px(item.width),
                px(item.height),
                px(item.left),
                px(item.top)
            ));
        }
    }
    lines
}

/// Print layout output to stdout.
pub fn print_layout_output(container_width: f64, items: &[GridItem<'_>]) {
    for line in format_layout_output(container_width, items) {
        println!("{}", line);
    }
}

// ============================================================================
// Browse
// ============================================================================

/// Format the result of one page fetch.
pub fn format_page_output<T>(
    page: u32,
    outcome: &FetchOutcome,
    paginator: &Paginator<T>,
) -> Vec<String> {
    let mut lines = Vec::new();
    match outcome {
        FetchOutcome::Replaced { count } | FetchOutcome::Appended { count } => {
            lines.push(format!(
                "Page {}: {} photos ({} loaded)",
                page,
                count,
                paginator.items().len()
            ));
        }
        FetchOutcome::Failed => {
            lines.push(format!(
                "Page {}: failed: {}",
                page,
                paginator.error().unwrap_or("unknown error")
            ));
        }
        FetchOutcome::Stale => {
            lines.push(format!("Page {}: discarded (stale)", page));
        }
    }
    if !paginator.has_more() && paginator.error().is_none() {
        lines.push("End of list".to_string());
    }
    lines
}

/// Print browse output to stdout.
pub fn print_page_output<T>(page: u32, outcome: &FetchOutcome, paginator: &Paginator<T>) {
    for line in format_page_output(page, outcome, paginator) {
        println!("{}", line);
    }
}

// ============================================================================
// Modules
// ============================================================================

/// Format sidebar modules in the order given.
pub fn format_modules_output(modules: &[&SidebarModule], renderers: &RenderTable) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, module) in modules.iter().enumerate() {
        let hidden = if module.is_visible { "" } else { " (hidden)" };
        lines.push(format!(
            "{} {} [{}]{}",
            format_index(i + 1),
            module.title,
            module.module_type(),
            hidden
        ));
        lines.push(format!("{}Id: {}", indent(1), module.id));
        lines.push(format!("{}Order: {}", indent(1), module.order));
        if let Some(page_id) = module.page_id.as_deref() {
            lines.push(format!("{}Page: {}", indent(1), page_id));
        }
        if let Some(rendered) = renderers.render(module) {
            lines.push(format!(
                "{}Shows: {}",
                indent(1),
                truncate_desc(&rendered, 60)
            ));
        }
    }
    if lines.is_empty() {
        lines.push("No modules".to_string());
    }
    lines
}

/// Print module output to stdout.
pub fn print_modules_output(modules: &[&SidebarModule], renderers: &RenderTable) {
    for line in format_modules_output(modules, renderers) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{LayoutParams, pack};
    use crate::paginate::SliceLoader;
    use crate::sidebar::{ModuleKind, default_modules, default_render_table};
    use crate::test_helpers::square_photos;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        let expected = format!("{}...", "a".repeat(40));
        assert_eq!(truncate_desc(&text, 40), expected);
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("éééé", 2), "éé...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn photo_name_falls_back_to_path() {
        assert_eq!(photo_name(&Photo::new(1, "x/y.jpg")), "x/y.jpg");
    }

    // =========================================================================
    // Scan output tests
    // =========================================================================

    #[test]
    fn scan_output_lists_photos_and_sources() {
        let photos = vec![
            Photo {
                filename: "a.jpg".into(),
                ..Photo::new(1, "trip/a.jpg").with_description("Sunset")
            },
            Photo {
                filename: "b_1600x900.jpg".into(),
                ..Photo::new(2, "b_1600x900.jpg")
            },
        ];
        let lines = format_scan_output(&photos);
        assert_eq!(lines[0], "Photos");
        assert_eq!(lines[1], "001 a.jpg");
        assert_eq!(lines[2], "    Source: trip/a.jpg");
        assert_eq!(lines[3], "    Description: Sunset");
        assert_eq!(lines[4], "    Ratio: 1.33 (default)");
        assert_eq!(lines[7], "    Ratio: 1.78 (from metadata)");
        assert_eq!(
            lines.last().unwrap(),
            "Scanned 2 photos, 1 with known dimensions"
        );
    }

    #[test]
    fn scan_output_shows_explicit_dimensions() {
        let photos = vec![Photo::new(1, "a.jpg").with_dimensions(600.0, 800.0)];
        let lines = format_scan_output(&photos);
        assert!(lines.contains(&"    Ratio: 0.75 (600x800)".to_string()));
    }

    // =========================================================================
    // Layout output tests
    // =========================================================================

    #[test]
    fn layout_output_groups_rows() {
        let photos = square_photos(3);
        let items = pack(&photos, 900.0, &LayoutParams::default());
        let lines = format_layout_output(900.0, &items);

        assert_eq!(lines[0], "Width 900px: grid 900 x 1351 (2 rows)");
        assert_eq!(lines[1], "    Row 1 (height 449)");
        assert_eq!(lines[2], "        001 photo-1.jpg  449 x 449 at (0, 0)");
        assert_eq!(lines[3], "        002 photo-2.jpg  449 x 449 at (451, 0)");
        assert_eq!(lines[4], "    Row 2 (height 900)");
        assert_eq!(lines[5], "        003 photo-3.jpg  900 x 900 at (0, 451)");
    }

    #[test]
    fn layout_output_empty() {
        let lines = format_layout_output(600.0, &[]);
        assert_eq!(lines, vec!["Width 600px: grid 600 x 0 (0 rows)"]);
    }

    // =========================================================================
    // Browse output tests
    // =========================================================================

    #[test]
    fn page_output_reports_progress_and_end() {
        let mut paginator = Paginator::new(2);
        let mut loader = SliceLoader::new(vec![1, 2, 3]);

        let first = paginator.fetch_with(&mut loader).unwrap();
        assert_eq!(
            format_page_output(0, &first, &paginator),
            vec!["Page 0: 2 photos (2 loaded)"]
        );

        assert!(paginator.sentinel_visible());
        let second = paginator.fetch_with(&mut loader).unwrap();
        assert_eq!(
            format_page_output(1, &second, &paginator),
            vec!["Page 1: 1 photos (3 loaded)", "End of list"]
        );
    }

    #[test]
    fn page_output_reports_failure() {
        let mut paginator: Paginator<u32> = Paginator::new(2);
        let ticket = paginator.begin_fetch().unwrap();
        let page = ticket.page;
        let outcome = paginator.complete(ticket, Err::<Vec<u32>, _>("timeout"));
        let lines = format_page_output(page, &outcome, &paginator);
        assert_eq!(lines, vec!["Page 0: failed: timeout"]);
    }

    // =========================================================================
    // Module output tests
    // =========================================================================

    #[test]
    fn modules_output_shows_type_and_rendering() {
        let modules = default_modules();
        let refs: Vec<&SidebarModule> = modules.iter().collect();
        let lines = format_modules_output(&refs, &default_render_table());

        assert_eq!(lines[0], "001 Player [player]");
        assert_eq!(lines[1], "    Id: player-module");
        assert_eq!(lines[2], "    Order: 1");
        assert_eq!(lines[3], "    Shows: Mini player");
        assert!(lines.contains(&"003 New post [post_creator]".to_string()));
    }

    #[test]
    fn modules_output_marks_hidden_and_page() {
        let module = SidebarModule {
            is_visible: false,
            page_id: Some("group-3".into()),
            ..SidebarModule::new(
                "group-info-3",
                "Group",
                ModuleKind::GroupInfo { group_id: Some(3) },
                0,
            )
        };
        let lines = format_modules_output(&[&module], &RenderTable::empty());
        assert_eq!(lines[0], "001 Group [group_info] (hidden)");
        assert_eq!(lines[3], "    Page: group-3");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn modules_output_empty() {
        assert_eq!(
            format_modules_output(&[], &RenderTable::empty()),
            vec!["No modules"]
        );
    }
}
