//! Pure packing calculations over aspect ratios.
//!
//! Everything here works on plain `f64` ratios so it can be tested without
//! photo records. [`super::pack`] resolves ratios and pairs the resulting
//! tiles back up with their photos.

use super::params::LayoutParams;
use serde::Serialize;

/// Share of the row given to the horizontal photo of a mixed-orientation pair.
const MAJOR_SHARE: f64 = 0.67;
/// Share of the row given to the other photo of a mixed-orientation pair.
const MINOR_SHARE: f64 = 0.33;
/// A photo narrower than `row_height * THIN_TILE_FACTOR` starts a new row.
const THIN_TILE_FACTOR: f64 = 0.5;

/// Computed rectangle for one input ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
    pub top: f64,
    pub left: f64,
    pub row: usize,
}

impl Tile {
    fn at_origin(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            width,
            height,
            ratio,
            top: 0.0,
            left: 0.0,
            row: 0,
        }
    }
}

/// Initial width split for a pair of photos, before row height is unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAllocation {
    pub left: f64,
    pub right: f64,
}

/// Lay out `ratios` inside a container `container_width` units wide.
///
/// Output has one tile per ratio, in input order.
pub fn pack_ratios(ratios: &[f64], container_width: f64, params: &LayoutParams) -> Vec<Tile> {
    if ratios.is_empty() {
        return Vec::new();
    }
    if !(container_width.is_finite() && container_width > 0.0) {
        return ratios
            .iter()
            .map(|&ratio| Tile::at_origin(0.0, 0.0, ratio))
            .collect();
    }
    match ratios {
        [ratio] => vec![Tile::at_origin(
            container_width,
            container_width / ratio,
            *ratio,
        )],
        [first, second] => layout_pair(*first, *second, container_width, params.gap).to_vec(),
        _ => search(ratios, container_width, params),
    }
}

/// Split a row between two photos.
///
/// If exactly one photo is horizontal (ratio > 1) it gets 67% of the row and
/// the other 33%, each minus half the gap. Otherwise the row is split in
/// proportion to the ratios. Widths never go below zero.
pub fn allocate_pair(first: f64, second: f64, container_width: f64, gap: f64) -> PairAllocation {
    let half_gap = gap / 2.0;
    match (first > 1.0, second > 1.0) {
        (true, false) => PairAllocation {
            left: (container_width * MAJOR_SHARE - half_gap).max(0.0),
            right: (container_width * MINOR_SHARE - half_gap).max(0.0),
        },
        (false, true) => PairAllocation {
            left: (container_width * MINOR_SHARE - half_gap).max(0.0),
            right: (container_width * MAJOR_SHARE - half_gap).max(0.0),
        },
        _ => {
            let total = first + second;
            PairAllocation {
                left: container_width * (first / total),
                right: container_width * (second / total),
            }
        }
    }
}

/// Two photos on one row sharing the taller of their allocated heights.
fn layout_pair(first: f64, second: f64, container_width: f64, gap: f64) -> [Tile; 2] {
    let allocation = allocate_pair(first, second, container_width, gap);
    let row_height = (allocation.left / first).max(allocation.right / second);
    let left_width = row_height * first;
    let right_width = row_height * second;
    let half_gap = gap / 2.0;

    [
        Tile::at_origin((left_width - half_gap).max(0.0), row_height, first),
        Tile {
            left: left_width + half_gap,
            ..Tile::at_origin((right_width - half_gap).max(0.0), row_height, second)
        },
    ]
}

/// Try every candidate row height and keep the layout whose overall ratio is
/// closest to the target. The first candidate wins ties.
fn search(ratios: &[f64], container_width: f64, params: &LayoutParams) -> Vec<Tile> {
    let candidates = params.candidate_heights(container_width);
    let mut best: Option<(f64, f64, Vec<Tile>)> = None;

    for &row_height in &candidates {
        let tiles = layout_at_height(ratios, container_width, row_height, params.gap);
        let deviation = (container_width / grid_height(&tiles) - params.target_ratio).abs();
        if best.as_ref().is_none_or(|(best_dev, _, _)| deviation < *best_dev) {
            best = Some((deviation, row_height, tiles));
        }
    }

    match best {
        Some((deviation, row_height, tiles)) => {
            tracing::debug!(
                photos = ratios.len(),
                candidates = candidates.len(),
                row_height,
                deviation,
                "selected grid layout"
            );
            tiles
        }
        None => Vec::new(),
    }
}

/// Half-open range of tile indices sharing a row.
struct Row {
    start: usize,
    end: usize,
    /// Sum of provisional widths plus the gaps between them.
    width: f64,
}

impl Row {
    fn starting_at(start: usize) -> Self {
        Self {
            start,
            end: start,
            width: 0.0,
        }
    }

    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Brick layout for a single nominal row height.
///
/// Photos fill rows greedily at `row_height`, then each row is scaled so it
/// spans exactly `container_width`.
pub(crate) fn layout_at_height(
    ratios: &[f64],
    container_width: f64,
    row_height: f64,
    gap: f64,
) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(ratios.len());
    let mut rows: Vec<Row> = Vec::new();
    let mut current = Row::starting_at(0);

    for (index, &ratio) in ratios.iter().enumerate() {
        let width = row_height * ratio;
        let overflows = current.width + width > container_width;
        let too_thin = width < row_height * THIN_TILE_FACTOR;
        if current.len() > 0 && (overflows || too_thin) {
            rows.push(std::mem::replace(&mut current, Row::starting_at(index)));
        }

        tiles.push(Tile {
            row: rows.len(),
            ..Tile::at_origin(width, row_height, ratio)
        });
        current.end = index + 1;
        current.width += width + if current.len() > 1 { gap } else { 0.0 };
    }
    if current.len() > 0 {
        rows.push(current);
    }

    let mut top = 0.0;
    for row in &rows {
        let items = &mut tiles[row.start..row.end];
        if let [tile] = items {
            tile.width = container_width;
            tile.height = container_width / tile.ratio;
            tile.left = 0.0;
            tile.top = top;
            top += tile.height + gap;
            continue;
        }

        let total_gap = gap * (items.len() - 1) as f64;
        // rows narrower than their gaps collapse to zero-size tiles
        let scale = ((container_width - total_gap) / (row.width - total_gap)).max(0.0);
        let mut left = 0.0;
        for tile in items.iter_mut() {
            tile.width *= scale;
            tile.height = row_height * scale;
            tile.left = left;
            tile.top = top;
            left += tile.width + gap;
        }
        top += row_height * scale + gap;
    }

    tiles
}

/// Total height of a layout: the lowest bottom edge of any tile.
pub fn grid_height(tiles: &[Tile]) -> f64 {
    tiles
        .iter()
        .map(|t| t.top + t.height)
        .fold(0.0, f64::max)
}
