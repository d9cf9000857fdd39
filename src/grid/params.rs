//! Tunables for the packer.

/// Parameters shared by every layout computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Desired overall grid aspect ratio (width / height).
    pub target_ratio: f64,
    /// Smallest candidate row height tried by the search.
    pub min_item_height: f64,
    /// Gap between tiles in a row and between rows, in layout units.
    pub gap: f64,
    /// Number of equal intervals between the smallest and largest candidate.
    pub steps: u32,
    /// Largest candidate row height is `container_width / max_height_divisor`.
    pub max_height_divisor: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            target_ratio: 4.0 / 3.0,
            min_item_height: 80.0,
            gap: 2.0,
            steps: 30,
            max_height_divisor: 1.2,
        }
    }
}

impl LayoutParams {
    /// Default parameters with a custom target ratio and minimum height.
    pub fn new(target_ratio: f64, min_item_height: f64) -> Self {
        Self {
            target_ratio,
            min_item_height,
            ..Self::default()
        }
    }

    /// Candidate row heights for a container, lowest first.
    ///
    /// `steps + 1` evenly spaced heights from `min_item_height` to
    /// `container_width / max_height_divisor` inclusive. When the container
    /// is too narrow for that range, only `min_item_height` is tried.
    pub fn candidate_heights(&self, container_width: f64) -> Vec<f64> {
        let min = self.min_item_height;
        let max = container_width / self.max_height_divisor;
        if !(max > min) || self.steps == 0 {
            return vec![min];
        }
        let step = (max - min) / self.steps as f64;
        (0..=self.steps).map(|i| min + step * i as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = LayoutParams::default();
        assert_eq!(p.target_ratio, 4.0 / 3.0);
        assert_eq!(p.min_item_height, 80.0);
        assert_eq!(p.gap, 2.0);
        assert_eq!(p.steps, 30);
        assert_eq!(p.max_height_divisor, 1.2);
    }

    #[test]
    fn candidates_span_min_to_max() {
        let heights = LayoutParams::default().candidate_heights(900.0);
        assert_eq!(heights.len(), 31);
        assert_eq!(heights[0], 80.0);
        assert!((heights[30] - 750.0).abs() < 1e-9);
        assert!(heights.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn narrow_container_tries_min_only() {
        assert_eq!(LayoutParams::default().candidate_heights(90.0), vec![80.0]);
    }

    #[test]
    fn zero_steps_tries_min_only() {
        let p = LayoutParams {
            steps: 0,
            ..LayoutParams::default()
        };
        assert_eq!(p.candidate_heights(900.0), vec![80.0]);
    }
}
