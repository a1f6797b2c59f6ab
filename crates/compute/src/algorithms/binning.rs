//! Equal-width binning of a numeric column into ordinal scores.
//!
//! Mirrors `pandas.cut(values, bins)` with integer `bins`: the observed
//! range is split into equal-width, right-inclusive intervals, so bins can
//! hold very different populations on skewed data.

use serde::{Deserialize, Serialize};
use shoplens_core::ShoplensError;
use tracing::debug;

/// Number of bins used for R, F and M scores.
pub const QUARTILES: usize = 4;

/// Maps bin index to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    /// Lowest values score 1 (frequency, monetary).
    HigherIsBetter,
    /// Lowest values score highest (recency: fewer days since purchase is better).
    LowerIsBetter,
}

/// Equal-width scorer producing labels in `1..=bins`.
#[derive(Debug, Clone)]
pub struct QuartileScorer {
    bins: usize,
    direction: ScoreDirection,
}

impl QuartileScorer {
    pub fn new(direction: ScoreDirection) -> Self {
        Self {
            bins: QUARTILES,
            direction,
        }
    }

    pub fn direction(&self) -> ScoreDirection {
        self.direction
    }

    /// Score every value of `column`. `metric` names the column in errors.
    ///
    /// A column whose values are all equal does not fail: the range is
    /// widened around the value and every row receives the same score.
    pub fn score(&self, metric: &str, column: &[f64]) -> Result<Vec<u8>, ShoplensError> {
        let step = format!("quartile scorer ({})", metric);
        if column.is_empty() {
            return Err(ShoplensError::validation(&step, "column is empty"));
        }
        if let Some(bad) = column.iter().find(|v| !v.is_finite()) {
            return Err(ShoplensError::validation(
                &step,
                format!("non-finite value {}", bad),
            ));
        }

        let edges = bin_edges(column, self.bins);
        debug!(metric, ?edges, "equal-width bin edges");

        Ok(column
            .iter()
            .map(|&value| self.label(bin_index(&edges, value)))
            .collect())
    }

    fn label(&self, bin: usize) -> u8 {
        let score = match self.direction {
            ScoreDirection::HigherIsBetter => bin + 1,
            ScoreDirection::LowerIsBetter => self.bins - bin,
        };
        score as u8
    }
}

/// Compute `bins + 1` right-inclusive edges spanning the column.
///
/// Non-degenerate ranges lower the first edge by 0.1% of the range so the
/// minimum falls inside bin 0. A zero-width range is widened by 0.1% of the
/// value (or 0.001 around zero) on both sides before splitting.
pub fn bin_edges(column: &[f64], bins: usize) -> Vec<f64> {
    let (mut lo, mut hi) = column
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if lo == hi {
        lo -= if lo != 0.0 { 0.001 * lo.abs() } else { 0.001 };
        hi += if hi != 0.0 { 0.001 * hi.abs() } else { 0.001 };
        linspace(lo, hi, bins + 1)
    } else {
        let mut edges = linspace(lo, hi, bins + 1);
        edges[0] -= (hi - lo) * 0.001;
        edges
    }
}

/// `numpy.linspace` with endpoint: `i * step + start`, last value pinned to `stop`.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let div = (num - 1) as f64;
    let step = (stop - start) / div;
    let mut out: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
    if let Some(last) = out.last_mut() {
        *last = stop;
    }
    out
}

/// Zero-based bin for `value` given right-inclusive `edges`.
///
/// Values outside the edges snap to the nearest end bin.
fn bin_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    // First edge >= value; the bin is the interval ending at that edge.
    let upper = edges.partition_point(|&e| e < value);
    upper.clamp(1, bins) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evenly_spread_values_fill_all_bins() {
        let scorer = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        let scores = scorer.score("monetary", &[0.0, 10.0, 20.0, 30.0, 40.0]).unwrap();
        // Edges ~[-0.04, 10, 20, 30, 40]; right-inclusive.
        assert_eq!(scores, vec![1, 1, 2, 3, 4]);
    }

    #[test]
    fn lower_is_better_reverses_labels() {
        let scorer = QuartileScorer::new(ScoreDirection::LowerIsBetter);
        let scores = scorer.score("recency", &[0.0, 5.0, 9.0]).unwrap();
        // Edges ~[-0.009, 2.25, 4.5, 6.75, 9]: bins 0, 2, 3.
        assert_eq!(scores, vec![4, 2, 1]);
    }

    #[test]
    fn skewed_values_leave_middle_bins_empty() {
        let scorer = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        let scores = scorer.score("frequency", &[1.0, 1.0, 1.0, 1.0, 17.0]).unwrap();
        assert_eq!(scores, vec![1, 1, 1, 1, 4]);
    }

    #[test]
    fn identical_values_share_one_score() {
        for direction in [ScoreDirection::HigherIsBetter, ScoreDirection::LowerIsBetter] {
            let scorer = QuartileScorer::new(direction);
            for value in [0.0, 1.0, 42.5, 1234.56] {
                let scores = scorer.score("monetary", &[value; 6]).unwrap();
                assert!(scores.iter().all(|&s| s == scores[0]));
                assert!((1..=4).contains(&scores[0]));
            }
        }
    }

    #[test]
    fn identical_zeros_land_in_second_bin() {
        let up = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        let down = QuartileScorer::new(ScoreDirection::LowerIsBetter);
        assert_eq!(up.score("recency", &[0.0, 0.0]).unwrap(), vec![2, 2]);
        assert_eq!(down.score("recency", &[0.0, 0.0]).unwrap(), vec![3, 3]);
    }

    #[test]
    fn single_value_column_scores() {
        let scorer = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        let scores = scorer.score("frequency", &[3.0]).unwrap();
        assert_eq!(scores.len(), 1);
        assert!((1..=4).contains(&scores[0]));
    }

    #[test]
    fn empty_column_is_validation_error() {
        let scorer = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        let err = scorer.score("monetary", &[]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("monetary"));
    }

    #[test]
    fn non_finite_is_validation_error() {
        let scorer = QuartileScorer::new(ScoreDirection::HigherIsBetter);
        assert!(scorer.score("monetary", &[1.0, f64::NAN]).unwrap_err().is_validation());
    }

    #[test]
    fn edges_are_monotonic_and_cover_range() {
        let edges = bin_edges(&[3.0, 7.0, 11.0], QUARTILES);
        assert_eq!(edges.len(), 5);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        assert!(edges[0] < 3.0);
        assert_eq!(edges[4], 11.0);
    }
}
