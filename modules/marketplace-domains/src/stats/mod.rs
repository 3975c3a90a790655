//! In-process reductions applied after rows come back from the store.
//!
//! Every helper here is O(n) over rows already loaded in memory. Nothing is
//! pushed down into SQL aggregation, so the cost grows with the cardinality
//! of the scanned relation.

pub mod counts;
pub mod margin;

pub use counts::{count_by, rank_by_count, retain_min_count};
pub use margin::{filter_by_margin, profit_margin};

/// Arithmetic mean. An empty set averages to 0, not NaN.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_set_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn average_is_sum_over_count() {
        let values = [80.0, 90.0, 55.5];
        let expected = (80.0 + 90.0 + 55.5) / 3.0;
        assert!((average(&values) - expected).abs() < 1e-9);
    }

    #[test]
    fn percentage_with_zero_whole_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn percentage_scales_to_hundred() {
        assert!((percentage(2, 3) - 66.666_666).abs() < 1e-3);
        assert_eq!(percentage(4, 4), 100.0);
    }
}
