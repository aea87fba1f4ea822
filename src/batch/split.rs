//! Partition of a total quantity into per-unit shares

use serde::Serialize;

/// How a total is spread across units.
///
/// Every unit receives `base`; the last one also carries `remainder`, so
/// the shares always add back up to the requested total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantitySplit {
    pub count: usize,
    pub base: i64,
    pub remainder: i64,
}

impl QuantitySplit {
    pub const EMPTY: QuantitySplit = QuantitySplit {
        count: 0,
        base: 0,
        remainder: 0,
    };

    /// Split `total` into shares of `increment`, with at most `max_units`
    /// shares (`None` for no limit).
    ///
    /// A non-positive total or increment, or a limit of zero or less, yields
    /// no units at all.
    pub fn compute(total: i64, increment: i64, max_units: Option<i64>) -> Self {
        if increment <= 0 || total <= 0 {
            return Self::EMPTY;
        }

        let mut remainder = total % increment;
        let mut count = (total - remainder) / increment;
        let mut base = increment;

        if count == 0 {
            // total < increment: one unit carries everything
            count = 1;
            base = 0;
            remainder = total;
        }

        if let Some(max) = max_units {
            if count > max {
                if max <= 0 {
                    return Self::EMPTY;
                }
                count = max;
                remainder = total % count;
                base = (total - remainder) / count;
            }
        }

        Self {
            count: usize::try_from(count).unwrap_or(0),
            base,
            remainder,
        }
    }

    /// Share assigned to the unit at `index`
    pub fn amount_for(&self, index: usize) -> i64 {
        if index + 1 == self.count {
            self.base + self.remainder
        } else {
            self.base
        }
    }

    pub fn amounts(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.count).map(|i| self.amount_for(i))
    }

    pub fn total(&self) -> i64 {
        self.amounts().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn amounts(total: i64, increment: i64, max_units: Option<i64>) -> Vec<i64> {
        QuantitySplit::compute(total, increment, max_units).amounts().collect()
    }

    #[test]
    fn test_even_split() {
        assert_eq!(amounts(100, 25, None), vec![25, 25, 25, 25]);
    }

    #[test]
    fn test_remainder_goes_to_last_unit() {
        let split = QuantitySplit::compute(100, 30, None);
        assert_eq!(split, QuantitySplit { count: 3, base: 30, remainder: 10 });
        assert_eq!(amounts(100, 30, None), vec![30, 30, 40]);
    }

    #[test]
    fn test_total_below_increment_gives_single_unit() {
        assert_eq!(amounts(50, 100, None), vec![50]);
    }

    #[test]
    fn test_zero_total_gives_no_units() {
        assert!(QuantitySplit::compute(0, 10, None).is_empty());
    }

    #[test]
    fn test_non_positive_increment_gives_no_units() {
        assert!(QuantitySplit::compute(100, 0, None).is_empty());
        assert!(QuantitySplit::compute(100, -5, None).is_empty());
        assert!(QuantitySplit::compute(-100, 5, None).is_empty());
    }

    #[test]
    fn test_zero_max_gives_no_units() {
        assert!(QuantitySplit::compute(100, 25, Some(0)).is_empty());
        assert!(QuantitySplit::compute(50, 100, Some(0)).is_empty());
        assert!(QuantitySplit::compute(100, 25, Some(-3)).is_empty());
    }

    #[test]
    fn test_cap_redistributes_total() {
        assert_eq!(amounts(100, 1, Some(3)), vec![33, 33, 34]);
        assert_eq!(amounts(1005, 20, Some(300)).len(), 50);
        assert_eq!(amounts(1000, 1, Some(300)).len(), 300);
    }

    #[test]
    fn test_cap_above_count_is_ignored() {
        assert_eq!(amounts(100, 25, Some(10)), vec![25, 25, 25, 25]);
    }

    #[test]
    fn test_conservation_grid() {
        for total in 0..=240 {
            for increment in 1..=37 {
                for max_units in [None, Some(1), Some(2), Some(7), Some(50)] {
                    let split = QuantitySplit::compute(total, increment, max_units);
                    assert_eq!(split.total(), total, "{total} / {increment} / {max_units:?}");
                    if let Some(max) = max_units {
                        assert!(split.count as i64 <= max);
                    }
                }
            }
        }
    }
}
