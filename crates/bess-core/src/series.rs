//! Full-horizon price series and daily window slicing.
//!
//! A [`PriceSeries`] holds the half-hourly prices for all three markets over
//! the whole backtest horizon (Market 3's daily price already broadcast to
//! slot resolution by the loader). It is validated once at construction and
//! never mutated; the optimizer only ever sees 48-slot [`DayPrices`] windows
//! cut from it.
//!
//! The day count is derived as `total_slots / 48` with an explicit
//! no-remainder check. A horizon that is not a whole number of days is
//! rejected up front, before any slicing, so later days can never silently
//! receive misaligned windows.

use crate::error::{BessError, BessResult};
use crate::market::{Market, SLOTS_PER_DAY};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aligned half-hourly price sequences for the full horizon.
///
/// Invariants (enforced by [`PriceSeries::new`]):
/// - all three sequences have the same length,
/// - the length is a non-zero multiple of [`SLOTS_PER_DAY`],
/// - every price is finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    start_date: NaiveDate,
    market1: Vec<f64>,
    market2: Vec<f64>,
    market3: Vec<f64>,
}

/// One day's 48-slot price window, tagged with its calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPrices {
    /// Calendar date of this window.
    pub date: NaiveDate,
    /// Market 1 prices, one per slot.
    pub market1: Vec<f64>,
    /// Market 2 prices, one per slot.
    pub market2: Vec<f64>,
    /// Market 3 prices, one per slot (constant within the day).
    pub market3: Vec<f64>,
}

impl DayPrices {
    /// Prices for a market, in model index order.
    pub fn market(&self, market: Market) -> &[f64] {
        match market {
            Market::Market1 => &self.market1,
            Market::Market2 => &self.market2,
            Market::Market3 => &self.market3,
        }
    }
}

impl PriceSeries {
    /// Build a validated series from aligned per-market price vectors.
    pub fn new(
        start_date: NaiveDate,
        market1: Vec<f64>,
        market2: Vec<f64>,
        market3: Vec<f64>,
    ) -> BessResult<Self> {
        let len = market1.len();
        if market2.len() != len || market3.len() != len {
            return Err(BessError::Validation(format!(
                "price series lengths differ: market1={}, market2={}, market3={}",
                len,
                market2.len(),
                market3.len()
            )));
        }
        if len == 0 {
            return Err(BessError::Validation("price series is empty".into()));
        }
        if len % SLOTS_PER_DAY != 0 {
            return Err(BessError::Validation(format!(
                "horizon of {len} slots is not a whole number of {SLOTS_PER_DAY}-slot days \
                 (remainder {})",
                len % SLOTS_PER_DAY
            )));
        }
        for (name, prices) in [
            ("market1", &market1),
            ("market2", &market2),
            ("market3", &market3),
        ] {
            if let Some(pos) = prices.iter().position(|p| !p.is_finite()) {
                return Err(BessError::Validation(format!(
                    "{name} price at slot {pos} is not finite"
                )));
            }
        }
        Ok(Self {
            start_date,
            market1,
            market2,
            market3,
        })
    }

    /// Calendar date of the first day in the horizon.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Total number of half-hour slots in the horizon.
    pub fn num_slots(&self) -> usize {
        self.market1.len()
    }

    /// Number of whole days in the horizon.
    pub fn num_days(&self) -> usize {
        // Exact by construction: new() rejects any remainder.
        self.num_slots() / SLOTS_PER_DAY
    }

    /// The half-open window `[k*48, (k+1)*48)` for day `k` (0-based).
    ///
    /// Out-of-range `k` is an error; a short window is never returned.
    pub fn day(&self, k: usize) -> BessResult<DayPrices> {
        if k >= self.num_days() {
            return Err(BessError::Validation(format!(
                "day index {k} out of range (horizon has {} days)",
                self.num_days()
            )));
        }
        let lo = k * SLOTS_PER_DAY;
        let hi = lo + SLOTS_PER_DAY;
        let date = self.start_date + chrono::Duration::days(k as i64);
        Ok(DayPrices {
            date,
            market1: self.market1[lo..hi].to_vec(),
            market2: self.market2[lo..hi].to_vec(),
            market3: self.market3[lo..hi].to_vec(),
        })
    }

    /// Iterate over all daily windows in order.
    pub fn days(&self) -> impl Iterator<Item = DayPrices> + '_ {
        (0..self.num_days()).map(move |k| {
            // k < num_days by construction of the range
            self.day(k).expect("day index in range")
        })
    }

    /// Minimum and maximum price observed for a market over the horizon.
    pub fn price_range(&self, market: Market) -> (f64, f64) {
        let prices = match market {
            Market::Market1 => &self.market1,
            Market::Market2 => &self.market2,
            Market::Market3 => &self.market3,
        };
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &p in prices {
            lo = lo.min(p);
            hi = hi.max(p);
        }
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flat_series(days: usize, p1: f64, p2: f64, p3: f64) -> PriceSeries {
        let n = days * SLOTS_PER_DAY;
        PriceSeries::new(
            date(2018, 1, 1),
            vec![p1; n],
            vec![p2; n],
            vec![p3; n],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_misaligned_horizon() {
        let err = PriceSeries::new(
            date(2018, 1, 1),
            vec![1.0; 50],
            vec![1.0; 50],
            vec![1.0; 50],
        )
        .unwrap_err();
        assert!(matches!(err, BessError::Validation(_)));
        assert!(err.to_string().contains("remainder"));
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = PriceSeries::new(
            date(2018, 1, 1),
            vec![1.0; 48],
            vec![1.0; 48],
            vec![1.0; 96],
        )
        .unwrap_err();
        assert!(matches!(err, BessError::Validation(_)));
    }

    #[test]
    fn test_rejects_non_finite_price() {
        let mut m1 = vec![1.0; 48];
        m1[7] = f64::NAN;
        let err =
            PriceSeries::new(date(2018, 1, 1), m1, vec![1.0; 48], vec![1.0; 48]).unwrap_err();
        assert!(err.to_string().contains("slot 7"));
    }

    #[test]
    fn test_day_count_by_integer_division() {
        let series = flat_series(3, 1.0, 2.0, 3.0);
        assert_eq!(series.num_days(), 3);
        assert_eq!(series.num_slots(), 144);
    }

    #[test]
    fn test_day_window_contents_and_date() {
        let mut m1: Vec<f64> = Vec::new();
        for day in 0..2 {
            for slot in 0..SLOTS_PER_DAY {
                m1.push((day * 100 + slot) as f64);
            }
        }
        let n = m1.len();
        let series =
            PriceSeries::new(date(2018, 1, 1), m1, vec![0.0; n], vec![5.0; n]).unwrap();

        let day0 = series.day(0).unwrap();
        assert_eq!(day0.date, date(2018, 1, 1));
        assert_eq!(day0.market1[0], 0.0);
        assert_eq!(day0.market1[47], 47.0);

        let day1 = series.day(1).unwrap();
        assert_eq!(day1.date, date(2018, 1, 2));
        assert_eq!(day1.market1[0], 100.0);
        assert_eq!(day1.market1[47], 147.0);
        assert_eq!(day1.market3, vec![5.0; SLOTS_PER_DAY]);
    }

    #[test]
    fn test_day_out_of_range_is_error() {
        let series = flat_series(2, 1.0, 1.0, 1.0);
        assert!(series.day(2).is_err());
    }

    #[test]
    fn test_days_iterator_covers_horizon() {
        let series = flat_series(4, 1.0, 1.0, 1.0);
        let dates: Vec<NaiveDate> = series.days().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2018, 1, 1),
                date(2018, 1, 2),
                date(2018, 1, 3),
                date(2018, 1, 4)
            ]
        );
    }

    #[test]
    fn test_price_range() {
        let mut m1 = vec![10.0; 48];
        m1[3] = 2.0;
        m1[40] = 99.0;
        let series =
            PriceSeries::new(date(2018, 1, 1), m1, vec![1.0; 48], vec![1.0; 48]).unwrap();
        assert_eq!(series.price_range(Market::Market1), (2.0, 99.0));
    }
}
