//! Dispatch problem data structures
//!
//! Defines the input data for one day's dispatch MILP.

use bess_core::{BessError, BessResult, DayPrices, SLOTS_PER_DAY};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default efficiency loss fraction per direction when loss modeling is on.
pub const DEFAULT_LOSS: f64 = 0.05;

/// Physical parameters of the storage asset.
///
/// Rates are per half-hour slot (MWh moved in one slot), capacities in MWh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatteryParams {
    /// Maximum storage volume (MWh).
    pub cap_max: f64,
    /// Maximum energy charged in one slot (MWh per half-hour).
    pub ch_rate: f64,
    /// Maximum energy discharged in one slot (MWh per half-hour).
    pub dch_rate: f64,
    /// Fraction of charged energy lost before it reaches storage.
    pub ch_loss: f64,
    /// Fraction of discharged energy lost before it reaches the market.
    pub dch_loss: f64,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            cap_max: 4.0,
            ch_rate: 1.0,
            dch_rate: 1.0,
            ch_loss: 0.0,
            dch_loss: 0.0,
        }
    }
}

impl BatteryParams {
    /// Enable the linear loss model with the same fraction in both directions.
    pub fn with_loss(mut self, loss: f64) -> Self {
        self.ch_loss = loss;
        self.dch_loss = loss;
        self
    }

    /// Volume assumed at the very start of a horizon (half full).
    pub fn default_initial_volume(&self) -> f64 {
        self.cap_max / 2.0
    }

    /// Check physical plausibility of the parameters.
    pub fn validate(&self) -> BessResult<()> {
        if !(self.cap_max > 0.0 && self.cap_max.is_finite()) {
            return Err(BessError::Config(format!(
                "cap_max must be positive and finite, got {}",
                self.cap_max
            )));
        }
        if !(self.ch_rate > 0.0 && self.ch_rate.is_finite())
            || !(self.dch_rate > 0.0 && self.dch_rate.is_finite())
        {
            return Err(BessError::Config(format!(
                "rates must be positive and finite, got ch_rate={}, dch_rate={}",
                self.ch_rate, self.dch_rate
            )));
        }
        for (name, loss) in [("ch_loss", self.ch_loss), ("dch_loss", self.dch_loss)] {
            if !(0.0..1.0).contains(&loss) {
                return Err(BessError::Config(format!(
                    "{name} must be in [0, 1), got {loss}"
                )));
            }
        }
        Ok(())
    }
}

/// One day's dispatch problem: prices, carried-over volume, battery params.
///
/// A fresh, independent problem is built per day; nothing is reused between
/// days except the scalar `cap_start` threaded in by the horizon runner.
#[derive(Debug, Clone)]
pub struct DayProblem {
    /// Calendar date of the day being dispatched.
    pub date: NaiveDate,
    /// Per-market slot prices (index order: Market 1, 2, 3).
    pub prices: [Vec<f64>; 3],
    /// Storage volume at the start of the day (end of the previous day).
    pub cap_start: f64,
    /// Storage asset parameters.
    pub params: BatteryParams,
}

impl DayProblem {
    /// Build a problem from a sliced daily price window.
    pub fn from_window(window: &DayPrices, cap_start: f64, params: BatteryParams) -> Self {
        Self {
            date: window.date,
            prices: [
                window.market1.clone(),
                window.market2.clone(),
                window.market3.clone(),
            ],
            cap_start,
            params,
        }
    }

    /// Validate the problem before handing it to the solver.
    pub fn validate(&self) -> BessResult<()> {
        self.params.validate()?;
        for (i, prices) in self.prices.iter().enumerate() {
            if prices.len() != SLOTS_PER_DAY {
                return Err(BessError::Validation(format!(
                    "{}: market {} window has {} slots, expected {SLOTS_PER_DAY}",
                    self.date,
                    i + 1,
                    prices.len()
                )));
            }
            if let Some(pos) = prices.iter().position(|p| !p.is_finite()) {
                return Err(BessError::Validation(format!(
                    "{}: market {} price at slot {} is not finite",
                    self.date,
                    i + 1,
                    pos + 1
                )));
            }
        }
        if !(0.0..=self.params.cap_max).contains(&self.cap_start) {
            return Err(BessError::Validation(format!(
                "{}: starting volume {} outside [0, {}]",
                self.date, self.cap_start, self.params.cap_max
            )));
        }
        Ok(())
    }
}

/// Builder for constructing day problems in tests and ad-hoc runs.
pub struct DayProblemBuilder {
    date: NaiveDate,
    market1: Vec<f64>,
    market2: Vec<f64>,
    market3_daily_price: f64,
    cap_start: Option<f64>,
    params: BatteryParams,
}

impl DayProblemBuilder {
    /// Start building a problem for the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            market1: vec![0.0; SLOTS_PER_DAY],
            market2: vec![0.0; SLOTS_PER_DAY],
            market3_daily_price: 0.0,
            cap_start: None,
            params: BatteryParams::default(),
        }
    }

    /// Market 1 slot prices (must be 48 values).
    pub fn market1(mut self, prices: Vec<f64>) -> Self {
        self.market1 = prices;
        self
    }

    /// Market 2 slot prices (must be 48 values).
    pub fn market2(mut self, prices: Vec<f64>) -> Self {
        self.market2 = prices;
        self
    }

    /// Market 3 daily price, broadcast to every slot.
    pub fn market3_daily_price(mut self, price: f64) -> Self {
        self.market3_daily_price = price;
        self
    }

    /// Starting volume; defaults to half of `cap_max`.
    pub fn cap_start(mut self, volume: f64) -> Self {
        self.cap_start = Some(volume);
        self
    }

    /// Battery parameters; defaults to `BatteryParams::default()`.
    pub fn params(mut self, params: BatteryParams) -> Self {
        self.params = params;
        self
    }

    /// Build the day problem.
    pub fn build(self) -> DayProblem {
        let cap_start = self
            .cap_start
            .unwrap_or_else(|| self.params.default_initial_volume());
        DayProblem {
            date: self.date,
            prices: [
                self.market1,
                self.market2,
                vec![self.market3_daily_price; SLOTS_PER_DAY],
            ],
            cap_start,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
    }

    #[test]
    fn test_default_params() {
        let params = BatteryParams::default();
        assert_eq!(params.cap_max, 4.0);
        assert_eq!(params.ch_rate, 1.0);
        assert_eq!(params.dch_rate, 1.0);
        assert_eq!(params.ch_loss, 0.0);
        assert_eq!(params.default_initial_volume(), 2.0);
    }

    #[test]
    fn test_with_loss() {
        let params = BatteryParams::default().with_loss(DEFAULT_LOSS);
        assert_eq!(params.ch_loss, 0.05);
        assert_eq!(params.dch_loss, 0.05);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_loss_rejected() {
        let params = BatteryParams::default().with_loss(1.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_builder_broadcasts_market3() {
        let problem = DayProblemBuilder::new(date())
            .market1(vec![10.0; SLOTS_PER_DAY])
            .market2(vec![11.0; SLOTS_PER_DAY])
            .market3_daily_price(9.5)
            .build();
        assert_eq!(problem.prices[2], vec![9.5; SLOTS_PER_DAY]);
        assert_eq!(problem.cap_start, 2.0);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_window() {
        let problem = DayProblemBuilder::new(date()).market1(vec![1.0; 47]).build();
        assert!(problem.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cap_start_out_of_range() {
        let problem = DayProblemBuilder::new(date()).cap_start(4.5).build();
        assert!(problem.validate().is_err());
    }

    #[test]
    fn test_from_window() {
        let window = DayPrices {
            date: date(),
            market1: vec![1.0; SLOTS_PER_DAY],
            market2: vec![2.0; SLOTS_PER_DAY],
            market3: vec![3.0; SLOTS_PER_DAY],
        };
        let problem = DayProblem::from_window(&window, 1.5, BatteryParams::default());
        assert_eq!(problem.date, date());
        assert_eq!(problem.cap_start, 1.5);
        assert_eq!(problem.prices[1][0], 2.0);
        assert!(problem.validate().is_ok());
    }
}
