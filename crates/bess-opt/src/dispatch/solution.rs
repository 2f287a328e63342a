//! Dispatch solution data structures
//!
//! Defines the output of one day's solved dispatch MILP.

use bess_core::{Market, SLOTS_PER_DAY};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Solved variable values for one half-hour slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDispatch {
    /// Slot index within the day, 1-based (1..=48).
    pub slot: usize,
    /// Energy discharged into each market this slot (MWh), index order 1,2,3.
    pub discharge: [f64; 3],
    /// Energy charged from each market this slot (MWh), index order 1,2,3.
    pub charge: [f64; 3],
    /// Storage volume entering this slot, before its flows (MWh).
    pub volume: f64,
    /// Combined mode: true = discharging permitted, false = charging permitted.
    pub discharging: bool,
}

impl SlotDispatch {
    /// Total discharge across markets this slot.
    pub fn total_discharge(&self) -> f64 {
        self.discharge.iter().sum()
    }

    /// Total charge across markets this slot.
    pub fn total_charge(&self) -> f64 {
        self.charge.iter().sum()
    }
}

/// Complete solution to one day's dispatch problem.
///
/// Owned by the result aggregator once the day completes; never mutated or
/// revisited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySolution {
    /// Calendar date of the dispatched day.
    pub date: NaiveDate,
    /// Profit for the day, positive sign convention (revenue − cost).
    pub profit: f64,
    /// Raw objective value as minimized by the solver (−profit).
    pub objective_value: f64,
    /// Per-slot variable assignments (always 48 entries).
    pub slots: Vec<SlotDispatch>,
    /// Storage volume at the end of slot 48, carried into the next day.
    pub ending_volume: f64,
    /// Whether Market 3 traded at all this day.
    pub market3_used: bool,
    /// Market 3 daily direction: true = discharging, false = charging.
    pub market3_discharging: bool,
    /// Wall-clock solve time for this day.
    pub solve_time: Duration,
}

impl DaySolution {
    /// Total energy discharged into a market over the day.
    pub fn total_discharge(&self, market: Market) -> f64 {
        self.slots.iter().map(|s| s.discharge[market.index()]).sum()
    }

    /// Total energy charged from a market over the day.
    pub fn total_charge(&self, market: Market) -> f64 {
        self.slots.iter().map(|s| s.charge[market.index()]).sum()
    }

    /// Largest storage volume reached during the day.
    pub fn peak_volume(&self) -> f64 {
        self.slots.iter().map(|s| s.volume).fold(0.0, f64::max)
    }

    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Dispatch {}\n{}\n", self.date, "=".repeat(40)));
        s.push_str(&format!("Profit: {:.2}\n", self.profit));
        s.push_str(&format!("Ending Volume: {:.3} MWh\n", self.ending_volume));
        s.push_str(&format!("Peak Volume: {:.3} MWh\n", self.peak_volume()));
        for market in Market::all() {
            s.push_str(&format!(
                "{}: discharged {:.3} MWh, charged {:.3} MWh\n",
                market,
                self.total_discharge(*market),
                self.total_charge(*market)
            ));
        }
        s.push_str(&format!(
            "Market 3: {}\n",
            if !self.market3_used {
                "unused"
            } else if self.market3_discharging {
                "discharging all day"
            } else {
                "charging all day"
            }
        ));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));
        s
    }
}

/// Empty scaffold the solver fills in; `slots` starts with capacity 48.
impl Default for DaySolution {
    fn default() -> Self {
        Self {
            date: NaiveDate::default(),
            profit: 0.0,
            objective_value: 0.0,
            slots: Vec::with_capacity(SLOTS_PER_DAY),
            ending_volume: 0.0,
            market3_used: false,
            market3_discharging: false,
            solve_time: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_solution() -> DaySolution {
        let mut slots = Vec::new();
        for j in 1..=SLOTS_PER_DAY {
            let charging = j <= 24;
            slots.push(SlotDispatch {
                slot: j,
                discharge: if charging { [0.0; 3] } else { [1.0, 0.0, 0.0] },
                charge: if charging { [0.5, 0.5, 0.0] } else { [0.0; 3] },
                volume: 2.0,
                discharging: !charging,
            });
        }
        DaySolution {
            date: NaiveDate::from_ymd_opt(2019, 6, 15).unwrap(),
            profit: 12.5,
            objective_value: -12.5,
            slots,
            ending_volume: 2.0,
            market3_used: false,
            market3_discharging: false,
            solve_time: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_totals_per_market() {
        let solution = sample_solution();
        assert_eq!(solution.total_discharge(Market::Market1), 24.0);
        assert_eq!(solution.total_charge(Market::Market1), 12.0);
        assert_eq!(solution.total_charge(Market::Market2), 12.0);
        assert_eq!(solution.total_discharge(Market::Market3), 0.0);
    }

    #[test]
    fn test_slot_totals() {
        let solution = sample_solution();
        assert_eq!(solution.slots[0].total_charge(), 1.0);
        assert_eq!(solution.slots[47].total_discharge(), 1.0);
    }

    #[test]
    fn test_default_is_an_empty_scaffold() {
        let solution = DaySolution::default();
        assert_eq!(solution.date, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert!(solution.slots.is_empty());
        assert_eq!(solution.profit, 0.0);
    }

    #[test]
    fn test_summary_mentions_profit_and_market3() {
        let solution = sample_solution();
        let summary = solution.summary();
        assert!(summary.contains("Profit: 12.50"));
        assert!(summary.contains("Market 3: unused"));
    }
}
