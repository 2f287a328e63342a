//! Profit aggregation
//!
//! Collects per-day profits from a horizon run and rolls them up into
//! calendar-year totals. Partial years are aggregated as-is; a year's total
//! covers exactly the solved days falling in it.

use crate::dispatch::DaySolution;
use crate::horizon::HorizonRun;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's realized profit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyProfit {
    pub date: NaiveDate,
    pub profit: f64,
}

/// Daily profit records with calendar-year rollups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitReport {
    /// Per-day profits, in date order.
    pub daily: Vec<DailyProfit>,
}

impl ProfitReport {
    /// Build a report from solved days.
    pub fn from_solutions(solutions: &[DaySolution]) -> Self {
        Self {
            daily: solutions
                .iter()
                .map(|s| DailyProfit {
                    date: s.date,
                    profit: s.profit,
                })
                .collect(),
        }
    }

    /// Build a report from a horizon run (skipped days contribute nothing).
    pub fn from_run(run: &HorizonRun) -> Self {
        Self::from_solutions(&run.solutions)
    }

    /// Number of days in the report.
    pub fn num_days(&self) -> usize {
        self.daily.len()
    }

    /// Sum of all daily profits.
    pub fn total_profit(&self) -> f64 {
        self.daily.iter().map(|d| d.profit).sum()
    }

    /// Profit totals keyed by calendar year, in ascending year order.
    pub fn yearly_totals(&self) -> BTreeMap<i32, f64> {
        let mut totals = BTreeMap::new();
        for day in &self.daily {
            *totals.entry(day.date.year()).or_insert(0.0) += day.profit;
        }
        totals
    }

    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Profit Report\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Days: {}\n", self.num_days()));
        for (year, total) in self.yearly_totals() {
            s.push_str(&format!("{year}: {total:.2}\n"));
        }
        s.push_str(&format!("Total: {:.2}\n", self.total_profit()));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, profit: f64) -> DailyProfit {
        DailyProfit {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            profit,
        }
    }

    #[test]
    fn test_yearly_totals_split_on_calendar_year() {
        let report = ProfitReport {
            daily: vec![
                day(2018, 12, 30, 10.0),
                day(2018, 12, 31, 5.0),
                day(2019, 1, 1, 7.5),
            ],
        };
        let totals = report.yearly_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&2018], 15.0);
        assert_eq!(totals[&2019], 7.5);
        assert_eq!(report.total_profit(), 22.5);
    }

    #[test]
    fn test_partial_year_aggregates_as_is() {
        let report = ProfitReport {
            daily: vec![day(2020, 6, 1, 3.0), day(2020, 6, 2, -1.0)],
        };
        let totals = report.yearly_totals();
        assert_eq!(totals[&2020], 2.0);
        assert_eq!(report.num_days(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = ProfitReport::default();
        assert_eq!(report.num_days(), 0);
        assert_eq!(report.total_profit(), 0.0);
        assert!(report.yearly_totals().is_empty());
    }

    #[test]
    fn test_summary_lists_years_in_order() {
        let report = ProfitReport {
            daily: vec![day(2019, 1, 1, 1.0), day(2018, 1, 1, 2.0)],
        };
        let summary = report.summary();
        let pos_2018 = summary.find("2018:").unwrap();
        let pos_2019 = summary.find("2019:").unwrap();
        assert!(pos_2018 < pos_2019);
        assert!(summary.contains("Total: 3.00"));
    }
}
