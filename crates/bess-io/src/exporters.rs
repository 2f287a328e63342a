//! Result exporters
//!
//! CSV writers for solved dispatch schedules and profit reports. Slot rows
//! carry a half-hourly timestamp derived from the day's date, so exported
//! schedules line up with the input price series.

use bess_core::{BessError, BessResult};
use bess_opt::{DaySolution, ProfitReport};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct SlotRow {
    datetime: NaiveDateTime,
    date: chrono::NaiveDate,
    slot: usize,
    market1_discharge: f64,
    market2_discharge: f64,
    market3_discharge: f64,
    market1_charge: f64,
    market2_charge: f64,
    market3_charge: f64,
    volume: f64,
    mode: &'static str,
}

#[derive(Debug, Serialize)]
struct DailyRow {
    date: chrono::NaiveDate,
    profit: f64,
}

#[derive(Debug, Serialize)]
struct YearlyRow {
    year: i32,
    profit: f64,
}

fn writer(path: &Path) -> BessResult<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path)
        .map_err(|e| BessError::Io(std::io::Error::other(format!("{}: {e}", path.display()))))
}

/// Write the full half-hourly dispatch schedule of every solved day.
pub fn write_dispatch_csv(path: &Path, solutions: &[DaySolution]) -> BessResult<()> {
    let mut out = writer(path)?;
    for solution in solutions {
        let midnight = solution
            .date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| BessError::Other(format!("bad date {}", solution.date)))?;
        for slot in &solution.slots {
            out.serialize(SlotRow {
                datetime: midnight + Duration::minutes(30 * (slot.slot as i64 - 1)),
                date: solution.date,
                slot: slot.slot,
                market1_discharge: slot.discharge[0],
                market2_discharge: slot.discharge[1],
                market3_discharge: slot.discharge[2],
                market1_charge: slot.charge[0],
                market2_charge: slot.charge[1],
                market3_charge: slot.charge[2],
                volume: slot.volume,
                mode: if slot.discharging {
                    "discharge"
                } else {
                    "charge"
                },
            })
            .map_err(|e| BessError::Other(format!("writing {}: {e}", path.display())))?;
        }
    }
    out.flush()?;
    info!(path = %path.display(), days = solutions.len(), "dispatch schedule written");
    Ok(())
}

/// Write one row per day: date and realized profit.
pub fn write_daily_profit_csv(path: &Path, report: &ProfitReport) -> BessResult<()> {
    let mut out = writer(path)?;
    for day in &report.daily {
        out.serialize(DailyRow {
            date: day.date,
            profit: day.profit,
        })
        .map_err(|e| BessError::Other(format!("writing {}: {e}", path.display())))?;
    }
    out.flush()?;
    Ok(())
}

/// Write one row per calendar year: year and total profit.
pub fn write_yearly_profit_csv(path: &Path, report: &ProfitReport) -> BessResult<()> {
    let mut out = writer(path)?;
    for (year, profit) in report.yearly_totals() {
        out.serialize(YearlyRow { year, profit })
            .map_err(|e| BessError::Other(format!("writing {}: {e}", path.display())))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bess_core::SLOTS_PER_DAY;
    use bess_opt::{DailyProfit, SlotDispatch};
    use chrono::NaiveDate;
    use std::time::Duration as StdDuration;

    fn sample_solution(date: NaiveDate, profit: f64) -> DaySolution {
        let mut slots = Vec::new();
        for j in 1..=SLOTS_PER_DAY {
            slots.push(SlotDispatch {
                slot: j,
                discharge: [0.5, 0.0, 0.0],
                charge: [0.0; 3],
                volume: 2.0,
                discharging: true,
            });
        }
        DaySolution {
            date,
            profit,
            objective_value: -profit,
            slots,
            ending_volume: 2.0,
            market3_used: false,
            market3_discharging: false,
            solve_time: StdDuration::from_millis(1),
        }
    }

    #[test]
    fn test_dispatch_csv_has_half_hourly_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispatch.csv");
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        write_dispatch_csv(&path, &[sample_solution(date, 5.0)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1 + SLOTS_PER_DAY);
        assert!(lines[1].starts_with("2018-01-01T00:00:00,"));
        assert!(lines[2].starts_with("2018-01-01T00:30:00,"));
        assert!(lines[48].starts_with("2018-01-01T23:30:00,"));
        assert!(lines[1].ends_with("discharge"));
    }

    #[test]
    fn test_daily_and_yearly_profit_csv() {
        let dir = tempfile::tempdir().unwrap();
        let report = ProfitReport {
            daily: vec![
                DailyProfit {
                    date: NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
                    profit: 10.0,
                },
                DailyProfit {
                    date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
                    profit: 2.5,
                },
            ],
        };

        let daily_path = dir.path().join("daily.csv");
        write_daily_profit_csv(&daily_path, &report).unwrap();
        let daily = std::fs::read_to_string(&daily_path).unwrap();
        assert!(daily.contains("2018-12-31,10.0"));

        let yearly_path = dir.path().join("yearly.csv");
        write_yearly_profit_csv(&yearly_path, &report).unwrap();
        let yearly = std::fs::read_to_string(&yearly_path).unwrap();
        assert!(yearly.contains("2018,10.0"));
        assert!(yearly.contains("2019,2.5"));
    }
}
