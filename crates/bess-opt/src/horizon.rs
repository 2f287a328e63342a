//! Rolling-horizon runner
//!
//! Solves a price series one day at a time, threading the ending storage
//! volume of each day into the next day's starting volume. Days are strictly
//! sequential; day k+1 cannot start until day k's ending volume is known.

use crate::dispatch::{
    solve_day, BatteryParams, DayProblem, DaySolution, DispatchError, DispatchSolverConfig,
};
use bess_core::{BessError, PriceSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What to do when a single day fails to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryPolicy {
    /// Abort the whole run on the first failed day.
    Halt,
    /// Record the failure, keep the current volume, continue with the next day.
    CarryVolume,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        RecoveryPolicy::Halt
    }
}

/// Configuration for a rolling-horizon run.
#[derive(Debug, Clone, Default)]
pub struct HorizonConfig {
    /// Storage asset parameters, shared by every day.
    pub params: BatteryParams,
    /// Per-day solver settings.
    pub solver: DispatchSolverConfig,
    /// Volume at the very start of the horizon; defaults to half of `cap_max`.
    pub initial_volume: Option<f64>,
    /// Failure handling for individual days.
    pub recovery: RecoveryPolicy,
}

/// A day that failed to solve and was skipped under [`RecoveryPolicy::CarryVolume`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: String,
}

/// Outcome of a rolling-horizon run.
#[derive(Debug, Clone)]
pub struct HorizonRun {
    /// Solved days, in date order.
    pub solutions: Vec<DaySolution>,
    /// Days skipped under [`RecoveryPolicy::CarryVolume`], in date order.
    pub skipped: Vec<SkippedDay>,
    /// Storage volume after the last day.
    pub final_volume: f64,
    /// Sum of daily profits over the solved days.
    pub total_profit: f64,
}

impl HorizonRun {
    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Horizon Run\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Days solved: {}\n", self.solutions.len()));
        s.push_str(&format!("Days skipped: {}\n", self.skipped.len()));
        s.push_str(&format!("Total profit: {:.2}\n", self.total_profit));
        s.push_str(&format!("Final volume: {:.3} MWh\n", self.final_volume));
        s
    }
}

/// Solve every day of a price series in order, carrying volume forward.
///
/// The series has already been validated to hold whole days, so slicing
/// cannot fail mid-run. Under [`RecoveryPolicy::Halt`] the first failed day
/// aborts the run; under [`RecoveryPolicy::CarryVolume`] failed days are
/// recorded and the current volume is carried past them unchanged.
pub fn run_horizon(
    series: &PriceSeries,
    config: &HorizonConfig,
) -> Result<HorizonRun, DispatchError> {
    config.params.validate()?;

    let mut volume = config
        .initial_volume
        .unwrap_or_else(|| config.params.default_initial_volume());
    if !(0.0..=config.params.cap_max).contains(&volume) {
        return Err(DispatchError::BadInput(BessError::Validation(format!(
            "initial volume {} outside [0, {}]",
            volume, config.params.cap_max
        ))));
    }

    info!(
        days = series.num_days(),
        start = %series.start_date(),
        initial_volume = volume,
        "starting rolling-horizon run"
    );

    let mut run = HorizonRun {
        solutions: Vec::with_capacity(series.num_days()),
        skipped: Vec::new(),
        final_volume: volume,
        total_profit: 0.0,
    };

    for window in series.days() {
        let problem = DayProblem::from_window(&window, volume, config.params);
        match solve_day(&problem, &config.solver) {
            Ok(solution) => {
                volume = solution.ending_volume;
                run.total_profit += solution.profit;
                run.solutions.push(solution);
            }
            Err(err) => match config.recovery {
                RecoveryPolicy::Halt => return Err(err),
                RecoveryPolicy::CarryVolume => {
                    warn!(date = %window.date, error = %err, "day skipped, volume carried");
                    run.skipped.push(SkippedDay {
                        date: window.date,
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    run.final_volume = volume;
    info!(
        solved = run.solutions.len(),
        skipped = run.skipped.len(),
        total_profit = run.total_profit,
        "horizon run finished"
    );
    Ok(run)
}
