//! # bess-opt: Battery Arbitrage Optimization
//!
//! This crate provides the daily dispatch MILP and the rolling-horizon
//! backtest runner for a grid-scale battery trading across three
//! electricity markets.
//!
//! ## Structure
//!
//! - [`dispatch`]: one day's MILP (problem, solver, solution). 48 half-hour
//!   slots, per-slot charge/discharge per market, binary mode selection,
//!   Market 3 traded at a single daily rate and direction.
//! - [`horizon`]: sequential day-by-day runner that threads each day's
//!   ending storage volume into the next day's starting volume.
//! - [`report`]: per-day profit records rolled up into calendar-year totals.
//!
//! ## Example
//!
//! ```ignore
//! use bess_core::PriceSeries;
//! use bess_opt::{run_horizon, HorizonConfig, ProfitReport};
//!
//! let series: PriceSeries = load_prices()?;
//! let run = run_horizon(&series, &HorizonConfig::default())?;
//! let report = ProfitReport::from_run(&run);
//! for (year, profit) in report.yearly_totals() {
//!     println!("{year}: {profit:.2}");
//! }
//! ```

pub mod dispatch;
pub mod horizon;
pub mod report;

pub use dispatch::{
    solve_day, BatteryParams, DayProblem, DayProblemBuilder, DaySolution, DispatchError,
    DispatchSolverConfig, SlotDispatch, DEFAULT_LOSS,
};
pub use horizon::{run_horizon, HorizonConfig, HorizonRun, RecoveryPolicy, SkippedDay};
pub use report::{DailyProfit, ProfitReport};
