//! # bess-io: Price Loaders and Result Exporters
//!
//! Input/output layer for battery arbitrage backtests:
//!
//! - [`importers`]: build a validated [`bess_core::PriceSeries`] from CSV
//!   files or an XLSX workbook, broadcasting the Market 3 daily price to
//!   slot resolution.
//! - [`exporters`]: write solved dispatch schedules and daily/yearly profit
//!   reports to CSV.

pub mod exporters;
pub mod importers;

pub use exporters::{write_daily_profit_csv, write_dispatch_csv, write_yearly_profit_csv};
pub use importers::{load_prices_csv, load_prices_xlsx};
