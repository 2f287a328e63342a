//! # bess-core: Battery Storage Scheduling Core
//!
//! Provides the fundamental data structures for battery energy-storage
//! arbitrage backtesting: market identifiers, the half-hourly slot grid,
//! validated full-horizon price series and daily window slicing, plus the
//! unified error type shared across the workspace.
//!
//! ## Design
//!
//! The battery trades against three electricity markets:
//! - **Market 1** and **Market 2** price every half-hour slot independently;
//! - **Market 3** carries one daily price, broadcast to all 48 slots of its
//!   day by the price loader.
//!
//! A backtest horizon is a read-only [`PriceSeries`] covering whole days
//! only. The per-day optimizer consumes 48-slot [`DayPrices`] windows; the
//! only state threaded between days is the scalar end-of-day storage volume
//! (owned by `bess-opt`, not by this crate).
//!
//! ## Modules
//!
//! - [`error`] - Unified [`BessError`] / [`BessResult`]
//! - [`market`] - [`Market`] enum and slot constants
//! - [`series`] - [`PriceSeries`] and [`DayPrices`] windows

pub mod error;
pub mod market;
pub mod series;

pub use error::{BessError, BessResult};
pub use market::{Market, SLOTS_PER_DAY};
pub use series::{DayPrices, PriceSeries};
