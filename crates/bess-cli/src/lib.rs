//! Command-line interface for the battery arbitrage backtester.

pub mod cli;
