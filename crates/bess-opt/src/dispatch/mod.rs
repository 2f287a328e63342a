//! Daily battery dispatch (MILP)
//!
//! This module implements the Mixed-Integer Linear Programming (MILP)
//! formulation that schedules one day of battery charging/discharging
//! against three electricity markets.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DAILY STORAGE ARBITRAGE DISPATCH                                        │
//! │  ────────────────────────────────                                        │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • 48 half-hour slots with Market 1 and Market 2 prices per slot      │
//! │    • One Market 3 daily price (applied to every slot)                   │
//! │    • Battery capacity, charge/discharge rate limits, optional losses    │
//! │    • Starting storage volume carried over from the previous day         │
//! │                                                                          │
//! │  Decide:                                                                 │
//! │    • Per-slot charge and discharge energy per market (continuous)       │
//! │    • Per-slot charge-vs-discharge mode (binary)                         │
//! │    • Whether Market 3 is used, and in which mode (daily binaries)       │
//! │                                                                          │
//! │  Maximize:                                                               │
//! │    Discharge revenue − charge cost (solved as minimized negation)       │
//! │                                                                          │
//! │  Subject to:                                                             │
//! │    • Storage capacity and rate limits per slot                          │
//! │    • Volume recursion tying consecutive slots together                  │
//! │    • Market 3 flows constant across the day, gated on its usage flag    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! minimize    −Σ_{i,j} p[i,j]·(1−dch_loss)·x[i,j] + Σ_{i,j} p[i,j]·y[i,j]
//!
//! subject to, for every slot j = 1..48:
//!   Σ_i x[i,j] ≤ v[j]                       Cannot discharge more than stored
//!   Σ_i y[i,j] ≤ cap − v[j]                 Cannot charge beyond headroom
//!   Σ_i x[i,j] ≤ dch_rate · mode[j]         Discharge only when mode=1
//!   Σ_i y[i,j] ≤ ch_rate · (1 − mode[j])    Charge only when mode=0
//!   v[j] = v[j−1] − Σ_i (x[i,j] − (1−ch_loss)·y[i,j])
//!                                           Volume after slot j's flows,
//!                                           with v[0] := cap_start carried
//!                                           over from the previous day
//!   v[48] = cap_start                       Daily energy balance: the day
//!                                           hands the carried inventory back
//!
//! and for Market 3 (i = 3):
//!   Σ_j x[3,j] ≤ mode3 · cap                Daily aggregate caps select the
//!   Σ_j y[3,j] ≤ (1−mode3) · cap            market's daily direction
//!   x[3,j] = x[3,j−1], y[3,j] = y[3,j−1]    One fixed rate all day
//!   x[3,j] ≤ used3 · cap, y[3,j] ≤ used3 · cap   No flow unless used
//!   mode[j] − mode3 ≤ 1 − used3             Mode linking (Big-M with M=1,
//!   mode[j] − mode3 ≥ used3 − 1             all operands binary)
//!
//!   mode[j], mode3, used3 ∈ {0,1}; everything else ≥ 0 continuous
//! ```
//!
//! ## Big-M Mode Linking
//!
//! When Market 3 is used, its daily mode must agree with the per-slot
//! combined mode; when unused, no relation is imposed:
//! - used3=1: 0 ≤ mode[j] − mode3 ≤ 0 → mode[j] = mode3 (enforced)
//! - used3=0: −1 ≤ mode[j] − mode3 ≤ 1 (vacuous over binaries)
//!
//! M=1 is exact here because both operands are binary. Do not widen the
//! bounds without re-verifying the disjunction.

mod problem;
mod solution;
mod solver;

pub use problem::{BatteryParams, DayProblem, DayProblemBuilder, DEFAULT_LOSS};
pub use solution::{DaySolution, SlotDispatch};
pub use solver::{solve_day, DispatchError, DispatchSolverConfig};
