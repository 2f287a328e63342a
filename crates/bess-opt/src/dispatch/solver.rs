//! Dispatch MILP solver
//!
//! Builds the daily arbitrage MILP from a [`DayProblem`] and hands it to
//! HiGHS through the `good_lp` modeling layer.

use super::{DayProblem, DaySolution, SlotDispatch};
use bess_core::{BessError, SLOTS_PER_DAY};
use chrono::NaiveDate;
use good_lp::{
    constraint, highs, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Dispatch solver configuration
#[derive(Debug, Clone)]
pub struct DispatchSolverConfig {
    /// Per-day wall-clock budget (seconds). A day whose solve exceeds this
    /// is reported as [`DispatchError::Timeout`].
    pub max_time_seconds: f64,
    /// MIP optimality gap tolerance (advisory; not forwarded to the backend)
    pub mip_gap: f64,
    /// Whether to log per-day solve statistics at info level
    pub verbose: bool,
}

impl Default for DispatchSolverConfig {
    fn default() -> Self {
        Self {
            max_time_seconds: 300.0, // 5 minutes
            mip_gap: 0.01,           // 1% gap
            verbose: false,
        }
    }
}

/// Dispatch solver errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Problem failed input validation
    #[error("invalid dispatch input: {0}")]
    BadInput(#[from] BessError),
    /// The day's constraints admit no solution
    #[error("dispatch for {date} is infeasible")]
    Infeasible { date: NaiveDate },
    /// The objective is unbounded (indicates a broken formulation)
    #[error("dispatch for {date} is unbounded")]
    Unbounded { date: NaiveDate },
    /// The solver backend failed
    #[error("solver failed for {date}: {message}")]
    SolverFailed { date: NaiveDate, message: String },
    /// The solve finished but blew the configured time budget
    #[error("dispatch for {date} took {elapsed:?}, over the {limit_seconds}s budget")]
    Timeout {
        date: NaiveDate,
        elapsed: Duration,
        limit_seconds: f64,
    },
}

/// Solve one day's dispatch problem.
///
/// Constructs a fresh MILP instance (nothing is reused between days), solves
/// it with HiGHS, and extracts every variable. Infeasibility and solver
/// failure surface as errors; undefined variable values are never returned.
///
/// # Example
///
/// ```no_run
/// use bess_opt::dispatch::{solve_day, DayProblemBuilder, DispatchSolverConfig};
/// use chrono::NaiveDate;
///
/// let problem = DayProblemBuilder::new(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap())
///     .market1(vec![10.0; 48])
///     .market2(vec![10.0; 48])
///     .market3_daily_price(10.0)
///     .build();
///
/// let solution = solve_day(&problem, &DispatchSolverConfig::default())?;
/// println!("{}", solution.summary());
/// # Ok::<(), bess_opt::dispatch::DispatchError>(())
/// ```
pub fn solve_day(
    problem: &DayProblem,
    config: &DispatchSolverConfig,
) -> Result<DaySolution, DispatchError> {
    let start = Instant::now();
    problem.validate()?;

    let params = &problem.params;
    let cap = params.cap_max;
    let dch_eff = 1.0 - params.dch_loss;
    let ch_eff = 1.0 - params.ch_loss;

    // === Variables ===
    // x[i][j]: discharge into market i at slot j (MWh, ≥ 0)
    // y[i][j]: charge from market i at slot j (MWh, ≥ 0)
    // v[j]:    storage volume at the end of slot j (MWh, [0, cap])
    // mode[j]: 1 = discharging, 0 = charging (per-slot binary)
    // mode3:   Market 3 daily direction (binary)
    // used3:   whether Market 3 trades at all today (binary)
    //
    // The loss-adjusted quantities x_r = (1−dch_loss)·x and
    // y_r = (1−ch_loss)·y are substituted directly as coefficients.
    let mut vars = variables!();
    let x: Vec<Vec<Variable>> = (0..3)
        .map(|_| vars.add_vector(variable().min(0.0), SLOTS_PER_DAY))
        .collect();
    let y: Vec<Vec<Variable>> = (0..3)
        .map(|_| vars.add_vector(variable().min(0.0), SLOTS_PER_DAY))
        .collect();
    let v = vars.add_vector(variable().min(0.0).max(cap), SLOTS_PER_DAY);
    let mode = vars.add_vector(variable().binary(), SLOTS_PER_DAY);
    let mode3 = vars.add(variable().binary());
    let used3 = vars.add(variable().binary());

    // === Objective ===
    // minimize −Σ p·(1−dch_loss)·x + Σ p·y  (i.e. maximize revenue − cost)
    let mut objective = Expression::from(0.0);
    for i in 0..3 {
        for j in 0..SLOTS_PER_DAY {
            let p = problem.prices[i][j];
            objective += p * y[i][j] - p * dch_eff * x[i][j];
        }
    }

    let mut model = vars.minimise(objective).using(highs);

    // === Per-slot constraints ===
    for j in 0..SLOTS_PER_DAY {
        let total_x: Expression = x[0][j] + x[1][j] + x[2][j];
        let total_y: Expression = y[0][j] + y[1][j] + y[2][j];
        let charged: Expression = ch_eff * y[0][j] + ch_eff * y[1][j] + ch_eff * y[2][j];

        // Cannot discharge more than stored
        model = model.with(constraint!(total_x.clone() <= v[j]));
        // Cannot charge beyond remaining headroom
        model = model.with(constraint!(total_y.clone() <= cap - v[j]));
        // Rate limits gated on the mode binary: together they make charging
        // and discharging within one slot mutually exclusive
        model = model.with(constraint!(total_x.clone() <= params.dch_rate * mode[j]));
        model = model.with(constraint!(
            total_y.clone() <= params.ch_rate - params.ch_rate * mode[j]
        ));

        // Volume recursion: the defining recurrence of the model. Every
        // slot's flows enter the balance, slot 1 included (the carried-over
        // volume acts as v[0]).
        if j == 0 {
            model = model.with(constraint!(v[0] == problem.cap_start - total_x + charged));
        } else {
            model = model.with(constraint!(v[j] == v[j - 1] - total_x + charged));
        }
    }

    // Daily energy balance: the day must hand the carried inventory back.
    // Without this, any positive price lets the optimizer liquidate the
    // carried volume for profit that is not arbitrage.
    model = model.with(constraint!(v[SLOTS_PER_DAY - 1] == problem.cap_start));

    // === Market 3 constraints ===
    // Daily aggregate caps select the market's direction for the day
    let mut m3_discharge = Expression::from(0.0);
    let mut m3_charge = Expression::from(0.0);
    for j in 0..SLOTS_PER_DAY {
        m3_discharge += x[2][j];
        m3_charge += y[2][j];
    }
    model = model.with(constraint!(m3_discharge <= cap * mode3));
    model = model.with(constraint!(m3_charge <= cap - cap * mode3));

    for j in 0..SLOTS_PER_DAY {
        // One fixed trade rate all day (single daily price)
        if j > 0 {
            model = model.with(constraint!(x[2][j] == x[2][j - 1]));
            model = model.with(constraint!(y[2][j] == y[2][j - 1]));
        }
        // No Market 3 flow unless used3 = 1
        model = model.with(constraint!(x[2][j] <= cap * used3));
        model = model.with(constraint!(y[2][j] <= cap * used3));
        // Mode linking, Big-M pair with M = 1 (all operands binary):
        //   used3=1 → mode[j] = mode3 (enforced)
        //   used3=0 → −1 ≤ mode[j] − mode3 ≤ 1 (vacuous)
        model = model.with(constraint!(mode[j] - mode3 <= 1.0 - used3));
        model = model.with(constraint!(mode[j] - mode3 >= used3 - 1.0));
    }

    // === Solve ===
    let solution = model.solve().map_err(|e| match e {
        ResolutionError::Infeasible => DispatchError::Infeasible { date: problem.date },
        ResolutionError::Unbounded => DispatchError::Unbounded { date: problem.date },
        other => DispatchError::SolverFailed {
            date: problem.date,
            message: format!("{other:?}"),
        },
    })?;

    let elapsed = start.elapsed();
    if elapsed.as_secs_f64() > config.max_time_seconds {
        return Err(DispatchError::Timeout {
            date: problem.date,
            elapsed,
            limit_seconds: config.max_time_seconds,
        });
    }

    // === Extract results ===
    let mut result = DaySolution {
        date: problem.date,
        solve_time: elapsed,
        ..DaySolution::default()
    };

    let mut revenue = 0.0;
    let mut cost = 0.0;
    for j in 0..SLOTS_PER_DAY {
        let mut discharge = [0.0; 3];
        let mut charge = [0.0; 3];
        for i in 0..3 {
            discharge[i] = solution.value(x[i][j]);
            charge[i] = solution.value(y[i][j]);
            revenue += problem.prices[i][j] * dch_eff * discharge[i];
            cost += problem.prices[i][j] * charge[i];
        }
        // Reported per-slot volume is the stock entering the slot
        let entering = if j == 0 {
            problem.cap_start
        } else {
            solution.value(v[j - 1])
        };
        result.slots.push(SlotDispatch {
            slot: j + 1,
            discharge,
            charge,
            volume: entering,
            discharging: solution.value(mode[j]) > 0.5,
        });
    }

    // Profit reported with positive sign; the solve minimized its negation
    result.profit = revenue - cost;
    result.objective_value = -result.profit;
    result.ending_volume = solution.value(v[SLOTS_PER_DAY - 1]);
    result.market3_used = solution.value(used3) > 0.5;
    result.market3_discharging = solution.value(mode3) > 0.5;

    debug!(
        date = %problem.date,
        profit = result.profit,
        ending_volume = result.ending_volume,
        solve_ms = elapsed.as_millis() as u64,
        "dispatch solved"
    );
    if config.verbose {
        tracing::info!(date = %problem.date, profit = result.profit, "dispatch solved");
    }

    Ok(result)
}
