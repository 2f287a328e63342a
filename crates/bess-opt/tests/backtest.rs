//! End-to-end backtest over a small multi-day horizon.

use bess_core::{PriceSeries, SLOTS_PER_DAY};
use bess_opt::{run_horizon, BatteryParams, HorizonConfig, ProfitReport};
use chrono::NaiveDate;

const EPS: f64 = 1e-6;

/// Days with a cheap first half and an expensive second half in Market 1.
fn spread_series(start: NaiveDate, days: usize) -> PriceSeries {
    let mut m1 = Vec::new();
    for _ in 0..days {
        m1.extend(std::iter::repeat(5.0).take(24));
        m1.extend(std::iter::repeat(20.0).take(24));
    }
    let n = days * SLOTS_PER_DAY;
    PriceSeries::new(start, m1, vec![5.0; n], vec![5.0; n]).unwrap()
}

#[test]
fn backtest_three_days_is_continuous_and_profitable() {
    let series = spread_series(NaiveDate::from_ymd_opt(2018, 6, 1).unwrap(), 3);
    let run = run_horizon(&series, &HorizonConfig::default()).unwrap();

    assert_eq!(run.solutions.len(), 3);
    assert!(run.skipped.is_empty());

    // Day boundaries: each day opens with the previous day's ending volume
    for w in run.solutions.windows(2) {
        assert_eq!(w[1].slots[0].volume, w[0].ending_volume);
    }

    // Identical days under identical starting volume earn identical profit
    assert!((run.solutions[0].profit - run.solutions[1].profit).abs() < 1e-4);
    assert!(run.total_profit > 0.0);
}

#[test]
fn backtest_report_splits_profit_on_year_boundary() {
    let series = spread_series(NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(), 2);
    let run = run_horizon(&series, &HorizonConfig::default()).unwrap();
    let report = ProfitReport::from_run(&run);

    let totals = report.yearly_totals();
    assert_eq!(totals.len(), 2);
    assert!(totals[&2018] > 0.0);
    assert!(totals[&2019] > 0.0);
    assert!((totals[&2018] + totals[&2019] - run.total_profit).abs() < EPS);

    assert_eq!(report.daily[0].date, NaiveDate::from_ymd_opt(2018, 12, 31).unwrap());
    assert_eq!(report.daily[1].date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
}

#[test]
fn backtest_losses_lower_the_total() {
    let series = spread_series(NaiveDate::from_ymd_opt(2018, 6, 1).unwrap(), 2);

    let lossless = run_horizon(&series, &HorizonConfig::default()).unwrap();
    let lossy = run_horizon(
        &series,
        &HorizonConfig {
            params: BatteryParams::default().with_loss(0.05),
            ..HorizonConfig::default()
        },
    )
    .unwrap();

    assert!(lossy.total_profit < lossless.total_profit);
    assert!(lossy.total_profit >= -EPS);
}
