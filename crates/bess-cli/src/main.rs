use anyhow::{bail, Context, Result};
use bess_cli::cli::{BatteryArgs, Cli, Commands, InputArgs, OnError};
use bess_core::{Market, PriceSeries};
use bess_io::{
    load_prices_csv, load_prices_xlsx, write_daily_profit_csv, write_dispatch_csv,
    write_yearly_profit_csv,
};
use bess_opt::{
    run_horizon, BatteryParams, DispatchSolverConfig, HorizonConfig, ProfitReport, RecoveryPolicy,
};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use tabwriter::TabWriter;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn load_series(input: &InputArgs) -> Result<PriceSeries> {
    if let Some(xlsx) = &input.xlsx {
        return load_prices_xlsx(
            xlsx,
            &input.half_hourly_sheet,
            &input.daily_sheet,
            input.start_date,
        )
        .with_context(|| format!("loading prices from '{}'", xlsx.display()));
    }
    match (&input.half_hourly, &input.daily) {
        (Some(half), Some(daily)) => load_prices_csv(half, daily, input.start_date)
            .with_context(|| format!("loading prices from '{}'", half.display())),
        _ => bail!("provide either --xlsx or both --half-hourly and --daily"),
    }
}

fn battery_params(args: &BatteryArgs) -> BatteryParams {
    BatteryParams {
        cap_max: args.cap_max,
        ch_rate: args.charge_rate,
        dch_rate: args.discharge_rate,
        ch_loss: args.loss,
        dch_loss: args.loss,
    }
}

fn print_yearly_table(report: &ProfitReport) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "Year\tProfit")?;
    for (year, profit) in report.yearly_totals() {
        writeln!(writer, "{year}\t{profit:.2}")?;
    }
    writeln!(writer, "Total\t{:.2}", report.total_profit())?;
    writer.flush()?;
    Ok(())
}

fn cmd_run(
    input: &InputArgs,
    out: Option<&std::path::Path>,
    battery: &BatteryArgs,
    initial_volume: Option<f64>,
    on_error: OnError,
    max_time: f64,
) -> Result<()> {
    let series = load_series(input)?;
    info!(
        days = series.num_days(),
        start = %series.start_date(),
        "price series loaded"
    );

    let config = HorizonConfig {
        params: battery_params(battery),
        solver: DispatchSolverConfig {
            max_time_seconds: max_time,
            ..DispatchSolverConfig::default()
        },
        initial_volume,
        recovery: match on_error {
            OnError::Halt => RecoveryPolicy::Halt,
            OnError::CarryVolume => RecoveryPolicy::CarryVolume,
        },
    };

    let run = run_horizon(&series, &config)?;
    for skipped in &run.skipped {
        warn!(date = %skipped.date, reason = %skipped.reason, "day was skipped");
    }

    let report = ProfitReport::from_run(&run);
    print_yearly_table(&report)?;
    println!();
    print!("{}", run.summary());

    if let Some(out_dir) = out {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output directory '{}'", out_dir.display()))?;
        write_dispatch_csv(&out_dir.join("dispatch.csv"), &run.solutions)?;
        write_daily_profit_csv(&out_dir.join("daily_profit.csv"), &report)?;
        write_yearly_profit_csv(&out_dir.join("yearly_profit.csv"), &report)?;
        info!(dir = %out_dir.display(), "results written");
    }
    Ok(())
}

fn cmd_validate(input: &InputArgs) -> Result<()> {
    let series = load_series(input)?;
    println!("Days: {}", series.num_days());
    println!("Slots: {}", series.num_slots());
    println!(
        "Dates: {} to {}",
        series.start_date(),
        series.start_date() + chrono::Duration::days(series.num_days() as i64 - 1)
    );
    for market in Market::all() {
        let (lo, hi) = series.price_range(*market);
        println!("{market}: prices in [{lo:.2}, {hi:.2}]");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Run {
            input,
            out,
            battery,
            initial_volume,
            on_error,
            max_time,
        } => cmd_run(
            input,
            out.as_deref(),
            battery,
            *initial_volume,
            *on_error,
            *max_time,
        ),
        Commands::Validate { input } => cmd_validate(input),
    };

    if let Err(e) = result {
        error!("{e:?}");
        std::process::exit(1);
    }
}
