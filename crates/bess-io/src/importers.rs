//! Price data importers
//!
//! Two input shapes are supported:
//!
//! - CSV: a half-hourly file with `market1`/`market2` columns and a daily
//!   file with a `market3` column.
//! - XLSX: one workbook with a half-hourly sheet (Market 1 and Market 2
//!   price columns) and a "Daily data" sheet (Market 3 price column).
//!
//! Either way, the Market 3 daily price is broadcast to 48 identical slot
//! values per day before the series is built, so the rest of the pipeline
//! only ever sees slot-resolution prices. The daily row count must equal
//! the half-hourly row count divided by 48; a mismatch is rejected here
//! rather than surfacing as a misaligned window later.

use bess_core::{BessError, BessResult, PriceSeries, SLOTS_PER_DAY};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One half-hourly price row.
#[derive(Debug, Deserialize)]
struct HalfHourlyRow {
    #[serde(alias = "Market 1", alias = "market_1")]
    market1: f64,
    #[serde(alias = "Market 2", alias = "market_2")]
    market2: f64,
}

/// One daily Market 3 price row.
#[derive(Debug, Deserialize)]
struct DailyRow {
    #[serde(alias = "Market 3", alias = "market_3")]
    market3: f64,
}

/// Load a price series from a half-hourly CSV and a daily Market 3 CSV.
///
/// The half-hourly file needs `market1` and `market2` columns; the daily
/// file needs a `market3` column, one row per calendar day.
pub fn load_prices_csv(
    half_hourly: &Path,
    daily: &Path,
    start_date: NaiveDate,
) -> BessResult<PriceSeries> {
    let mut market1 = Vec::new();
    let mut market2 = Vec::new();
    let mut reader = csv::Reader::from_path(half_hourly)
        .map_err(|e| BessError::Parse(format!("{}: {e}", half_hourly.display())))?;
    for (idx, row) in reader.deserialize::<HalfHourlyRow>().enumerate() {
        let row = row.map_err(|e| {
            BessError::Parse(format!(
                "{}: bad half-hourly row {}: {e}",
                half_hourly.display(),
                idx + 2
            ))
        })?;
        market1.push(row.market1);
        market2.push(row.market2);
    }

    let mut daily_market3 = Vec::new();
    let mut reader = csv::Reader::from_path(daily)
        .map_err(|e| BessError::Parse(format!("{}: {e}", daily.display())))?;
    for (idx, row) in reader.deserialize::<DailyRow>().enumerate() {
        let row = row.map_err(|e| {
            BessError::Parse(format!(
                "{}: bad daily row {}: {e}",
                daily.display(),
                idx + 2
            ))
        })?;
        daily_market3.push(row.market3);
    }

    build_series(start_date, market1, market2, daily_market3)
}

/// Load a price series from a single XLSX workbook.
///
/// `half_hourly_sheet` must carry "Market 1" and "Market 2" price columns;
/// `daily_sheet` a "Market 3" price column. Header rows are located by a
/// case-insensitive scan, so decorated headers like
/// "Market 3 Price [£/MWh]" match.
pub fn load_prices_xlsx(
    path: &Path,
    half_hourly_sheet: &str,
    daily_sheet: &str,
    start_date: NaiveDate,
) -> BessResult<PriceSeries> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| BessError::Parse(format!("{}: cannot open workbook: {e}", path.display())))?;

    let (market1, market2) = {
        let range = sheet_range(&mut workbook, path, half_hourly_sheet)?;
        let (header_row, cols) =
            find_header(&range, &["market 1", "market 2"]).ok_or_else(|| {
                BessError::Parse(format!(
                    "{}: sheet '{half_hourly_sheet}' has no Market 1 / Market 2 header row",
                    path.display()
                ))
            })?;
        let m1 = numeric_column(&range, header_row, cols[0])?;
        let m2 = numeric_column(&range, header_row, cols[1])?;
        (m1, m2)
    };

    let daily_market3 = {
        let range = sheet_range(&mut workbook, path, daily_sheet)?;
        let (header_row, cols) = find_header(&range, &["market 3"]).ok_or_else(|| {
            BessError::Parse(format!(
                "{}: sheet '{daily_sheet}' has no Market 3 header row",
                path.display()
            ))
        })?;
        numeric_column(&range, header_row, cols[0])?
    };

    build_series(start_date, market1, market2, daily_market3)
}

fn sheet_range(
    workbook: &mut Xlsx<std::io::BufReader<std::fs::File>>,
    path: &Path,
    sheet: &str,
) -> BessResult<calamine::Range<Data>> {
    workbook.worksheet_range(sheet).map_err(|e| {
        BessError::Parse(format!(
            "{}: cannot read sheet '{sheet}': {e}",
            path.display()
        ))
    })
}

/// Scan for the first row whose cells contain every needle (case-insensitive
/// substring match). Returns the row index and the matched column per needle.
fn find_header(range: &calamine::Range<Data>, needles: &[&str]) -> Option<(usize, Vec<usize>)> {
    for (row_idx, row) in range.rows().enumerate() {
        let mut cols = vec![None; needles.len()];
        for (col_idx, cell) in row.iter().enumerate() {
            if let Data::String(s) = cell {
                let lower = s.to_lowercase();
                for (n, needle) in needles.iter().enumerate() {
                    if cols[n].is_none() && lower.contains(needle) {
                        cols[n] = Some(col_idx);
                    }
                }
            }
        }
        if cols.iter().all(Option::is_some) {
            return Some((row_idx, cols.into_iter().flatten().collect()));
        }
    }
    None
}

/// Collect the numeric cells of one column below the header row. The column
/// ends at the first non-numeric cell; numeric data reappearing after that
/// point means a blank or error cell punched a hole in the column, which
/// would silently shorten the horizon, so it is rejected.
fn numeric_column(
    range: &calamine::Range<Data>,
    header_row: usize,
    col: usize,
) -> BessResult<Vec<f64>> {
    let mut values = Vec::new();
    let mut ended_at: Option<usize> = None;
    for (row_idx, row) in range.rows().enumerate().skip(header_row + 1) {
        match (row.get(col), ended_at) {
            (Some(Data::Float(p)), None) => values.push(*p),
            (Some(Data::Int(p)), None) => values.push(*p as f64),
            (Some(Data::Float(_)) | Some(Data::Int(_)), Some(gap)) => {
                return Err(BessError::Parse(format!(
                    "column {} has a non-numeric cell at row {} with more data below (row {})",
                    col + 1,
                    gap + 1,
                    row_idx + 1
                )));
            }
            _ => {
                if ended_at.is_none() {
                    ended_at = Some(row_idx);
                }
            }
        }
    }
    Ok(values)
}

/// Broadcast the daily Market 3 prices to slot resolution and validate the
/// combined series.
fn build_series(
    start_date: NaiveDate,
    market1: Vec<f64>,
    market2: Vec<f64>,
    daily_market3: Vec<f64>,
) -> BessResult<PriceSeries> {
    if market1.len() % SLOTS_PER_DAY != 0 {
        return Err(BessError::Validation(format!(
            "half-hourly data has {} rows, not a whole number of {SLOTS_PER_DAY}-slot days \
             (remainder {})",
            market1.len(),
            market1.len() % SLOTS_PER_DAY
        )));
    }
    let expected_days = market1.len() / SLOTS_PER_DAY;
    if daily_market3.len() != expected_days {
        return Err(BessError::Validation(format!(
            "daily Market 3 data has {} rows but the half-hourly data covers {expected_days} days",
            daily_market3.len()
        )));
    }

    let mut market3 = Vec::with_capacity(market1.len());
    for price in &daily_market3 {
        market3.extend(std::iter::repeat(*price).take(SLOTS_PER_DAY));
    }

    info!(
        days = expected_days,
        start = %start_date,
        "loaded price series"
    );
    PriceSeries::new(start_date, market1, market2, market3)
}
