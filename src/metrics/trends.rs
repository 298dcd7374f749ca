//! Time series and summary statistics for the trends view

use crate::data::Record;

use super::{sorted_oldest_first, Metric};

/// How trend points are bucketed along the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendGranularity {
    /// One point per monthly record
    Monthly,
    /// One point per financial year
    Yearly,
}

impl TrendGranularity {
    pub fn label(&self) -> &'static str {
        match self {
            TrendGranularity::Monthly => "Monthly",
            TrendGranularity::Yearly => "Yearly",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TrendGranularity::Monthly => TrendGranularity::Yearly,
            TrendGranularity::Yearly => TrendGranularity::Monthly,
        }
    }
}

/// One plotted point: a period label plus the record it represents.
///
/// The full record is carried rather than a single extracted value so the
/// view can switch metrics without rebuilding the series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// "Jun 2023-2024" for monthly points, "2023-2024" for yearly ones
    pub period: String,
    pub record: Record,
}

/// Builds the chronologically ascending series for one district's records.
///
/// With [`TrendGranularity::Yearly`] each financial year contributes its
/// most recent monthly record (cumulative figures make that record the
/// year's summary); values are never summed across months. An optional
/// `year_filter` restricts the series to one financial year.
pub fn trend_series(
    records: &[Record],
    granularity: TrendGranularity,
    year_filter: Option<&str>,
) -> Vec<TrendPoint> {
    let sorted = sorted_oldest_first(records);
    let filtered: Vec<Record> = match year_filter {
        Some(year) => sorted.into_iter().filter(|r| r.fin_year == year).collect(),
        None => sorted,
    };

    match granularity {
        TrendGranularity::Monthly => filtered
            .into_iter()
            .map(|record| TrendPoint {
                period: format!("{} {}", record.month, record.fin_year),
                record,
            })
            .collect(),
        TrendGranularity::Yearly => {
            // Years come out of the sort ascending; keep that order and let
            // each later record within a year displace the earlier one.
            let mut yearly: Vec<(String, Record)> = Vec::new();
            for record in filtered {
                match yearly.iter_mut().find(|(year, _)| *year == record.fin_year) {
                    Some((_, slot)) => *slot = record,
                    None => yearly.push((record.fin_year.clone(), record)),
                }
            }
            yearly
                .into_iter()
                .map(|(year, record)| TrendPoint {
                    period: year,
                    record,
                })
                .collect()
        }
    }
}

/// Which way the most recent step of a series moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Summary statistics over one metric across a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendStats {
    /// Value at the most recent point
    pub current: f64,
    /// Value at the point before it; equals `current` for a single point
    pub previous: f64,
    pub change: f64,
    /// Change relative to `previous`, in percent; 0 when `previous` is
    /// zero or negative
    pub percentage_change: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub direction: TrendDirection,
}

/// Computes [`TrendStats`] for `metric` over an ascending series.
/// Returns `None` for an empty series.
pub fn trend_stats(series: &[TrendPoint], metric: Metric) -> Option<TrendStats> {
    let values: Vec<f64> = series.iter().map(|p| metric.value(&p.record)).collect();
    let current = *values.last()?;
    let previous = if values.len() > 1 {
        values[values.len() - 2]
    } else {
        current
    };

    let change = current - previous;
    let percentage_change = if previous > 0.0 {
        change / previous * 100.0
    } else {
        0.0
    };
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else if change < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let min = values.iter().fold(f64::INFINITY, |acc, v| acc.min(*v));
    let max = values.iter().fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(TrendStats {
        current,
        previous,
        change,
        percentage_change,
        min,
        max,
        mean,
        direction,
    })
}
