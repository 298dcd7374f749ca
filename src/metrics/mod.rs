//! Derived metrics over fetched records
//!
//! Pure functions only: chronological ordering, district extraction,
//! listing helpers, and the metric catalog shared by the dashboard, the
//! trends view, and the comparison view. Nothing here performs I/O or
//! mutates its inputs; every consumer composes these primitives instead of
//! re-implementing sorting or formatting locally.

pub mod compare;
pub mod format;
pub mod trends;

pub use compare::{
    build_comparison, comparison_candidates, CompareScope, Comparison, ComparisonRow, Standing,
    MAX_COMPARISON_DISTRICTS,
};
pub use format::{format_currency, format_number, parse_or_zero};
pub use trends::{
    trend_series, trend_stats, TrendDirection, TrendGranularity, TrendPoint, TrendStats,
};

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::data::{District, Record};

/// Scheme months in financial-year order. Indian financial years run April
/// through March, so "Apr" is the earliest month of a `fin_year` and "Mar"
/// (the following calendar year) the latest.
const MONTH_ORDER: [&str; 12] = [
    "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb", "Mar",
];

/// Rank of a month within its financial year; unknown spellings rank
/// before April so dirty data sorts oldest rather than panicking.
fn month_rank(month: &str) -> i64 {
    MONTH_ORDER
        .iter()
        .position(|m| *m == month)
        .map(|i| i as i64)
        .unwrap_or(-1)
}

/// Orders two records oldest first: financial year ascending
/// (lexicographic works because the format is fixed-width `YYYY-YYYY`),
/// then month ascending within the year.
pub fn chronological(a: &Record, b: &Record) -> Ordering {
    match a.fin_year.cmp(&b.fin_year) {
        Ordering::Equal => month_rank(&a.month).cmp(&month_rank(&b.month)),
        other => other,
    }
}

/// Returns a copy of `records` sorted newest first. The sort is stable:
/// records with the same year and month keep their original relative
/// order.
pub fn sorted_latest_first(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| chronological(b, a));
    sorted
}

/// Returns a copy of `records` sorted oldest first (the direction trend
/// series use).
pub fn sorted_oldest_first(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(chronological);
    sorted
}

/// The most recent record in the set, if any.
pub fn latest_record(records: &[Record]) -> Option<Record> {
    sorted_latest_first(records).into_iter().next()
}

/// Extracts the distinct districts seen across `records`.
///
/// Keyed by (state_name, district_name); the first record seen for a pair
/// supplies its codes, and output order is first-occurrence order.
pub fn unique_districts(records: &[Record]) -> Vec<District> {
    let mut seen = HashSet::new();
    let mut districts = Vec::new();
    for record in records {
        let key = (record.state_name.clone(), record.district_name.clone());
        if seen.insert(key) {
            districts.push(District::from_record(record));
        }
    }
    districts
}

/// Distinct state names, ascending.
pub fn state_names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.state_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct district names, ascending.
pub fn district_names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.district_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct financial years, descending (most recent first).
pub fn financial_years(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.fin_year.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// The catalog of displayed measures.
///
/// Each variant knows its record field, display label, unit, and format
/// style, so the dashboard, trends view, and comparison view all agree on
/// what a measure means and how it prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Total individuals who got work in the month
    Employment,
    /// Average daily wage per person
    WageRate,
    /// Average employment days provided per household
    DaysPerHousehold,
    /// Development works completed
    CompletedWorks,
    /// Total funds utilized
    TotalExpenditure,
    /// Total wages distributed
    WagesPaid,
    /// Persondays worked by women
    WomenParticipation,
    /// Share of payments generated within 15 days
    TimelyPayments,
}

impl Metric {
    /// Every metric, in comparison-view order.
    pub const ALL: [Metric; 8] = [
        Metric::Employment,
        Metric::WageRate,
        Metric::DaysPerHousehold,
        Metric::CompletedWorks,
        Metric::TotalExpenditure,
        Metric::WagesPaid,
        Metric::WomenParticipation,
        Metric::TimelyPayments,
    ];

    /// The subset charted in the trends view.
    pub const TREND: [Metric; 5] = [
        Metric::Employment,
        Metric::WageRate,
        Metric::CompletedWorks,
        Metric::WomenParticipation,
        Metric::TimelyPayments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Employment => "Employment Provided",
            Metric::WageRate => "Average Wage Rate",
            Metric::DaysPerHousehold => "Work Days per Household",
            Metric::CompletedWorks => "Completed Works",
            Metric::TotalExpenditure => "Total Expenditure",
            Metric::WagesPaid => "Wages Paid",
            Metric::WomenParticipation => "Women Participation",
            Metric::TimelyPayments => "Timely Payments",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Metric::Employment => "Total individuals who got work",
            Metric::WageRate => "Daily wage per person",
            Metric::DaysPerHousehold => "Average employment days per household",
            Metric::CompletedWorks => "Development works completed",
            Metric::TotalExpenditure => "Total funds utilized",
            Metric::WagesPaid => "Total wages distributed",
            Metric::WomenParticipation => "Work days by women",
            Metric::TimelyPayments => "Payments within 15 days",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Employment => "people",
            Metric::WageRate => "per day",
            Metric::DaysPerHousehold => "days",
            Metric::CompletedWorks => "works",
            Metric::WomenParticipation => "days",
            Metric::TotalExpenditure | Metric::WagesPaid | Metric::TimelyPayments => "",
        }
    }

    /// The raw text of this metric's field on `record`.
    pub fn raw<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Metric::Employment => &record.total_individuals_worked,
            Metric::WageRate => &record.average_wage_rate_per_day_per_person,
            Metric::DaysPerHousehold => &record.average_days_of_employment_per_household,
            Metric::CompletedWorks => &record.number_of_completed_works,
            Metric::TotalExpenditure => &record.total_expenditure,
            Metric::WagesPaid => &record.wages,
            Metric::WomenParticipation => &record.women_persondays,
            Metric::TimelyPayments => &record.percentage_payments_within_15_days,
        }
    }

    /// The parsed value of this metric on `record`; dirty text becomes 0.
    pub fn value(&self, record: &Record) -> f64 {
        parse_or_zero(self.raw(record))
    }

    /// Formats a value of this metric for display.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Metric::Employment | Metric::CompletedWorks | Metric::WomenParticipation => {
                format_number(value)
            }
            Metric::WageRate => format!("\u{20B9}{value:.2}"),
            Metric::DaysPerHousehold => value.to_string(),
            Metric::TotalExpenditure | Metric::WagesPaid => format_currency(value),
            Metric::TimelyPayments => format!("{value}%"),
        }
    }
}
