//! Current-month dashboard for the detail view
//!
//! Builds the section lines shown on the Current tab: headline metrics,
//! social inclusion figures, finances, and programme counts, all taken
//! from the latest monthly record of the selected district.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::data::Record;
use crate::metrics::{format_currency, format_number, latest_record, parse_or_zero, Metric};

/// Timely-payment performance is judged against this percentage.
const TIMELY_PAYMENT_TARGET: f64 = 80.0;

/// Green at or above 110% of the target, yellow down to 90%, red below.
fn performance_color(value: f64, target: f64) -> Color {
    if value >= target * 1.1 {
        Color::Green
    } else if value >= target * 0.9 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Persondays expressed against the worked individuals, in percent.
/// Zero when the divisor is missing so dirty records render quietly.
fn participation_share(persondays: f64, individuals: f64) -> f64 {
    if individuals > 0.0 {
        persondays / individuals * 100.0
    } else {
        0.0
    }
}

fn section_header(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// One aligned stat row: label, value, and a dimmed trailing note.
fn stat_line(label: &str, value: String, value_color: Color, note: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<26}", label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{:>12}", value), Style::default().fg(value_color)),
        Span::raw("  "),
        Span::styled(note, Style::default().fg(Color::DarkGray)),
    ])
}

/// Builds every dashboard line from the latest record in `records`.
pub fn build_dashboard_lines(records: &[Record]) -> Vec<Line<'static>> {
    let Some(record) = latest_record(records) else {
        return vec![Line::from(Span::styled(
            "No data available for this district",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Reporting period: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} {}", record.month, record.fin_year),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ];

    // Headline metrics straight from the catalog
    lines.push(section_header("KEY PERFORMANCE"));
    for metric in [
        Metric::Employment,
        Metric::WageRate,
        Metric::DaysPerHousehold,
        Metric::CompletedWorks,
    ] {
        let value = metric.value(&record);
        lines.push(stat_line(
            metric.label(),
            metric.format_value(value),
            Color::White,
            metric.description().to_string(),
        ));
    }
    lines.push(Line::default());

    lines.push(section_header("SOCIAL INCLUSION"));
    let individuals = parse_or_zero(&record.total_individuals_worked);
    for (label, raw) in [
        ("Women persondays", &record.women_persondays),
        ("SC persondays", &record.sc_persondays),
        ("ST persondays", &record.st_persondays),
    ] {
        let days = parse_or_zero(raw);
        let share = participation_share(days, individuals);
        lines.push(stat_line(
            label,
            format_number(days),
            Color::White,
            format!("{share:.1}%"),
        ));
    }
    lines.push(stat_line(
        "Differently abled",
        format_number(parse_or_zero(&record.differently_abled_persons_worked)),
        Color::White,
        "persons worked".to_string(),
    ));
    lines.push(Line::default());

    lines.push(section_header("FINANCES"));
    for metric in [Metric::TotalExpenditure, Metric::WagesPaid] {
        let value = metric.value(&record);
        lines.push(stat_line(
            metric.label(),
            metric.format_value(value),
            Color::White,
            metric.description().to_string(),
        ));
    }
    lines.push(stat_line(
        "Admin Expenditure",
        format_currency(parse_or_zero(&record.total_adm_expenditure)),
        Color::White,
        "Administrative costs".to_string(),
    ));
    let timely = Metric::TimelyPayments.value(&record);
    lines.push(stat_line(
        Metric::TimelyPayments.label(),
        Metric::TimelyPayments.format_value(timely),
        performance_color(timely, TIMELY_PAYMENT_TARGET),
        Metric::TimelyPayments.description().to_string(),
    ));
    lines.push(Line::default());

    lines.push(section_header("PROGRAMME DETAILS"));
    for (label, raw, note) in [
        ("Active Job Cards", &record.total_active_job_cards, ""),
        ("Active Workers", &record.total_active_workers, ""),
        (
            "100-day Households",
            &record.households_completed_100_days,
            "Completed 100 days of employment",
        ),
        ("Ongoing Works", &record.number_of_ongoing_works, ""),
        ("Total Works Taken Up", &record.total_works_taken_up, ""),
        (
            "Approved Labour Budget",
            &record.approved_labour_budget,
            "persondays",
        ),
    ] {
        lines.push(stat_line(
            label,
            format_number(parse_or_zero(raw)),
            Color::White,
            note.to_string(),
        ));
    }

    lines
}
