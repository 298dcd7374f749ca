//! Indian-convention display formatting
//!
//! Large figures are shown in crores (1 Cr = 10,000,000) and lakhs
//! (1 L = 100,000) rather than millions, matching how the scheme reports
//! its own numbers.

/// Parses upstream numeric text, trimming surrounding whitespace.
/// Anything that is not a plain finite number (empty fields, "NA",
/// partial garbage) becomes 0 so arithmetic never has to branch.
pub fn parse_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Formats a count using Indian scale suffixes: crores above 1e7, lakhs
/// above 1e5, thousands above 1e3, and the bare value below that.
pub fn format_number(value: f64) -> String {
    if value >= 10_000_000.0 {
        format!("{:.1} Cr", value / 10_000_000.0)
    } else if value >= 100_000.0 {
        format!("{:.1} L", value / 100_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1} K", value / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Formats a rupee amount with the same scale suffixes as
/// [`format_number`], prefixed with the rupee sign.
pub fn format_currency(value: f64) -> String {
    if value >= 10_000_000.0 {
        format!("\u{20B9}{:.1} Cr", value / 10_000_000.0)
    } else if value >= 100_000.0 {
        format!("\u{20B9}{:.1} L", value / 100_000.0)
    } else if value >= 1_000.0 {
        format!("\u{20B9}{:.1} K", value / 1_000.0)
    } else {
        format!("\u{20B9}{value}")
    }
}
