//! Display formatting for tables, cards and modals.
//!
//! These run tens of times per render; all of them are total. Missing or
//! malformed input degrades to a zero/placeholder string, never a panic and
//! never a "NaN" leaking into the page.

use chrono::NaiveDate;

/// Format a monetary amount in Kenyan shillings with thousands separators,
/// no decimals: `Ksh 1,234,567`. None and zero render as "Ksh 0".
pub fn format_currency(amount: Option<f64>) -> String {
    let value = amount.unwrap_or(0.0);
    if !value.is_finite() || value == 0.0 {
        return "Ksh 0".to_string();
    }
    format!("Ksh {}", group_thousands(value.round() as i64))
}

/// Compact currency for dense summary cells: `Ksh 1.5M`, `Ksh 820K`.
pub fn format_currency_short(amount: Option<f64>) -> String {
    let value = amount.unwrap_or(0.0);
    if !value.is_finite() || value == 0.0 {
        return "Ksh 0".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("Ksh {:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("Ksh {:.0}K", value / 1_000.0)
    } else {
        format!("Ksh {}", group_thousands(value.round() as i64))
    }
}

/// Whole number with thousands separators; None/zero render as "0".
pub fn format_count(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() {
        return "0".to_string();
    }
    group_thousands(value.round() as i64)
}

/// Percentage with one decimal: `42.5%`. None and zero render as "0%".
pub fn format_percentage(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() || value == 0.0 {
        return "0%".to_string();
    }
    format!("{:.1}%", value)
}

/// Date for display: "15 March 2024". Missing dates render as "N/A";
/// unparseable input is echoed back unchanged rather than guessed at.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date else {
        return "N/A".to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return "N/A".to_string();
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.push('-');
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_renders_zero_for_missing_amounts() {
        assert_eq!(format_currency(None), "Ksh 0");
        assert_eq!(format_currency(Some(0.0)), "Ksh 0");
        assert_eq!(format_currency(Some(f64::NAN)), "Ksh 0");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Some(1234567.0)), "Ksh 1,234,567");
        assert_eq!(format_currency(Some(999.4)), "Ksh 999");
        assert_eq!(format_currency(Some(-50000.0)), "Ksh -50,000");
    }

    #[test]
    fn short_currency_scales_units() {
        assert_eq!(format_currency_short(Some(1_500_000.0)), "Ksh 1.5M");
        assert_eq!(format_currency_short(Some(820_000.0)), "Ksh 820K");
        assert_eq!(format_currency_short(Some(640.0)), "Ksh 640");
        assert_eq!(format_currency_short(None), "Ksh 0");
    }

    #[test]
    fn percentage_guards_missing_values() {
        assert_eq!(format_percentage(None), "0%");
        assert_eq!(format_percentage(Some(42.55)), "42.5%");
        assert_eq!(format_percentage(Some(100.0)), "100.0%");
    }

    #[test]
    fn dates_fall_back_to_placeholder() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("2024-03-15")), "15 March 2024");
        assert_eq!(
            format_date(Some("2024-03-15T14:02:26.000Z")),
            "15 March 2024"
        );
        // Unparseable input is shown as-is, never an epoch date.
        assert_eq!(format_date(Some("mid 2024")), "mid 2024");
    }

    #[test]
    fn counts_never_show_nan() {
        assert_eq!(format_count(Some(f64::NAN)), "0");
        assert_eq!(format_count(Some(12000.0)), "12,000");
        assert_eq!(format_count(None), "0");
    }
}
