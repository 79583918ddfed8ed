// In crates/render/src/format.rs

//! Display formatting for money, percentages and plain numbers.
//!
//! Every formatter accepts a missing value and renders a zero for it.

/// `$1.50B` and `$2.30M` from a million up, `$1,234.50` below, `$0.00` for
/// a missing value.
pub fn format_currency(value: impl Into<Option<f64>>) -> String {
    let Some(value) = value.into() else {
        return "$0.00".to_string();
    };
    if value >= 1e9 {
        return format!("${:.2}B", value / 1e9);
    }
    if value >= 1e6 {
        return format!("${:.2}M", value / 1e6);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// A signed percentage with two decimals: `+1.60%`, `-2.40%`, `0.00%`.
pub fn format_percentage(value: impl Into<Option<f64>>) -> String {
    match value.into() {
        Some(v) if v > 0.0 => format!("+{v:.2}%"),
        // `+ 0.0` turns -0.0 into 0.0.
        Some(v) => format!("{:.2}%", v + 0.0),
        None => "0.00%".to_string(),
    }
}

/// Groups thousands and keeps up to three fraction digits: `1,234,567.891`.
pub fn format_number(value: impl Into<Option<f64>>) -> String {
    let Some(value) = value.into() else {
        return "0".to_string();
    };
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{}", group_thousands(whole))
    } else {
        format!("{sign}{}.{fraction}", group_thousands(whole))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_abbreviates_large_values() {
        assert_eq!(format_currency(1_500_000_000.0), "$1.50B");
        assert_eq!(format_currency(2_300_000.0), "$2.30M");
        assert_eq!(format_currency(1_000_000.0), "$1.00M");
    }

    #[test]
    fn currency_groups_small_values() {
        assert_eq!(format_currency(42.5), "$42.50");
        assert_eq!(format_currency(82_450.756), "$82,450.76");
        assert_eq!(format_currency(999_999.99), "$999,999.99");
        assert_eq!(format_currency(-1_234.5), "-$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn currency_of_nothing_is_zero() {
        assert_eq!(format_currency(None), "$0.00");
    }

    #[test]
    fn percentages_are_signed() {
        assert_eq!(format_percentage(1.6), "+1.60%");
        assert_eq!(format_percentage(-2.4), "-2.40%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(None), "0.00%");
        let negative_zero: f64 = serde_json::from_str("-0.0").unwrap();
        assert_eq!(format_percentage(negative_zero), "0.00%");
    }

    #[test]
    fn numbers_keep_up_to_three_decimals() {
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(1_234.5), "1,234.5");
        assert_eq!(format_number(0.123_456), "0.123");
        assert_eq!(format_number(-9_876.54321), "-9,876.543");
        assert_eq!(format_number(999.9996), "1,000");
        assert_eq!(format_number(None), "0");
    }
}
