//! Display-string formatting and parsing helpers
//!
//! Monetary, percentage, and multiplier fields are stored as display
//! strings; the numeric parsers here are a display-only inverse used for
//! sorting and derived figures. The canonical strings stay authoritative.

mod date;

pub use date::{date_key, format_primary_date, format_secondary_date, parse_timestamp};

/// Parse a money display string ("$1.2M", "1,200", "-$45.5K") into a number.
///
/// Strips `$` and `,`, honors case-insensitive K/M/B suffixes.
/// Returns 0.0 for empty or unparseable input.
pub fn parse_money(val: &str) -> f64 {
    if val.is_empty() {
        return 0.0;
    }
    let cleaned = val.replace(['$', ','], "");
    let trimmed = cleaned.trim();
    let (digits, multiplier) = match trimmed.chars().last() {
        Some('k') | Some('K') => (&trimmed[..trimmed.len() - 1], 1e3),
        Some('m') | Some('M') => (&trimmed[..trimmed.len() - 1], 1e6),
        Some('b') | Some('B') => (&trimmed[..trimmed.len() - 1], 1e9),
        _ => (trimmed, 1.0),
    };
    digits
        .trim()
        .parse::<f64>()
        .map(|n| n * multiplier)
        .unwrap_or(0.0)
}

/// Parse a percentage display string ("+15.2%", "-3%") into a signed float.
/// Returns 0.0 on failure.
pub fn parse_percent(val: &str) -> f64 {
    val.replace(['+', '%'], "").trim().parse().unwrap_or(0.0)
}

/// Parse a multiplier display string ("2.5x") into a float.
/// Returns 0.0 on failure.
pub fn parse_multiplier(val: &str) -> f64 {
    val.replace(['x', 'X'], "").trim().parse().unwrap_or(0.0)
}

/// Compact a USD amount into the three-tier display form used everywhere:
/// two decimals for B/M, one for K, plain two decimals below that.
pub fn format_compact_usd(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "$0".to_string();
    }
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.1}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// Pass through links that already carry a scheme, otherwise default to
/// https. Empty input stays empty.
pub fn to_absolute_url(link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    format!("https://{}", link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_suffixes() {
        assert_eq!(parse_money("$1.5K"), 1_500.0);
        assert_eq!(parse_money("2m"), 2_000_000.0);
        assert_eq!(parse_money("$3B"), 3_000_000_000.0);
        assert_eq!(parse_money("$1,200"), 1_200.0);
        assert_eq!(parse_money("-$45.5K"), -45_500.0);
        assert_eq!(parse_money("+$700"), 700.0);
    }

    #[test]
    fn test_parse_money_garbage_is_zero() {
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("n/a"), 0.0);
        assert_eq!(parse_money("$"), 0.0);
    }

    #[test]
    fn test_compact_round_trips_through_parse_money() {
        let cases = [1_234_567.0, 987.0, 45_600.0, 2_100_000_000.0];
        for value in cases {
            let display = format_compact_usd(value);
            let recovered = parse_money(&display);
            let tolerance = value * 0.01;
            assert!(
                (recovered - value).abs() <= tolerance,
                "{} -> {} -> {}",
                value,
                display,
                recovered
            );
        }
    }

    #[test]
    fn test_compact_tiers() {
        assert_eq!(format_compact_usd(1_234_567.0), "$1.23M");
        assert_eq!(format_compact_usd(45_600.0), "$45.6K");
        assert_eq!(format_compact_usd(2_100_000_000.0), "$2.10B");
        assert_eq!(format_compact_usd(987.0), "$987.00");
        assert_eq!(format_compact_usd(0.0), "$0");
        assert_eq!(format_compact_usd(f64::NAN), "$0");
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("+15%"), 15.0);
        assert_eq!(parse_percent("-3.5%"), -3.5);
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("abc"), 0.0);
    }

    #[test]
    fn test_parse_multiplier() {
        assert_eq!(parse_multiplier("2.5x"), 2.5);
        assert_eq!(parse_multiplier("10X"), 10.0);
        assert_eq!(parse_multiplier(""), 0.0);
    }

    #[test]
    fn test_to_absolute_url() {
        assert_eq!(to_absolute_url(""), "");
        assert_eq!(to_absolute_url("https://gmgn.ai/x"), "https://gmgn.ai/x");
        assert_eq!(to_absolute_url("http://a.b"), "http://a.b");
        assert_eq!(to_absolute_url("gmgn.ai/x"), "https://gmgn.ai/x");
    }
}
