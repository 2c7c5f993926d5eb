//! Best-effort extraction of wallet figures from pasted text
//!
//! Scans arbitrary text (typically copied from a trading bot) for money
//! tokens and guesses (buy, sell, profit). Currency-marked matches win
//! over bare numbers; the result only pre-fills a form the user edits
//! and is never treated as validated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use trackr_core::format;

/// A signed, optionally comma-grouped, optionally decimal, optionally
/// K/M/B-suffixed number, with an optional currency marker on either
/// side of the sign.
static MONEY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[-+]?\$?\d+(?:,\d+)*(?:\.\d+)?[KMB]?|\$[-+]?\d+(?:,\d+)*(?:\.\d+)?[KMB]?")
        .expect("money token pattern compiles")
});

/// Extracted buy/sell/profit display strings plus the derived multiplier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStats {
    pub buy: String,
    pub sell: String,
    pub profit: String,
    pub multiplier: String,
}

/// Scan `text` for the first three money figures in encounter order.
pub fn extract_wallet_stats(text: &str) -> WalletStats {
    let all: Vec<&str> = MONEY_TOKEN.find_iter(text).map(|m| m.as_str()).collect();
    let currency: Vec<&str> = all.iter().copied().filter(|m| m.contains('$')).collect();
    debug!(
        total = all.len(),
        currency = currency.len(),
        "scanned pasted text for money tokens"
    );

    let (buy, sell, profit) = if currency.len() >= 3 {
        (currency[0], currency[1], currency[2])
    } else if all.len() >= 3 {
        (all[0], all[1], all[2])
    } else {
        ("", "", "")
    };

    let buy = normalize_amount(buy, false);
    let sell = normalize_amount(sell, false);
    let profit = normalize_amount(profit, true);

    let buy_abs = format::parse_money(&buy).abs();
    let sell_abs = format::parse_money(&sell).abs();
    let profit_num = format::parse_money(&profit);

    let multiplier = if buy_abs > 0.0 {
        let ratio = if sell_abs > 0.0 {
            sell_abs / buy_abs
        } else {
            (buy_abs + profit_num) / buy_abs
        };
        format!("{:.1}x", ratio)
    } else {
        "1x".to_string()
    };

    WalletStats {
        buy,
        sell,
        profit,
        multiplier,
    }
}

/// Ensure a captured value carries a currency marker; profit values
/// additionally get an explicit leading sign.
fn normalize_amount(val: &str, is_profit: bool) -> String {
    if val.is_empty() {
        return String::new();
    }
    let mut res = val.trim().to_string();
    if !res.contains('$') {
        if res.starts_with('-') || res.starts_with('+') {
            res.insert(1, '$');
        } else {
            res.insert(0, '$');
        }
    }
    if is_profit && !res.starts_with('-') && !res.starts_with('+') {
        res.insert(0, '+');
    }
    res
}
