//! In-memory list derivation: sorting, filtering, date grouping, stats
//!
//! Everything here is recomputed from the display strings on demand;
//! nothing derived is written back to the records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use trackr_core::format;
use trackr_core::{
    Network, SortDirection, SortState, Status, Token, TokenSortField, Wallet, WalletSortField,
};

/// Facets of a record the view engine inspects
pub trait Record {
    fn id(&self) -> &str;
    /// First non-empty of name / source / address, matching how the
    /// list renders the record
    fn search_label(&self) -> &str;
    fn notes(&self) -> &str;
    fn network(&self) -> Network;
    fn status(&self) -> Option<Status>;
    fn is_favorite(&self) -> bool;
    /// Only wallet-kind records carry a source
    fn source(&self) -> Option<&str>;
    fn date_added(&self) -> &str;
}

impl Record for Token {
    fn id(&self) -> &str {
        &self.id
    }
    fn search_label(&self) -> &str {
        &self.name
    }
    fn notes(&self) -> &str {
        &self.notes
    }
    fn network(&self) -> Network {
        self.network
    }
    fn status(&self) -> Option<Status> {
        self.status
    }
    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
    fn source(&self) -> Option<&str> {
        None
    }
    fn date_added(&self) -> &str {
        &self.date_added
    }
}

impl Record for Wallet {
    fn id(&self) -> &str {
        &self.id
    }
    fn search_label(&self) -> &str {
        if self.source.is_empty() {
            &self.address
        } else {
            &self.source
        }
    }
    fn notes(&self) -> &str {
        &self.notes
    }
    fn network(&self) -> Network {
        self.network
    }
    fn status(&self) -> Option<Status> {
        self.status
    }
    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
    fn source(&self) -> Option<&str> {
        Some(&self.source)
    }
    fn date_added(&self) -> &str {
        &self.date_added
    }
}

// ─── Sorting ─────────────────────────────────────────────────────────

fn date_value(ts: &str) -> f64 {
    format::parse_timestamp(ts)
        .map(|dt| dt.timestamp_millis() as f64)
        .unwrap_or(0.0)
}

fn ordered(a: f64, b: f64, direction: SortDirection) -> Ordering {
    let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Stable sort of a token list by the given sort state
pub fn sort_tokens(tokens: &[Token], sort: SortState<TokenSortField>) -> Vec<Token> {
    let mut list = tokens.to_vec();
    list.sort_by(|a, b| {
        let (va, vb) = match sort.field {
            TokenSortField::DateAdded => (date_value(&a.date_added), date_value(&b.date_added)),
            TokenSortField::PriceChange => (
                format::parse_percent(&a.price_change),
                format::parse_percent(&b.price_change),
            ),
            TokenSortField::MarketCap => (
                format::parse_money(&a.market_cap),
                format::parse_money(&b.market_cap),
            ),
        };
        ordered(va, vb, sort.direction)
    });
    list
}

/// Stable sort of a wallet list by the given sort state
pub fn sort_wallets(wallets: &[Wallet], sort: SortState<WalletSortField>) -> Vec<Wallet> {
    let mut list = wallets.to_vec();
    list.sort_by(|a, b| {
        let (va, vb) = match sort.field {
            WalletSortField::DateAdded => (date_value(&a.date_added), date_value(&b.date_added)),
            WalletSortField::Multiplier => (
                format::parse_multiplier(&a.multiplier),
                format::parse_multiplier(&b.multiplier),
            ),
            WalletSortField::WinRate => (a.win_rate as f64, b.win_rate as f64),
        };
        ordered(va, vb, sort.direction)
    });
    list
}

// ─── Filtering ───────────────────────────────────────────────────────

/// Conjunction of the four filter predicates. `None` means "All" for
/// network and source; the source predicate only ever applies to
/// wallet-kind records.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: String,
    pub favorites_only: bool,
    pub network: Option<Network>,
    pub source: Option<String>,
}

impl ListFilter {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let query = self.search.to_lowercase();
        let matches_search = query.is_empty()
            || record.search_label().to_lowercase().contains(&query)
            || record.notes().to_lowercase().contains(&query);
        let matches_favorite = !self.favorites_only || record.is_favorite();
        let matches_network = self.network.map_or(true, |n| record.network() == n);
        let matches_source = match (record.source(), self.source.as_deref()) {
            (Some(source), Some(filter)) => source == filter,
            _ => true,
        };
        matches_search && matches_favorite && matches_network && matches_source
    }

    pub fn apply<R: Record + Clone>(&self, list: &[R]) -> Vec<R> {
        list.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

// ─── Grouping and aggregates ─────────────────────────────────────────

/// For a sorted+filtered list, flag the positions where a new local
/// calendar day begins (a date divider is rendered before those rows).
pub fn date_group_boundaries<R: Record>(list: &[R]) -> Vec<bool> {
    let mut boundaries = Vec::with_capacity(list.len());
    let mut previous_key: Option<String> = None;
    for record in list {
        let key = format::date_key(record.date_added());
        boundaries.push(previous_key.as_deref() != Some(key.as_str()));
        previous_key = Some(key);
    }
    boundaries
}

/// Aggregate figures for the active collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub good: usize,
    pub excellent: usize,
    pub favorites: usize,
}

pub fn collection_stats<R: Record>(list: &[R]) -> CollectionStats {
    CollectionStats {
        total: list.len(),
        good: list.iter().filter(|r| r.status() == Some(Status::Good)).count(),
        excellent: list
            .iter()
            .filter(|r| r.status() == Some(Status::Excellent))
            .count(),
        favorites: list.iter().filter(|r| r.is_favorite()).count(),
    }
}

/// Sorted unique non-empty sources of a wallet-kind list (feeds the
/// source filter dropdown)
pub fn available_sources<R: Record>(list: &[R]) -> Vec<String> {
    let mut sources: Vec<String> = list
        .iter()
        .filter_map(|r| r.source())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect();
    sources.sort();
    sources.dedup();
    sources
}

// ─── Duplicate detection ─────────────────────────────────────────────

/// Same-day duplicate rule for brand-new tokens: same local calendar
/// day, case-insensitive name, same network. Only inspects records
/// already loaded, so this stays best-effort.
pub fn find_same_day_duplicate<'a>(
    tokens: &'a [Token],
    name: &str,
    network: Network,
    now: DateTime<Utc>,
) -> Option<&'a Token> {
    let today = format::date_key(&now.to_rfc3339());
    let name_lower = name.to_lowercase();
    tokens.iter().find(|t| {
        format::date_key(&t.date_added) == today
            && t.name.to_lowercase() == name_lower
            && t.network == network
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn token(id: &str, name: &str, network: &str, favorite: bool, ts: &str) -> Token {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "marketCap": "$1M",
            "priceChange": "+5%",
            "dateAdded": ts,
            "network": network,
            "isFavorite": favorite,
        }))
        .unwrap()
    }

    fn wallet(id: &str, source: &str, multiplier: &str, win_rate: i64, ts: &str) -> Wallet {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "address": format!("addr-{}", id),
            "source": source,
            "multiplier": multiplier,
            "winRate": win_rate,
            "dateAdded": ts,
            "network": "Solana",
        }))
        .unwrap()
    }

    fn local_ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> String {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .to_rfc3339()
    }

    #[test]
    fn test_date_sort_toggle_reverses_distinct_timestamps() {
        let list = vec![
            token("a", "A", "Solana", false, "2026-08-01T10:00:00+00:00"),
            token("b", "B", "Solana", false, "2026-08-03T10:00:00+00:00"),
            token("c", "C", "Solana", false, "2026-08-02T10:00:00+00:00"),
        ];
        let mut sort = SortState::new(TokenSortField::DateAdded);
        let desc: Vec<String> = sort_tokens(&list, sort).iter().map(|t| t.id.clone()).collect();
        assert_eq!(desc, vec!["b", "c", "a"]);

        sort.toggle(TokenSortField::DateAdded);
        let asc: Vec<String> = sort_tokens(&list, sort).iter().map(|t| t.id.clone()).collect();
        let mut reversed = desc.clone();
        reversed.reverse();
        assert_eq!(asc, reversed);
    }

    #[test]
    fn test_wallet_sort_by_multiplier_and_win_rate() {
        let list = vec![
            wallet("w1", "bot", "1.5x", 40, "2026-08-01T10:00:00+00:00"),
            wallet("w2", "bot", "10x", 90, "2026-08-01T11:00:00+00:00"),
            wallet("w3", "bot", "3x", 60, "2026-08-01T12:00:00+00:00"),
        ];
        let sort = SortState::new(WalletSortField::Multiplier);
        let order: Vec<String> = sort_wallets(&list, sort).iter().map(|w| w.id.clone()).collect();
        assert_eq!(order, vec!["w2", "w3", "w1"]);

        let sort = SortState::new(WalletSortField::WinRate);
        let order: Vec<String> = sort_wallets(&list, sort).iter().map(|w| w.id.clone()).collect();
        assert_eq!(order, vec!["w2", "w3", "w1"]);
    }

    #[test]
    fn test_filter_conjunction_network_and_favorites() {
        let list = vec![
            token("a", "DOGE", "Solana", true, "2026-08-01T10:00:00+00:00"),
            token("b", "PEPE", "Solana", false, "2026-08-01T10:00:00+00:00"),
            token("c", "WIF", "Base", true, "2026-08-01T10:00:00+00:00"),
            token("d", "MOG", "Base", false, "2026-08-01T10:00:00+00:00"),
        ];
        let filter = ListFilter {
            network: Some(Network::Solana),
            favorites_only: true,
            ..Default::default()
        };
        let matched = filter.apply(&list);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
    }

    #[test]
    fn test_filter_searches_label_and_notes() {
        let mut subject = token("a", "DOGE", "Solana", false, "2026-08-01T10:00:00+00:00");
        subject.notes = "moon play".to_string();
        let list = vec![
            subject,
            token("b", "PEPE", "Solana", false, "2026-08-01T10:00:00+00:00"),
        ];
        let filter = ListFilter {
            search: "MOON".to_string(),
            ..Default::default()
        };
        let matched = filter.apply(&list);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
    }

    #[test]
    fn test_source_filter_only_binds_wallet_kinds() {
        let wallets = vec![
            wallet("w1", "gmgn", "2x", 50, "2026-08-01T10:00:00+00:00"),
            wallet("w2", "bot", "2x", 50, "2026-08-01T10:00:00+00:00"),
        ];
        let tokens = vec![token("a", "DOGE", "Solana", false, "2026-08-01T10:00:00+00:00")];
        let filter = ListFilter {
            source: Some("gmgn".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&wallets).len(), 1);
        // Tokens carry no source, so the predicate never binds them
        assert_eq!(filter.apply(&tokens).len(), 1);
    }

    #[test]
    fn test_date_group_boundaries() {
        let list = vec![
            token("a", "A", "Solana", false, &local_ts(2026, 8, 1, 10, 0)),
            token("b", "B", "Solana", false, &local_ts(2026, 8, 1, 14, 0)),
            token("c", "C", "Solana", false, &local_ts(2026, 8, 2, 9, 0)),
        ];
        assert_eq!(date_group_boundaries(&list), vec![true, false, true]);
        assert_eq!(date_group_boundaries(&[] as &[Token]), Vec::<bool>::new());
    }

    #[test]
    fn test_collection_stats() {
        let mut a = token("a", "A", "Solana", true, "2026-08-01T10:00:00+00:00");
        a.status = Some(Status::Excellent);
        let mut b = token("b", "B", "Solana", false, "2026-08-01T10:00:00+00:00");
        b.status = Some(Status::Good);
        let c = token("c", "C", "Base", true, "2026-08-01T10:00:00+00:00");
        let stats = collection_stats(&[a, b, c]);
        assert_eq!(
            stats,
            CollectionStats {
                total: 3,
                good: 1,
                excellent: 1,
                favorites: 2
            }
        );
    }

    #[test]
    fn test_available_sources_sorted_unique_non_empty() {
        let list = vec![
            wallet("w1", "gmgn", "2x", 50, "2026-08-01T10:00:00+00:00"),
            wallet("w2", "", "2x", 50, "2026-08-01T10:00:00+00:00"),
            wallet("w3", "bot", "2x", 50, "2026-08-01T10:00:00+00:00"),
            wallet("w4", "gmgn", "2x", 50, "2026-08-01T10:00:00+00:00"),
        ];
        assert_eq!(available_sources(&list), vec!["bot", "gmgn"]);
    }

    #[test]
    fn test_same_day_duplicate_detection() {
        let now = Local.with_ymd_and_hms(2026, 8, 7, 15, 0, 0).unwrap();
        let today_morning = Local.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap();
        let yesterday = Local.with_ymd_and_hms(2026, 8, 6, 15, 0, 0).unwrap();

        let tokens = vec![token(
            "a",
            "DOGE",
            "Solana",
            false,
            &today_morning.to_rfc3339(),
        )];

        let now_utc = now.with_timezone(&Utc);
        assert!(find_same_day_duplicate(&tokens, "doge", Network::Solana, now_utc).is_some());
        assert!(find_same_day_duplicate(&tokens, "DOGE", Network::Base, now_utc).is_none());
        assert!(find_same_day_duplicate(&tokens, "PEPE", Network::Solana, now_utc).is_none());

        let old = vec![token("a", "DOGE", "Solana", false, &yesterday.to_rfc3339())];
        assert!(find_same_day_duplicate(&old, "DOGE", Network::Solana, now_utc).is_none());
    }
}
