//! Multi-select state over wallet-kind lists

use std::collections::HashSet;
use trackr_core::Wallet;

/// Set of selected record ids. Held only in memory and cleared whenever
/// the active tab changes.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Select every listed wallet, unless all of them are already
    /// selected, in which case the entire selection is cleared.
    pub fn select_all(&mut self, list: &[Wallet]) {
        if list.iter().all(|w| self.ids.contains(&w.id)) {
            self.ids.clear();
        } else {
            for wallet in list {
                self.ids.insert(wallet.id.clone());
            }
        }
    }

    /// Addresses of the selected wallets, in list order, newline-joined.
    /// Empty when nothing in the list is selected.
    pub fn selected_addresses(&self, list: &[Wallet]) -> String {
        list.iter()
            .filter(|w| self.ids.contains(&w.id))
            .map(|w| w.address.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(id: &str) -> Wallet {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "address": format!("addr-{}", id),
            "dateAdded": "2026-08-01T10:00:00+00:00",
            "network": "Solana",
        }))
        .unwrap()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = Selection::default();
        selection.toggle("w1");
        assert!(selection.contains("w1"));
        selection.toggle("w1");
        assert!(!selection.contains("w1"));
    }

    #[test]
    fn test_select_all_then_clear() {
        let list: Vec<Wallet> = ["w1", "w2", "w3", "w4", "w5"].iter().map(|id| wallet(id)).collect();
        let mut selection = Selection::default();
        selection.toggle("w1");
        selection.toggle("w3");

        // Partially selected list: everything gets selected
        selection.select_all(&list);
        assert_eq!(selection.len(), 5);

        // Fully selected list: the whole set clears, not just the two
        selection.select_all(&list);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selected_addresses_in_list_order() {
        let list: Vec<Wallet> = ["w1", "w2", "w3"].iter().map(|id| wallet(id)).collect();
        let mut selection = Selection::default();
        selection.toggle("w3");
        selection.toggle("w1");
        assert_eq!(selection.selected_addresses(&list), "addr-w1\naddr-w3");

        selection.clear();
        assert_eq!(selection.selected_addresses(&list), "");
    }
}
