//! Trackr Engine - Client-side list derivation, selection, and text extraction

pub mod extract;
pub mod selection;
pub mod view;

pub use extract::{extract_wallet_stats, WalletStats};
pub use selection::Selection;
pub use view::{CollectionStats, ListFilter, Record};
