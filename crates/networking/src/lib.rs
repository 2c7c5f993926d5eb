//! Trackr Networking - Supabase HTTP client, record store adapter, and lookup

pub mod api;
pub mod dexscreener;
pub mod http;

pub use dexscreener::DexScreenerClient;
pub use http::SupabaseClient;
