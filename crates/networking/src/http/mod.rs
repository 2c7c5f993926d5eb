//! HTTP client for the hosted Supabase backend

mod client;

pub use client::SupabaseClient;
