//! Trackr Persistence - Saved logins and token encryption

pub mod encryption;
pub mod sqlite;

pub use encryption::derive_machine_key;
pub use encryption::SessionEncryptor;
pub use sqlite::Database;
