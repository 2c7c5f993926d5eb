//! SQLite database management for saved logins

mod connection;
mod profiles;

pub use connection::Database;
pub use profiles::*;
