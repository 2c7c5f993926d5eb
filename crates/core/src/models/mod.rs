//! Data models for tracked records and remote payloads

mod lookup;
mod snapshot;
mod token;
mod user;
mod wallet;

pub use lookup::*;
pub use snapshot::*;
pub use token::*;
pub use user::*;
pub use wallet::*;
