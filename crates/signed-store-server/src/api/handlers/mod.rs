//! API request handlers

pub mod data;
pub mod keys;
pub mod sign;

pub use data::{read_value, write_value, AppState};
pub use keys::public_key;
pub use sign::request_signature;
