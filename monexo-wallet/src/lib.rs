pub mod client;
pub mod error;
pub mod wallet;
