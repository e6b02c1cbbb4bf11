pub mod analysis;
pub mod config;
pub mod csvio;
pub mod dedup;
pub mod enrich;
pub mod error;
pub mod inventory;
pub mod phone;
pub mod purchase;
pub mod spoke;
pub mod sync;
pub mod tally;
pub mod twilio;
pub mod van;

pub use error::{Result, TextbankError};
