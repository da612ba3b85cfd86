pub mod check;
pub mod cli;
pub mod error;
pub mod expiry;
pub mod notify;
pub mod tls;

pub use check::{Check, Outcome, Report, Settings};
pub use error::{Error, Result};
