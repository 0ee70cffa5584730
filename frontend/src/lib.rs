//! Employee expense-report client core.
//!
//! `containers` hold the page controllers (bill list, new bill workflow),
//! `services` the collaborators they talk to: the remote bill store, session
//! storage, navigation and the operator error channel.

pub mod config;
pub mod constants;
pub mod containers;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::ClientConfig;
pub use constants::RoutePath;
pub use containers::{Bills, NewBill, NewBillForm};
pub use services::bill_formatter::{format_bills, BillFormatter};
pub use services::store::{BillStore, StoreError};
