pub mod api;
pub mod bill_formatter;
pub mod date_utils;
pub mod form_data;
pub mod logging;
pub mod memory_store;
pub mod navigation;
pub mod session;
pub mod store;
