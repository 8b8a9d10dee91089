//! Formatting and display helpers

pub mod helper;

pub use helper::{base_asset, format_change_percent, format_price, format_units, truncate_address};
