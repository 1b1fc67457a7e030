//! Common types for the shared crate

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Date formatting used on the wire (`tanggal` query/body fields)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
