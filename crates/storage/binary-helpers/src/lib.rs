//! Little-endian encoding helpers and checked integer conversions shared by the storage crates.

/// Error type for binary reads and writes.
pub mod bin_error;

/// Checked narrowing conversions from `usize`.
pub mod conversions;

/// Little-endian reads and writes over byte slices.
pub mod le;
