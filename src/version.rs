//! Calcgen version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - The CLI `--version` flag and the `targets` listing both read this constant.

/// The calcgen version string (for example, `0.1.0`).
pub const CALCGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
