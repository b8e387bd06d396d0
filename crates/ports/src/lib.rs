//! # kvlog-ports
//!
//! The logging capability shared by every kvlog formatter.
//!
//! Callers depend on [`Logger`] only; choosing JSON or text output is a
//! construction-time decision made elsewhere. This crate has no workspace
//! dependencies.

mod finite;
pub mod logger;
pub mod value;

pub use logger::*;
pub use value::*;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
