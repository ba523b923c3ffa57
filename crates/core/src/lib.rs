//! Domain rules for the course platform.
//!
//! Everything in this crate is pure: no database, network, or clock access.
//! Callers pass the current instant in explicitly so the time-based rules
//! (drip release, refund window) are deterministic under test.

pub mod catalog;
pub mod drip;
pub mod error;
pub mod refund;
pub mod roles;
pub mod types;
