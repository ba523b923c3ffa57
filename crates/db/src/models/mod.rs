//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Response types for rows that are joined or must hide columns

pub mod admin;
pub mod course;
pub mod lesson;
pub mod module;
pub mod purchase;
pub mod refund;
pub mod user;
