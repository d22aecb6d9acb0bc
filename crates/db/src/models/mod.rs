//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and,
//! where the row needs decoding before it reaches the API, the `Serialize`
//! entity built from it.

pub mod admin;
pub mod enquiry;
pub mod program;
pub mod session;
