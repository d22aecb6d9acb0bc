//! Authentication middleware extractors.
//!
//! - [`auth::RequireAdmin`] -- Requires a valid admin session cookie.

pub mod auth;
