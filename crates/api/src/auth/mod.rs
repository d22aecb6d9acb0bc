//! Authentication primitives.
//!
//! - [`password`] -- bcrypt verification with upgrade of legacy plaintext rows.
//! - [`session`] -- opaque session tokens and the session cookie.

pub mod password;
pub mod session;
