//! Domain logic shared by the database and HTTP layers.
//!
//! Nothing in this crate talks to PostgreSQL or HTTP; it owns the error
//! type, input validation, the closed value sets (enquiry status, delivery
//! mode) and the program image pipeline.

pub mod enquiry;
pub mod error;
pub mod program;
pub mod program_image;
pub mod types;
pub mod validation;
