//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod enquiry_repo;
pub mod program_repo;
pub mod session_repo;

pub use admin_repo::AdminRepo;
pub use enquiry_repo::EnquiryRepo;
pub use program_repo::ProgramRepo;
pub use session_repo::SessionRepo;
