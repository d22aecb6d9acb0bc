pub mod admin_auth;
pub mod admin_programs;
pub mod enquiries;
pub mod programs;
pub mod uploads;
