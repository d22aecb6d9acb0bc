//! Enquiry intake rules and the enquiry status value set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{first_field_error, trim_opt};

/// Program value used when an enquiry is not about a specific course.
pub const GENERAL_ENQUIRY: &str = "General Enquiry";

/// Fields of [`EnquiryInput`] in declaration order.
const FIELD_ORDER: &[&str] = &["name", "email", "phone", "program", "message"];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Follow-up state of an enquiry. Stored as lowercase text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    Pending,
    Contacted,
}

impl EnquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
        }
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            _ => Err(CoreError::invalid_field(
                "status",
                "Status must be one of: pending, contacted",
            )),
        }
    }
}

impl TryFrom<String> for EnquiryStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Body of `PATCH /api/enquiries/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateInput {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusUpdateInput {
    pub fn into_status(self) -> Result<EnquiryStatus, CoreError> {
        match self.status {
            Some(s) => s.trim().parse(),
            None => Err(CoreError::invalid_field("status", "Status is required")),
        }
    }
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// Raw contact-form body. Every field is optional at the serde level so
/// that missing fields surface as field-level validation errors rather than
/// deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EnquiryInput {
    #[serde(default)]
    #[validate(required(message = "Name is required"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Phone number is required"),
        length(min = 9, message = "Phone number must be at least 9 digits")
    )]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(required(message = "Please select a program"))]
    pub program: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Message is too long"))]
    pub message: Option<String>,
}

/// A validated enquiry, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub program: String,
    pub message: Option<String>,
}

impl EnquiryInput {
    /// Trim all fields, validate, and produce a [`NewEnquiry`].
    ///
    /// Blank strings count as missing. The returned error names the first
    /// failing field in declaration order.
    pub fn into_new_enquiry(mut self) -> Result<NewEnquiry, CoreError> {
        trim_opt(&mut self.name);
        trim_opt(&mut self.email);
        trim_opt(&mut self.phone);
        trim_opt(&mut self.program);
        trim_opt(&mut self.message);

        self.validate()
            .map_err(|errors| first_field_error(&errors, FIELD_ORDER))?;

        let (Some(name), Some(email), Some(phone), Some(program)) =
            (self.name, self.email, self.phone, self.program)
        else {
            return Err(CoreError::Validation("Missing required field".into()));
        };

        Ok(NewEnquiry {
            name,
            email,
            phone,
            program,
            message: self.message,
        })
    }
}
