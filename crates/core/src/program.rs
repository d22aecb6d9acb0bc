//! Program (course module) input rules and storage helpers.
//!
//! Programs keep their `features` and `for_whom` lists as JSON text in the
//! database; [`encode_list`] and [`decode_list`] are the only place that
//! format is produced or read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{clean_list, first_field_error, trim_opt};

/// Icon token used when the admin does not pick one.
pub const DEFAULT_ICON: &str = "Laptop";

/// Default number of entries returned by the popular-programs listing.
pub const DEFAULT_POPULAR_LIMIT: i64 = 4;

/// Upper bound for the popular-programs `limit` parameter.
pub const MAX_POPULAR_LIMIT: i64 = 50;

const FIELD_ORDER: &[&str] = &["title", "price", "display_order"];

// ---------------------------------------------------------------------------
// Delivery mode
// ---------------------------------------------------------------------------

/// How a program is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMode {
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Virtual")]
    Virtual,
    #[serde(rename = "Online & Virtual")]
    OnlineAndVirtual,
}

impl DeliveryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Virtual => "Virtual",
            Self::OnlineAndVirtual => "Online & Virtual",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Online" => Ok(Self::Online),
            "Virtual" => Ok(Self::Virtual),
            "Online & Virtual" => Ok(Self::OnlineAndVirtual),
            other => Err(CoreError::invalid_field(
                "delivery_mode",
                format!("Unknown delivery mode '{other}'"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Admin input
// ---------------------------------------------------------------------------

/// Body of `POST /api/admin/programs` and `PUT /api/admin/programs/{id}`.
///
/// Update is a full replacement, so both endpoints share this shape; absent
/// fields fall back to the defaults listed on [`NewProgram`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProgramInput {
    #[serde(default)]
    #[validate(required(message = "Title is required"))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub delivery_mode: Option<DeliveryMode>,
    #[serde(default)]
    pub for_whom: Option<Vec<String>>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Display order cannot be negative"))]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A validated program, ready to insert or to replace an existing row.
///
/// Defaults: `description = ""`, `icon = "Laptop"`, `features = []`,
/// `display_order = 0`, `is_active = true`. An empty `for_whom` list is
/// stored as NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProgram {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub delivery_mode: Option<DeliveryMode>,
    pub for_whom: Option<Vec<String>>,
    pub price: Option<f64>,
    pub display_order: i32,
    pub is_active: bool,
}

impl ProgramInput {
    pub fn into_new_program(mut self) -> Result<NewProgram, CoreError> {
        trim_opt(&mut self.title);
        trim_opt(&mut self.description);
        trim_opt(&mut self.icon);
        trim_opt(&mut self.image);
        trim_opt(&mut self.duration);

        self.validate()
            .map_err(|errors| first_field_error(&errors, FIELD_ORDER))?;

        let title = self
            .title
            .ok_or_else(|| CoreError::invalid_field("title", "Title is required"))?;

        let for_whom = self
            .for_whom
            .map(clean_list)
            .filter(|items| !items.is_empty());

        Ok(NewProgram {
            title,
            description: self.description.unwrap_or_default(),
            icon: self.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            image: self.image,
            features: self.features.map(clean_list).unwrap_or_default(),
            duration: self.duration,
            delivery_mode: self.delivery_mode,
            for_whom,
            price: self.price,
            display_order: self.display_order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

// ---------------------------------------------------------------------------
// Storage helpers
// ---------------------------------------------------------------------------

/// Serialize a string list to the JSON text stored in the database.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Parse JSON text from the database back into a string list.
pub fn decode_list(raw: &str) -> Result<Vec<String>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Internal(format!("Malformed list column '{raw}': {e}")))
}

/// Resolve the popular-programs `limit` query parameter.
pub fn clamp_popular_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_POPULAR_LIMIT)
        .clamp(1, MAX_POPULAR_LIMIT)
}
