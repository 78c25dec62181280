//! Inbound payload shapes for board entities.
//!
//! These are deserialized straight from request bodies and import documents,
//! then checked by [`crate::validation`]. Scalar fields are wrapped in
//! [`Field`] so a malformed value surfaces as the specific validation
//! message for that field rather than a generic body rejection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::EntityId;

/// Colour given to a city when neither the payload nor its level supply one.
pub const DEFAULT_CITY_COLOR: &str = "#ec4899";

/// Colour given to a trap when the payload omits one.
pub const DEFAULT_TRAP_COLOR: &str = "#f59e0b";

/// Whether a city tile is held by a member or reserved for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityStatus {
    Occupied,
    Reserved,
}

impl CityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CityStatus::Occupied => "occupied",
            CityStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for CityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "occupied" => Ok(CityStatus::Occupied),
            "reserved" => Ok(CityStatus::Reserved),
            other => Err(format!("Unknown city status '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient fields
// ---------------------------------------------------------------------------

/// Conversion from an arbitrary JSON value, accepting the loose encodings
/// clients send (numeric strings for numbers).
pub trait Coerce: Sized {
    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        let n = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(i);
                }
                n.as_f64()?
            }
            Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64).then_some(n as i64)
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        let n = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl Coerce for String {
    fn coerce(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// An optional payload field that remembers whether it was malformed.
///
/// `null` and a missing key both read as [`Field::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Absent,
    Present(T),
    Malformed,
}

impl<T> Field<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Malformed => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed)
    }
}

impl<T: Clone> Field<T> {
    pub fn cloned(&self) -> Option<T> {
        self.as_option().cloned()
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Present(value.to_string())
    }
}

impl<'de, T: Coerce> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Field::Absent);
        }
        Ok(T::coerce(&value).map_or(Field::Malformed, Field::Present))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A city as submitted by the client or found in an import document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityPayload {
    #[serde(default)]
    pub id: Field<EntityId>,
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub level: Field<i64>,
    #[serde(default)]
    pub status: Field<String>,
    #[serde(default)]
    pub x: Field<i64>,
    #[serde(default)]
    pub y: Field<i64>,
    #[serde(default)]
    pub px: Field<f64>,
    #[serde(default)]
    pub py: Field<f64>,
    #[serde(default)]
    pub notes: Field<String>,
    #[serde(default)]
    pub color: Field<String>,
}

/// A bear trap as submitted by the client or found in an import document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrapPayload {
    #[serde(default)]
    pub id: Field<EntityId>,
    #[serde(default)]
    pub slot: Field<i64>,
    #[serde(default)]
    pub x: Field<i64>,
    #[serde(default)]
    pub y: Field<i64>,
    #[serde(default)]
    pub color: Field<String>,
    #[serde(default)]
    pub notes: Field<String>,
}

/// An account as submitted by a user manager.
///
/// `password` may be omitted on update to keep the current one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Field<EntityId>,
    #[serde(default)]
    pub username: Field<String>,
    #[serde(default)]
    pub password: Field<String>,
    #[serde(default)]
    pub role: Field<String>,
}

/// A level-to-colour mapping update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelColorPayload {
    #[serde(default)]
    pub level: Field<i64>,
    #[serde(default)]
    pub color: Field<String>,
}
