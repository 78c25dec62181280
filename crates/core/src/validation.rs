//! Shape validation for board payloads.
//!
//! Each validator turns a lenient payload into a typed, checked value or a
//! [`CoreError::Validation`] carrying the short message shown to the client.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::grid::{self, TrapFootprint, TRAP_SLOT_MAX, TRAP_SLOT_MIN};
use crate::payloads::{
    CityPayload, CityStatus, Field, LevelColorPayload, TrapPayload, UserPayload,
    DEFAULT_CITY_COLOR, DEFAULT_TRAP_COLOR,
};
use crate::roles::Role;
use crate::types::EntityId;

/// Maximum length of a city name, in characters.
pub const MAX_CITY_NAME_LEN: usize = 100;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LEN: usize = 50;

/// Minimum length of a password, in characters.
pub const MIN_PASSWORD_LEN: usize = 2;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex colour pattern is valid")
});

/// `#rgb` or `#rrggbb`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

fn invalid(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

/// A present string field that is not blank.
fn required_text<'a>(field: &'a Field<String>, msg: &str) -> Result<&'a str, CoreError> {
    match field {
        Field::Present(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(invalid(msg)),
    }
}

fn check_id(field: &Field<EntityId>) -> Result<EntityId, CoreError> {
    required_text(field, "Invalid id").map(str::to_string)
}

fn optional<T: Clone>(field: &Field<T>, msg: &str) -> Result<Option<T>, CoreError> {
    if field.is_malformed() {
        return Err(invalid(msg));
    }
    Ok(field.cloned())
}

fn optional_color(field: &Field<String>) -> Result<Option<String>, CoreError> {
    match optional(field, "Invalid color")? {
        Some(c) if !is_hex_color(&c) => Err(invalid("Invalid color")),
        color => Ok(color),
    }
}

// ---------------------------------------------------------------------------
// Cities
// ---------------------------------------------------------------------------

/// A city payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCity {
    pub id: EntityId,
    pub name: String,
    pub level: Option<i64>,
    pub status: CityStatus,
    pub x: i64,
    pub y: i64,
    pub px: Option<f64>,
    pub py: Option<f64>,
    pub notes: Option<String>,
    /// Colour as submitted; resolution against level colours happens later.
    pub color: Option<String>,
}

impl ValidCity {
    /// The colour to store: the submitted one, else the level's, else the
    /// default city colour.
    pub fn resolved_color(&self, level_color: Option<&str>) -> String {
        self.color
            .as_deref()
            .or(level_color)
            .unwrap_or(DEFAULT_CITY_COLOR)
            .to_string()
    }
}

pub fn validate_city(payload: &CityPayload) -> Result<ValidCity, CoreError> {
    let id = check_id(&payload.id)?;

    let name = required_text(&payload.name, "Invalid name")?;
    if name.chars().count() > MAX_CITY_NAME_LEN {
        return Err(invalid("Invalid name"));
    }

    let level = optional(&payload.level, "Invalid level")?;

    let status: CityStatus = payload
        .status
        .as_option()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid("Invalid status"))?;

    let (x, y) = match (&payload.x, &payload.y) {
        (Field::Present(x), Field::Present(y)) if grid::in_bounds(*x, *y) => (*x, *y),
        _ => return Err(invalid("Invalid coordinates")),
    };

    let px = optional(&payload.px, "Invalid px")?;
    let py = optional(&payload.py, "Invalid py")?;
    let color = optional_color(&payload.color)?;
    let notes = optional(&payload.notes, "Invalid notes")?;

    Ok(ValidCity {
        id,
        name: name.to_string(),
        level,
        status,
        x,
        y,
        px,
        py,
        notes,
        color,
    })
}

// ---------------------------------------------------------------------------
// Traps
// ---------------------------------------------------------------------------

/// A trap payload that passed validation, with its colour defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTrap {
    pub id: EntityId,
    pub slot: i64,
    pub x: i64,
    pub y: i64,
    pub color: String,
    pub notes: Option<String>,
}

impl ValidTrap {
    pub fn footprint(&self) -> TrapFootprint {
        TrapFootprint::new(self.x, self.y)
    }
}

pub fn validate_trap(payload: &TrapPayload) -> Result<ValidTrap, CoreError> {
    let id = check_id(&payload.id)?;

    let slot = match payload.slot {
        Field::Present(s) if (TRAP_SLOT_MIN..=TRAP_SLOT_MAX).contains(&s) => s,
        _ => return Err(invalid("Invalid slot")),
    };

    let (x, y) = match (&payload.x, &payload.y) {
        (Field::Present(x), Field::Present(y)) if TrapFootprint::new(*x, *y).in_bounds() => {
            (*x, *y)
        }
        _ => return Err(invalid("Invalid coordinates")),
    };

    let color = optional_color(&payload.color)?;
    let notes = optional(&payload.notes, "Invalid notes")?;

    Ok(ValidTrap {
        id,
        slot,
        x,
        y,
        color: color.unwrap_or_else(|| DEFAULT_TRAP_COLOR.to_string()),
        notes,
    })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user payload that passed validation. `password` is plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub id: EntityId,
    pub username: String,
    pub password: Option<String>,
    pub role: Role,
}

/// Validate an account payload.
///
/// With `require_password` unset (updates) a missing or empty password is
/// accepted and means "keep the current one"; a present password must still
/// meet the minimum length.
pub fn validate_user(payload: &UserPayload, require_password: bool) -> Result<ValidUser, CoreError> {
    let id = check_id(&payload.id)?;

    let username = required_text(&payload.username, "Invalid username")?;
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(invalid("Invalid username"));
    }

    let password = optional(&payload.password, "Invalid password (min 2 chars)")?
        .filter(|p| !p.is_empty());
    match &password {
        Some(p) if p.chars().count() < MIN_PASSWORD_LEN => {
            return Err(invalid("Invalid password (min 2 chars)"));
        }
        None if require_password => return Err(invalid("Invalid password (min 2 chars)")),
        _ => {}
    }

    let role: Role = payload
        .role
        .as_option()
        .and_then(|r| r.parse().ok())
        .ok_or_else(|| invalid("Invalid role"))?;

    Ok(ValidUser {
        id,
        username: username.to_string(),
        password,
        role,
    })
}

// ---------------------------------------------------------------------------
// Level colours
// ---------------------------------------------------------------------------

pub fn validate_level_color(payload: &LevelColorPayload) -> Result<(i64, String), CoreError> {
    match (&payload.level, &payload.color) {
        (Field::Present(level), Field::Present(color)) if is_hex_color(color) => {
            Ok((*level, color.clone()))
        }
        _ => Err(invalid("Invalid level or color")),
    }
}
