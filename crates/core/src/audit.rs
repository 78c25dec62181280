//! Audit trail vocabulary and human-readable detail lines.
//!
//! Every board mutation appends one audit row. The `details` column holds a
//! short sentence led by the acting username, rendered by the history view
//! as-is.

use crate::payloads::CityStatus;

// ---------------------------------------------------------------------------
// Entity and action constants
// ---------------------------------------------------------------------------

/// Entity names recorded in `audit_logs.entity` (match table names).
pub mod entities {
    pub const CITIES: &str = "cities";
    pub const TRAPS: &str = "traps";
    pub const USERS: &str = "users";
    pub const LEVEL_COLORS: &str = "level_colors";
    pub const SESSIONS: &str = "sessions";
}

/// Action names recorded in `audit_logs.action`.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const IMPORT: &str = "import";
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
}

// ---------------------------------------------------------------------------
// City change summary
// ---------------------------------------------------------------------------

/// The audit-relevant fields of a city, before or after an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CityState {
    pub name: String,
    pub level: Option<i64>,
    pub status: CityStatus,
    pub x: i64,
    pub y: i64,
    pub px: Option<f64>,
    pub py: Option<f64>,
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Summarize what changed between two city states, e.g.
/// `status occupied->reserved, move (1,2)->(3,4)`. Returns `update` when no
/// tracked field changed.
pub fn city_change_summary(before: &CityState, after: &CityState) -> String {
    let mut changes = Vec::new();
    if before.name != after.name {
        changes.push("change name".to_string());
    }
    if before.status != after.status {
        changes.push(format!("status {}->{}", before.status, after.status));
    }
    if before.level != after.level {
        changes.push(format!("level {}->{}", opt(before.level), opt(after.level)));
    }
    if before.x != after.x || before.y != after.y {
        changes.push(format!(
            "move ({},{})->({},{})",
            before.x, before.y, after.x, after.y
        ));
    }
    if before.px != after.px || before.py != after.py {
        changes.push(format!(
            "abs-pos {},{}->{},{}",
            opt(before.px),
            opt(before.py),
            opt(after.px),
            opt(after.py)
        ));
    }
    if changes.is_empty() {
        "update".to_string()
    } else {
        changes.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Detail lines
// ---------------------------------------------------------------------------

pub fn city_created(actor: &str, x: i64, y: i64, name: &str) -> String {
    format!("{actor} city create ({x}, {y}) {name}")
}

pub fn city_updated(actor: &str, x: i64, y: i64, summary: &str, name: &str) -> String {
    format!("{actor} city update ({x}, {y}) {summary} {name}")
        .trim()
        .to_string()
}

/// `existing` is `(x, y, name)` of the deleted row when it could be read.
pub fn city_deleted(actor: &str, existing: Option<(i64, i64, &str)>) -> String {
    match existing {
        Some((x, y, name)) => format!("{actor} city deleted ({x}, {y}) {name}"),
        None => format!("{actor} city deleted"),
    }
}

pub fn trap_created(actor: &str, x: i64, y: i64, slot: i64) -> String {
    format!("{actor} trap create ({x}, {y}) slot {slot}")
}

pub fn trap_updated(actor: &str, x: i64, y: i64, slot: i64) -> String {
    format!("{actor} trap update ({x}, {y}) slot {slot}")
}

/// `existing` is `(x, y, slot)` of the deleted row when it could be read.
pub fn trap_deleted(actor: &str, existing: Option<(i64, i64, i64)>) -> String {
    match existing {
        Some((x, y, slot)) => format!("{actor} trap deleted ({x}, {y}) slot {slot}"),
        None => format!("{actor} trap deleted"),
    }
}

pub fn user_created(actor: &str, username: &str) -> String {
    format!("{actor} user create {username}")
}

pub fn user_updated(actor: &str, username: &str) -> String {
    format!("{actor} user update {username}")
}

pub fn user_deleted(actor: &str, username_or_id: &str) -> String {
    format!("{actor} user deleted {username_or_id}")
}

pub fn level_color_set(actor: &str, level: i64, color: &str) -> String {
    format!("{actor} level {level} color {color}")
}

pub fn board_imported(actor: &str, cities: usize, traps: usize) -> String {
    format!("{actor} import {cities} cities, {traps} traps")
}

pub fn signed_in(actor: &str) -> String {
    format!("{actor} login")
}

pub fn signed_out(actor: &str) -> String {
    format!("{actor} logout")
}
