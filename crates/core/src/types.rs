/// Surrogate keys for append-only tables (audit log, sessions) are SQLite
/// INTEGER PRIMARY KEYs.
pub type DbId = i64;

/// Board entities (cities, traps, users) carry client-supplied opaque ids.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
