//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Reads take `&SqlitePool`; writes that may run inside a transaction take
//! any [`sqlx::SqliteExecutor`].

pub mod audit_repo;
pub mod board_repo;
pub mod city_repo;
pub mod level_repo;
pub mod session_repo;
pub mod trap_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use board_repo::BoardRepo;
pub use city_repo::CityRepo;
pub use level_repo::LevelColorRepo;
pub use session_repo::SessionRepo;
pub use trap_repo::TrapRepo;
pub use user_repo::UserRepo;
