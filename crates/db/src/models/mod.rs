//! Row models and insert DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching a table
//! row, plus any DTOs the repositories accept for writes.

pub mod audit;
pub mod city;
pub mod level;
pub mod session;
pub mod trap;
pub mod user;
