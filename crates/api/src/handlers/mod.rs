//! HTTP handlers, one module per resource.

pub mod audit;
pub mod auth;
pub mod board;
pub mod cities;
pub mod levels;
pub mod pages;
pub mod traps;
pub mod users;
