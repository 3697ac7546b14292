//! Cedar Market server library.
//!
//! This crate provides the storefront and admin API as a library,
//! allowing it to be tested and reused (the CLI uses it for migrations
//! and admin account creation).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

/// Embedded database migrations, run via the CLI (`cedar-market migrate`).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
