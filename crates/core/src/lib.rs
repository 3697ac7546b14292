//! Cedar Market Core - Shared types library.
//!
//! This crate provides common types used across all Cedar Market components:
//! - `server` - The storefront + admin JSON API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and validation logic - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, roles,
//!   order numbers, and the order status state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
