//! Business logic services.

pub mod auth;
pub mod orders;
pub mod qr;
