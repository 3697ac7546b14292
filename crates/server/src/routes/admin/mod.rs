//! Admin route handlers. Every handler here takes `RequireAdmin`.

pub mod products;
pub mod qr_codes;
pub mod reviews;
pub mod team;
pub mod users;
