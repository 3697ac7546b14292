//! Core types for Cedar Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order_number;
pub mod price;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use order_number::OrderNumber;
pub use price::Price;
pub use role::{Role, UserStatus};
pub use status::{CancelError, OrderStatus, OrderStatusError, TransitionPolicy};
