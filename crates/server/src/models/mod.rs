//! Domain models.
//!
//! These types represent validated domain objects separate from database
//! row types, and double as the JSON shapes the API serves (camelCase).

pub mod order;
pub mod product;
pub mod qr_code;
pub mod review;
pub mod team_member;
pub mod user;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use qr_code::QrCode;
pub use review::Review;
pub use team_member::TeamMember;
pub use user::User;
