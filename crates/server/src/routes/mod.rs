//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database)
//!
//! # Auth
//! POST /auth/register              - Register a customer account
//! POST /auth/login                 - Login, sets auth cookie
//! POST /auth/logout                - Logout, clears auth cookie
//! POST /auth/change-password       - Change own password
//! GET  /auth/me                    - Current user
//!
//! # Orders
//! POST  /orders                    - Place an order (customer)
//! GET   /orders                    - Own orders; all orders for admins
//! PATCH /orders                    - Admin status update or customer cancel
//!
//! # Catalog (public)
//! GET  /products                   - Product listing
//! GET  /products/{id}              - Product detail
//! GET  /products/{id}/reviews      - Reviews for a product
//! POST /products/{id}/reviews      - Create a review (customer)
//!
//! # Team (public)
//! GET  /team                       - Team page records
//!
//! # Admin (admin role required)
//! GET    /admin/users              - List users
//! PATCH  /admin/users              - Change status/role, reset password
//! POST   /admin/products           - Create product
//! PATCH  /admin/products/{id}      - Update product
//! DELETE /admin/products/{id}      - Delete product
//! DELETE /admin/reviews/{id}       - Delete review
//! POST   /admin/qr-codes           - Generate and store a QR code
//! GET    /admin/qr-codes           - List QR codes
//! DELETE /admin/qr-codes/{id}      - Delete a QR code
//! POST   /admin/team               - Create team member
//! PATCH  /admin/team/{id}          - Update team member
//! DELETE /admin/team/{id}          - Delete team member
//! ```

pub mod admin;
pub mod auth;
pub mod orders;
pub mod products;
pub mod team;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/change-password", post(auth::change_password))
        .route("/me", get(auth::me))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        post(orders::place).get(orders::list).patch(orders::update),
    )
}

/// Create the public catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route(
            "/{id}/reviews",
            get(products::list_reviews).post(products::create_review),
        )
}

/// Create the admin routes router. Every handler takes `RequireAdmin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(admin::users::index).patch(admin::users::update),
        )
        .route("/products", post(admin::products::create))
        .route(
            "/products/{id}",
            patch(admin::products::update).delete(admin::products::delete),
        )
        .route("/reviews/{id}", axum::routing::delete(admin::reviews::delete))
        .route(
            "/qr-codes",
            post(admin::qr_codes::create).get(admin::qr_codes::index),
        )
        .route(
            "/qr-codes/{id}",
            axum::routing::delete(admin::qr_codes::delete),
        )
        .route("/team", post(admin::team::create))
        .route(
            "/team/{id}",
            patch(admin::team::update).delete(admin::team::delete),
        )
}

/// Assemble the full application router (everything except health checks).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
        .nest("/products", product_routes())
        .route("/team", get(team::index))
        .nest("/admin", admin_routes())
}
