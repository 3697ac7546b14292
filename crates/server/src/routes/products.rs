//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use cedar_market_core::ProductId;

use crate::db::products::ProductRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireCustomer;
use crate::state::AppState;

/// GET /products
pub async fn index(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;

    Ok(Json(json!({ "success": true, "product": product })))
}

/// GET /products/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(id)
        .await?;

    Ok(Json(json!({ "success": true, "reviews": reviews })))
}

/// Review request body.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

/// POST /products/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
    Path(id): Path<ProductId>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<Response> {
    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_owned(),
        ));
    }
    if body.comment.trim().is_empty() {
        return Err(AppError::BadRequest("comment is required".to_owned()));
    }

    // Reject unknown products up front so the client gets 404, not a
    // foreign-key 500.
    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;

    let review = ReviewRepository::new(state.pool())
        .create(id, user.id, &user.name, body.rating, body.comment.trim())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "review": review })),
    )
        .into_response())
}
