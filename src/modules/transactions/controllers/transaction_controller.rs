use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::core::error::AppError;
use crate::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::modules::transactions::models::AttendanceUpdateRequest;
use crate::modules::transactions::services::TransactionService;

/// Admins get every booking, customers their own
/// GET /api/transactions
pub async fn list_transactions(
    service: web::Data<Arc<TransactionService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let transactions = service.list_transactions(&user.0).await?;

    Ok(HttpResponse::Ok().json(json!({ "transactions": transactions })))
}

/// GET /api/bookings
pub async fn list_bookings(
    service: web::Data<Arc<TransactionService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let bookings = service.list_bookings().await?;

    Ok(HttpResponse::Ok().json(bookings))
}

/// GET /api/transactions/{session_id}
pub async fn get_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let transaction = service.get_by_session(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(transaction))
}

/// PUT /api/transactions/{id}/attended; `{}` marks attended
pub async fn mark_attended(
    service: web::Data<Arc<TransactionService>>,
    _admin: AdminUser,
    path: web::Path<i64>,
    request: web::Json<AttendanceUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = service
        .mark_attended(path.into_inner(), request.attended)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Transaction updated successfully",
        "transaction": transaction,
    })))
}

/// Configure transaction routes (mounted inside `/api`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/transactions", web::get().to(list_transactions))
        .route("/bookings", web::get().to(list_bookings))
        .route("/transactions/{session_id}", web::get().to(get_transaction))
        .route("/transactions/{id}/attended", web::put().to(mark_attended));
}
