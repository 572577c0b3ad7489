use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::modules::checkout::models::CreateCheckoutRequest;
use crate::modules::checkout::services::CheckoutService;

/// Start a hosted checkout. Guests may book; a logged-in user is attached to the booking.
/// POST /api/create-checkout-session
pub async fn create_checkout_session(
    service: web::Data<Arc<CheckoutService>>,
    user: Option<AuthenticatedUser>,
    request: web::Json<CreateCheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let user = user.map(|u| u.0);
    let response = service
        .create_checkout_session(request.into_inner(), user.as_ref())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/verify-payment/{session_id}
pub async fn verify_payment(
    service: web::Data<Arc<CheckoutService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = service.verify_payment(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure checkout routes (mounted inside `/api`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/create-checkout-session",
        web::post().to(create_checkout_session),
    )
    .route(
        "/verify-payment/{session_id}",
        web::get().to(verify_payment),
    );
}
