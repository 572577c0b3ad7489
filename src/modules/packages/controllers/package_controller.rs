use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::core::error::AppError;
use crate::middleware::auth::AdminUser;
use crate::modules::packages::models::{
    CreatePackageRequest, PriceUpdateRequest, UpdatePackageRequest,
};
use crate::modules::packages::services::PackageService;

/// List the catalog
/// GET /api/packages
pub async fn list_packages(
    service: web::Data<Arc<PackageService>>,
) -> Result<HttpResponse, AppError> {
    let packages = service.list_packages().await?;

    Ok(HttpResponse::Ok().json(json!({ "packages": packages })))
}

/// GET /api/packages/{package_id}
pub async fn get_package(
    service: web::Data<Arc<PackageService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let package = service.get_package(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(package))
}

/// POST /api/packages
pub async fn create_package(
    service: web::Data<Arc<PackageService>>,
    _admin: AdminUser,
    request: web::Json<CreatePackageRequest>,
) -> Result<HttpResponse, AppError> {
    let package = service.create_package(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Package created successfully",
        "package": package,
    })))
}

/// PUT /api/packages/{package_id}
pub async fn update_package(
    service: web::Data<Arc<PackageService>>,
    _admin: AdminUser,
    path: web::Path<String>,
    request: web::Json<UpdatePackageRequest>,
) -> Result<HttpResponse, AppError> {
    let package = service
        .update_package(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Package updated successfully",
        "package": package,
    })))
}

/// DELETE /api/packages/{package_id}
pub async fn delete_package(
    service: web::Data<Arc<PackageService>>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_package(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Package deleted successfully" })))
}

/// Admin panel listing
/// GET /api/admin/packages
pub async fn list_admin_packages(
    service: web::Data<Arc<PackageService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let packages = service.list_packages().await?;

    Ok(HttpResponse::Ok().json(json!({ "packages": packages })))
}

/// Admin panel price edit
/// PUT /api/admin/packages/{package_id}
pub async fn update_prices(
    service: web::Data<Arc<PackageService>>,
    _admin: AdminUser,
    path: web::Path<String>,
    request: web::Json<PriceUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let package = service
        .update_prices(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Package updated successfully",
        "package": package,
    })))
}

/// Configure package routes (mounted inside `/api`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/packages")
            .route(web::get().to(list_packages))
            .route(web::post().to(create_package)),
    )
    .service(
        web::resource("/packages/{package_id}")
            .route(web::get().to(get_package))
            .route(web::put().to(update_package))
            .route(web::delete().to(delete_package)),
    )
    .route("/admin/packages", web::get().to(list_admin_packages))
    .route("/admin/packages/{package_id}", web::put().to(update_prices));
}
