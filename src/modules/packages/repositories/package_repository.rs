use super::super::models::{NewPackage, Package};
use crate::core::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;

const PACKAGE_COLUMNS: &str = r#"
    id, package_id, title, description, date,
    single_price, double_price, currency, created_at, updated_at
"#;

/// Repository for the package catalog
pub struct PackageRepository {
    pool: SqlitePool,
}

impl PackageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Package>> {
        let packages = sqlx::query_as::<_, Package>(&format!(
            "SELECT {} FROM packages ORDER BY id",
            PACKAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    pub async fn find_by_slug(&self, package_id: &str) -> Result<Option<Package>> {
        let package = sqlx::query_as::<_, Package>(&format!(
            "SELECT {} FROM packages WHERE package_id = ?",
            PACKAGE_COLUMNS
        ))
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(package)
    }

    /// Insert a package; a duplicate slug is reported as a conflict
    pub async fn create(&self, package: &NewPackage) -> Result<Package> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO packages (
                package_id, title, description, date,
                single_price, double_price, currency, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.package_id)
        .bind(&package.title)
        .bind(&package.description)
        .bind(&package.date)
        .bind(package.single_price)
        .bind(package.double_price)
        .bind(package.currency)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::conflict(format!("Package '{}' already exists", package.package_id))
            } else {
                AppError::Database(e)
            }
        })?;

        self.find_by_slug(&package.package_id)
            .await?
            .ok_or_else(|| AppError::internal("Package was created but not found"))
    }

    /// Persist every editable column of `package`
    pub async fn update(&self, package: &Package) -> Result<Package> {
        let result = sqlx::query(
            r#"
            UPDATE packages
            SET title = ?, description = ?, date = ?,
                single_price = ?, double_price = ?, currency = ?, updated_at = ?
            WHERE package_id = ?
            "#,
        )
        .bind(&package.title)
        .bind(&package.description)
        .bind(&package.date)
        .bind(package.single_price)
        .bind(package.double_price)
        .bind(package.currency)
        .bind(Utc::now())
        .bind(&package.package_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Package not found"));
        }

        self.find_by_slug(&package.package_id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))
    }

    /// Returns false when no package had that slug
    pub async fn delete(&self, package_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM packages WHERE package_id = ?")
            .bind(package_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM packages")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }
}
