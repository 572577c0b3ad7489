use super::super::models::{
    CreatePackageRequest, NewPackage, Package, PriceUpdateRequest, UpdatePackageRequest,
};
use super::super::repositories::PackageRepository;
use crate::core::{AppError, Currency, Result};

/// (slug, title, description, date, single, double) with prices in whole dollars
const DEFAULT_PACKAGES: [(&str, &str, &str, &str, i64, i64); 6] = [
    (
        "summer-tech",
        "SUMMER TECH",
        "Engage with industry leaders and innovators from across the continent during Africa's biggest open source conference.",
        "JUNE 19TH - 21ST, 2025",
        2_400,
        1_900,
    ),
    (
        "october-tech",
        "OCTOBER TECH",
        "Meet the founders, business leaders, and innovators shaping Africa's tech ecosystem.",
        "OCTOBER 13TH - 19TH, 2025",
        3_000,
        2_400,
    ),
    (
        "fashion-week",
        "FASHION WEEK",
        "Experience the vibrant fashion scene in Lagos, the fashion capital of Africa.",
        "APRIL 25TH - MAY 1ST, 2025",
        3_500,
        2_800,
    ),
    (
        "lagos-artventure",
        "LAGOS ARTVENTURE",
        "Explore Lagos' vibrant art scene with exclusive gallery access and artist meetings.",
        "AUGUST 15TH - 21ST, 2025",
        3_200,
        2_600,
    ),
    (
        "behind-the-scenes",
        "BEHIND THE SCENES",
        "Get exclusive access to Nigeria's influential media, entertainment, and creative spaces.",
        "SEPTEMBER 10TH - 16TH, 2025",
        3_800,
        3_100,
    ),
    (
        "detty-december",
        "DETTY DECEMBER",
        "Experience the full excitement of Detty December with exclusive access to Lagos' hottest events.",
        "DECEMBER 2025",
        5_000,
        4_300,
    ),
];

/// Catalog reads and admin edits
pub struct PackageService {
    package_repo: PackageRepository,
}

impl PackageService {
    pub fn new(package_repo: PackageRepository) -> Self {
        Self { package_repo }
    }

    pub async fn list_packages(&self) -> Result<Vec<Package>> {
        self.package_repo.list().await
    }

    pub async fn get_package(&self, package_id: &str) -> Result<Package> {
        self.package_repo
            .find_by_slug(package_id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))
    }

    pub async fn create_package(&self, request: CreatePackageRequest) -> Result<Package> {
        let new_package = request.into_new_package()?;
        let package = self.package_repo.create(&new_package).await?;

        tracing::info!(package_id = %package.package_id, "Package created");
        Ok(package)
    }

    /// Partial update; fields absent from the request are left untouched
    pub async fn update_package(
        &self,
        package_id: &str,
        request: UpdatePackageRequest,
    ) -> Result<Package> {
        let mut package = self.get_package(package_id).await?;
        request.apply_to(&mut package)?;

        let package = self.package_repo.update(&package).await?;
        tracing::info!(package_id = %package.package_id, "Package updated");
        Ok(package)
    }

    pub async fn update_prices(
        &self,
        package_id: &str,
        prices: PriceUpdateRequest,
    ) -> Result<Package> {
        let package = self.update_package(package_id, prices.into()).await?;

        tracing::info!(
            package_id = %package.package_id,
            single_price = package.single_price,
            double_price = package.double_price,
            "Package prices changed"
        );
        Ok(package)
    }

    pub async fn delete_package(&self, package_id: &str) -> Result<()> {
        if !self.package_repo.delete(package_id).await? {
            return Err(AppError::not_found("Package not found"));
        }

        tracing::info!(package_id = %package_id, "Package deleted");
        Ok(())
    }

    /// Insert the default catalog into an empty table. Returns the number inserted.
    pub async fn seed_default_packages(&self) -> Result<usize> {
        if self.package_repo.count().await? > 0 {
            return Ok(0);
        }

        for new_package in default_packages() {
            self.package_repo.create(&new_package).await?;
        }

        tracing::info!(count = DEFAULT_PACKAGES.len(), "Seeded default packages");
        Ok(DEFAULT_PACKAGES.len())
    }
}

fn default_packages() -> impl Iterator<Item = NewPackage> {
    DEFAULT_PACKAGES.iter().map(
        |&(package_id, title, description, date, single, double)| NewPackage {
            package_id: package_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            single_price: single * 100,
            double_price: double * 100,
            currency: Currency::Usd,
        },
    )
}
