pub mod package;

pub use package::{
    CreatePackageRequest, NewPackage, Occupancy, Package, PriceInput, PriceUpdateRequest,
    UpdatePackageRequest,
};
