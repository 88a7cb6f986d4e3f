//! Mock platform for bench setups without a real vehicle.

use crate::registry::BrandCatalog;

pub const MOCK: &str = "MOCK";

/// The mock platform carries no signatures at all: it can never be
/// eliminated by bus traffic, and is selected explicitly rather than
/// identified.
pub fn catalog() -> BrandCatalog {
    let mut catalog = BrandCatalog::new("mock");
    catalog.add_platform(MOCK);
    catalog
}
