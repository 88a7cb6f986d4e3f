//! Built-in brand catalogs.
//!
//! Each submodule contributes one `BrandCatalog`: the platforms the brand
//! defines, their bus fingerprint signatures, and the key set of the
//! brand's firmware-version table. `builtin_catalogs` is the explicit
//! registration step: adding a brand means adding a module and one line
//! here, and `Registry::build` rejects identifier collisions at startup.

pub mod honda;
pub mod hyundai;
pub mod mock;
pub mod toyota;
pub mod volkswagen;

use crate::model::Signature;
use crate::registry::BrandCatalog;

/// All built-in catalogs, in registration order.
pub fn builtin_catalogs() -> Vec<BrandCatalog> {
    vec![
        honda::catalog(),
        hyundai::catalog(),
        mock::catalog(),
        toyota::catalog(),
        volkswagen::catalog(),
    ]
}

/// Shorthand for building signature literals in the brand tables.
pub(crate) fn sig(pairs: &[(u32, u32)]) -> Signature {
    Signature::from_pairs(pairs.iter().copied())
}
