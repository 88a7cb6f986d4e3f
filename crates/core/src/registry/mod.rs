//! Signature registry: merges per-brand catalogs into one platform namespace.
//!
//! Each brand contributes a `BrandCatalog` (fingerprint signatures plus the
//! key set of its firmware-version table). `Registry::build` performs a
//! collision-checked merge over an ordered list of catalogs; brand catalogs
//! grow independently, so two catalogs claiming the same identifier is a
//! configuration error and construction aborts rather than picking one.
//!
//! The registry is built once at startup and is immutable afterwards, so any
//! number of identification sessions can read it concurrently.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{PlatformId, Signature};

/// Error type for registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two catalogs contributed the same platform identifier.
    #[error("platform {platform} is defined by both {first_brand} and {second_brand}")]
    DuplicatePlatform { platform: PlatformId, first_brand: String, second_brand: String },
}

/// Convenience result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// One brand's contribution to the platform namespace.
///
/// `fingerprints` maps each platform to its signatures; the list may be
/// empty for platforms with no legacy fingerprint data.
/// `firmware_platforms` is the key set of the brand's firmware-version
/// table. The table itself is opaque to this crate; its keys only widen the
/// known-platform namespace, since firmware-only platforms cannot be probed
/// by bus fingerprinting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandCatalog {
    pub brand: String,
    #[serde(default)]
    pub fingerprints: BTreeMap<PlatformId, Vec<Signature>>,
    #[serde(default)]
    pub firmware_platforms: BTreeSet<PlatformId>,
}

impl BrandCatalog {
    pub fn new(brand: impl Into<String>) -> Self {
        Self { brand: brand.into(), ..Self::default() }
    }

    /// Append one signature to a platform, creating the platform entry if
    /// this is its first.
    pub fn add_fingerprint(&mut self, id: impl Into<PlatformId>, signature: Signature) -> &mut Self {
        self.fingerprints.entry(id.into()).or_default().push(signature);
        self
    }

    /// Declare a platform without signatures (e.g. identified via firmware
    /// probing only, out of scope here).
    pub fn add_platform(&mut self, id: impl Into<PlatformId>) -> &mut Self {
        self.fingerprints.entry(id.into()).or_default();
        self
    }

    pub fn add_firmware_platform(&mut self, id: impl Into<PlatformId>) -> &mut Self {
        self.firmware_platforms.insert(id.into());
        self
    }

    /// Every identifier this catalog defines, across both tables.
    pub fn platform_ids(&self) -> BTreeSet<PlatformId> {
        self.fingerprints.keys().chain(self.firmware_platforms.iter()).cloned().collect()
    }
}

/// Per-platform view after merging: owning brand, signatures, and whether
/// the brand also ships firmware fingerprint data for it.
#[derive(Debug, Clone)]
pub struct PlatformEntry {
    pub brand: String,
    pub signatures: Vec<Signature>,
    pub has_firmware: bool,
}

/// Immutable mapping from platform identifier to its candidate signatures.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    platforms: BTreeMap<PlatformId, PlatformEntry>,
}

impl Registry {
    /// Merge an ordered list of brand catalogs into one namespace.
    ///
    /// Fails with `RegistryError::DuplicatePlatform` if two catalogs define
    /// the same identifier; the error names both brands so the offending
    /// catalog can be found.
    pub fn build(catalogs: &[BrandCatalog]) -> RegistryResult<Self> {
        let mut platforms: BTreeMap<PlatformId, PlatformEntry> = BTreeMap::new();

        for catalog in catalogs {
            for id in catalog.platform_ids() {
                if let Some(existing) = platforms.get(&id) {
                    return Err(RegistryError::DuplicatePlatform {
                        platform: id,
                        first_brand: existing.brand.clone(),
                        second_brand: catalog.brand.clone(),
                    });
                }

                let signatures = catalog.fingerprints.get(&id).cloned().unwrap_or_default();
                let has_firmware = catalog.firmware_platforms.contains(&id);
                platforms.insert(
                    id,
                    PlatformEntry { brand: catalog.brand.clone(), signatures, has_firmware },
                );
            }
        }

        Ok(Self { platforms })
    }

    /// Every known platform, including those with zero signatures.
    pub fn all_known_platforms(&self) -> BTreeSet<PlatformId> {
        self.platforms.keys().cloned().collect()
    }

    /// Platforms with at least one bus fingerprint signature.
    ///
    /// Firmware-only platforms are excluded: the elimination matcher has
    /// nothing to check them against.
    pub fn all_legacy_fingerprint_platforms(&self) -> BTreeSet<PlatformId> {
        self.platforms
            .iter()
            .filter(|(_, entry)| !entry.signatures.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Signatures for a platform; empty for unknown or signature-less ones.
    pub fn signatures(&self, id: &PlatformId) -> &[Signature] {
        self.platforms.get(id).map(|entry| entry.signatures.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, id: &PlatformId) -> Option<&PlatformEntry> {
        self.platforms.get(id)
    }

    pub fn contains(&self, id: &PlatformId) -> bool {
        self.platforms.contains_key(id)
    }

    pub fn brand_of(&self, id: &PlatformId) -> Option<&str> {
        self.platforms.get(id).map(|entry| entry.brand.as_str())
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Iterate platforms in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlatformId, &PlatformEntry)> {
        self.platforms.iter()
    }
}

/// Registry built from the built-in brand catalogs.
pub fn default_registry() -> RegistryResult<Registry> {
    Registry::build(&crate::brands::builtin_catalogs())
}
