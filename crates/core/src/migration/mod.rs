//! Legacy platform-name migration.
//!
//! Vehicles used to be persisted under free-form display names ("HONDA
//! CIVIC 2016 TOURING") before stable platform identifiers existed. The
//! migration table maps every retired name onto its current identifier so
//! old records keep resolving.
//!
//! The table is append-only over the system's lifetime: existing entries
//! are never repointed, only new ones added, which preserves round-trip
//! resolution of names persisted years ago.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::PlatformId;
use crate::registry::Registry;

/// Error type for legacy-name resolution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The name was never a known display name. A hard failure: callers
    /// depend on it to detect corrupt or unsupported persisted records.
    #[error("unknown legacy platform name: {0:?}")]
    UnknownLegacyName(String),

    /// An insert attempted to repoint an existing entry.
    #[error("legacy name {name:?} already maps to {existing}; refusing to repoint to {proposed}")]
    ConflictingEntry { name: String, existing: PlatformId, proposed: PlatformId },
}

/// Convenience result type for migration operations.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Read-mostly mapping from legacy display name to current identifier.
#[derive(Debug, Clone, Default)]
pub struct MigrationTable {
    entries: BTreeMap<String, PlatformId>,
}

impl MigrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Re-inserting an identical mapping is a no-op;
    /// mapping an existing name to a different identifier fails.
    pub fn insert(&mut self, name: impl Into<String>, id: PlatformId) -> MigrationResult<()> {
        let name = name.into();
        if let Some(existing) = self.entries.get(&name) {
            if *existing != id {
                return Err(MigrationError::ConflictingEntry {
                    name,
                    existing: existing.clone(),
                    proposed: id,
                });
            }
            return Ok(());
        }
        self.entries.insert(name, id);
        Ok(())
    }

    /// Exact-match lookup of a legacy display name.
    pub fn resolve(&self, name: &str) -> MigrationResult<&PlatformId> {
        self.entries
            .get(name)
            .ok_or_else(|| MigrationError::UnknownLegacyName(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlatformId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), id))
    }
}

/// Restore a persisted platform string to a current identifier.
///
/// A string that already names a registered platform passes through
/// verbatim; anything else is treated as a legacy display name and looked
/// up in the migration table.
pub fn resolve_persisted(
    registry: &Registry,
    table: &MigrationTable,
    persisted: &str,
) -> MigrationResult<PlatformId> {
    let direct = PlatformId::new(persisted);
    if registry.contains(&direct) {
        return Ok(direct);
    }
    table.resolve(persisted).cloned()
}

/// Retired display names and the identifiers that superseded them.
///
/// Append new entries at the bottom of the relevant brand block; never
/// repoint an existing one.
const LEGACY_NAMES: &[(&str, &str)] = &[
    ("HONDA ACCORD 1.5T 2018", crate::brands::honda::ACCORD),
    ("HONDA ACCORD 2018", crate::brands::honda::ACCORD),
    ("HONDA ACCORD 2018 HYBRID TOURING", crate::brands::honda::ACCORD),
    ("HONDA ACCORD 2018 LX 1.5T", crate::brands::honda::ACCORD),
    ("HONDA ACCORD 2018 SPORT 2T", crate::brands::honda::ACCORD),
    ("HONDA CIVIC 2016", crate::brands::honda::CIVIC),
    ("HONDA CIVIC 2016 TOURING", crate::brands::honda::CIVIC),
    ("HONDA CIVIC 2022", crate::brands::honda::CIVIC_2022),
    ("HONDA CR-V 2017", crate::brands::honda::CRV_5G),
    ("HONDA CR-V 2017 EX", crate::brands::honda::CRV_5G),
    ("TOYOTA COROLLA 2017", crate::brands::toyota::COROLLA),
    ("TOYOTA COROLLA HYBRID TSS2 2019", crate::brands::toyota::COROLLA_TSS2),
    ("TOYOTA COROLLA TSS2 2019", crate::brands::toyota::COROLLA_TSS2),
    ("TOYOTA PRIUS 2017", crate::brands::toyota::PRIUS),
    ("TOYOTA RAV4 2017", crate::brands::toyota::RAV4),
    ("TOYOTA RAV4 HYBRID 2017", crate::brands::toyota::RAV4),
    ("HYUNDAI KONA EV (OS)", crate::brands::hyundai::KONA_EV),
    ("HYUNDAI IONIQ 5 (NE1)", crate::brands::hyundai::IONIQ5),
    ("HYUNDAI SONATA (LF)", crate::brands::hyundai::SONATA),
    ("HYUNDAI SONATA 2020", crate::brands::hyundai::SONATA),
    ("KIA NIRO EV (DE)", crate::brands::hyundai::KIA_NIRO_EV),
    ("AUDI A3", crate::brands::volkswagen::AUDI_A3_MK3),
    ("AUDI A3 3RD GEN", crate::brands::volkswagen::AUDI_A3_MK3),
    ("SKODA KODIAQ 1ST GEN", crate::brands::volkswagen::SKODA_KODIAQ_MK1),
    ("VOLKSWAGEN GOLF 7TH GEN", crate::brands::volkswagen::GOLF_MK7),
    ("VOLKSWAGEN JETTA 7TH GEN", crate::brands::volkswagen::JETTA_MK7),
    ("mock", crate::brands::mock::MOCK),
];

/// The built-in migration table.
///
/// Built directly from `LEGACY_NAMES`; the entries are static and known to
/// be free of repoints, which the tests verify against the append-only
/// `insert`.
pub fn default_migrations() -> MigrationTable {
    let entries = LEGACY_NAMES
        .iter()
        .map(|&(name, id)| (name.to_string(), PlatformId::new(id)))
        .collect();
    MigrationTable { entries }
}
