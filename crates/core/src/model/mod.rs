//! Core data model for bus fingerprinting.
//!
//! This module contains:
//! - `PlatformId`: stable identifier for one vehicle platform.
//! - `Signature`: one message-layout hypothesis (address → payload length).
//! - `ObservedMessage`: a single (address, length) observation from the bus.
//! - Reserved-address constants shared by the matcher.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest address that requires extended (29-bit) addressing.
///
/// Signatures are recorded for 11-bit addressing only, so traffic at or
/// above this address carries no discriminating information.
pub const EXTENDED_ADDRESS_START: u32 = 0x800;

/// Addresses reserved for diagnostic/test equipment, with the payload
/// length such equipment sends. Traffic matching one of these entries must
/// never eliminate a platform.
pub const DEBUG_OVERRIDES: &[(u32, u32)] = &[(0x758, 8)];

/// Stable, opaque token naming one vehicle platform.
///
/// Identifiers are immutable once defined: new platforms are added, never
/// renamed, because externally persisted records reference them by name.
/// Retired display names are handled separately by the migration table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// One message-layout hypothesis for a platform: bus address mapped to the
/// exact payload byte length expected at that address.
///
/// A platform may carry several signatures (one per trim, model year, or
/// ECU variant); matching any one of them is enough for the platform to
/// stay plausible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    frames: BTreeMap<u32, u32>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self { frames: pairs.into_iter().collect() }
    }

    /// Expected payload length at `address`, if this signature declares it.
    pub fn expected_len(&self, address: u32) -> Option<u32> {
        self.frames.get(&address).copied()
    }

    pub fn declares(&self, address: u32) -> bool {
        self.frames.contains_key(&address)
    }

    pub fn insert(&mut self, address: u32, len: u32) {
        self.frames.insert(address, len);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate declared (address, length) pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.frames.iter().map(|(&addr, &len)| (addr, len))
    }
}

impl FromIterator<(u32, u32)> for Signature {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// A single (address, payload length) observation from live bus traffic.
///
/// The transport that reads the bus is an external collaborator; this core
/// places no framing or parsing burden on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedMessage {
    pub address: u32,
    pub len: u32,
}

impl ObservedMessage {
    pub fn new(address: u32, len: u32) -> Self {
        Self { address, len }
    }
}
