//! Candidate-elimination matcher over observed bus traffic.
//!
//! A `Session` starts from a candidate set and, for each observed message,
//! drops every platform whose signatures all positively contradict it.
//! Elimination is a monotone set intersection across observations: the
//! candidate set only shrinks, feeding the same message twice changes
//! nothing, and observation order does not matter.
//!
//! A platform is eliminated only by a positive contradiction: a length
//! mismatch at an address its signature declares. An address a signature
//! never mentions says nothing either way, so two platforms whose
//! signatures share no addresses can only be separated once a shared
//! address shows up with differing lengths.

use std::collections::BTreeSet;

use crate::model::{ObservedMessage, PlatformId, Signature, DEBUG_OVERRIDES, EXTENDED_ADDRESS_START};
use crate::registry::Registry;

/// True when `address` needs more than 11 bits.
///
/// Signatures are recorded for 11-bit addressing only, so extended
/// addresses are always treated as consistent.
pub fn is_extended_address(address: u32) -> bool {
    address >= EXTENDED_ADDRESS_START
}

/// True when the message matches a reserved diagnostic entry exactly.
///
/// Kept separate from signature matching so diagnostic reservations can
/// never mask a real signature mismatch elsewhere.
pub fn matches_debug_override(msg: &ObservedMessage) -> bool {
    DEBUG_OVERRIDES.iter().any(|&(address, len)| msg.address == address && msg.len == len)
}

/// True when a single signature is consistent with one observed message.
pub fn signature_consistent(signature: &Signature, msg: &ObservedMessage) -> bool {
    if is_extended_address(msg.address) || matches_debug_override(msg) {
        return true;
    }
    match signature.expected_len(msg.address) {
        Some(expected) => expected == msg.len,
        // Silence is not a contradiction.
        None => true,
    }
}

/// A platform survives a message iff any of its signatures is consistent
/// with it. A platform with no signatures cannot be disproven by this
/// mechanism and always survives; callers must not rely on the matcher
/// alone to confirm such platforms.
pub fn platform_consistent(signatures: &[Signature], msg: &ObservedMessage) -> bool {
    signatures.is_empty() || signatures.iter().any(|signature| signature_consistent(signature, msg))
}

/// One identification session.
///
/// The session owns its candidate set exclusively; identify multiple
/// vehicles concurrently by running one session each against the shared
/// registry.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    registry: &'a Registry,
    candidates: BTreeSet<PlatformId>,
}

impl<'a> Session<'a> {
    /// Start from every platform that has bus fingerprint data.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry, candidates: registry.all_legacy_fingerprint_platforms() }
    }

    /// Start from a caller-restricted candidate set.
    ///
    /// Candidates without signatures (including identifiers the registry
    /// does not know) are vacuously never eliminated.
    pub fn with_candidates(
        registry: &'a Registry,
        candidates: impl IntoIterator<Item = PlatformId>,
    ) -> Self {
        Self { registry, candidates: candidates.into_iter().collect() }
    }

    /// Drop every candidate the message positively contradicts and return
    /// the remaining set.
    pub fn observe(&mut self, msg: &ObservedMessage) -> &BTreeSet<PlatformId> {
        let registry = self.registry;
        self.candidates.retain(|id| platform_consistent(registry.signatures(id), msg));
        &self.candidates
    }

    /// Observe a batch of messages and return the remaining set.
    pub fn observe_all(
        &mut self,
        msgs: impl IntoIterator<Item = ObservedMessage>,
    ) -> &BTreeSet<PlatformId> {
        for msg in msgs {
            self.observe(&msg);
        }
        &self.candidates
    }

    pub fn candidates(&self) -> &BTreeSet<PlatformId> {
        &self.candidates
    }

    /// The sole remaining candidate, once the set has narrowed to one.
    ///
    /// When to stop observing is caller policy; the session itself only
    /// ever narrows.
    pub fn identified(&self) -> Option<&PlatformId> {
        if self.candidates.len() == 1 {
            self.candidates.iter().next()
        } else {
            None
        }
    }

    /// True when no platform remains plausible. A valid outcome, not an
    /// error: the caller decides whether it means a transport problem, an
    /// unknown platform, or a bad signature definition.
    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty()
    }
}
