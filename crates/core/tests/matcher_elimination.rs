use std::collections::BTreeSet;

use ident_core::matcher::{
    is_extended_address, matches_debug_override, signature_consistent, Session,
};
use ident_core::model::{ObservedMessage, PlatformId, Signature};
use ident_core::registry::{default_registry, BrandCatalog, Registry};

fn msg(address: u32, len: u32) -> ObservedMessage {
    ObservedMessage::new(address, len)
}

fn id(name: &str) -> PlatformId {
    PlatformId::new(name)
}

fn names(candidates: &BTreeSet<PlatformId>) -> Vec<&str> {
    candidates.iter().map(|c| c.as_str()).collect()
}

/// Two platforms whose signatures agree at 0x1 and disagree at 0x2.
fn ab_registry() -> Registry {
    let mut catalog = BrandCatalog::new("test");
    catalog.add_fingerprint("A", Signature::from_pairs([(0x1, 8), (0x2, 4)]));
    catalog.add_fingerprint("B", Signature::from_pairs([(0x1, 8), (0x2, 8)]));
    Registry::build(&[catalog]).expect("catalog is collision-free")
}

/// A platform with two trim variants that disagree at 0x2.
fn variant_registry() -> Registry {
    let mut catalog = BrandCatalog::new("test");
    catalog.add_fingerprint("V", Signature::from_pairs([(0x1, 8), (0x2, 4)]));
    catalog.add_fingerprint("V", Signature::from_pairs([(0x1, 8), (0x2, 8)]));
    Registry::build(&[catalog]).expect("catalog is collision-free")
}

/// Every (address, length) pair declared by a built-in signature must keep
/// its own platform alive.
#[test]
fn own_signature_pairs_never_eliminate() {
    let registry = default_registry().expect("registry");

    for (platform, entry) in registry.iter() {
        for signature in &entry.signatures {
            for (address, len) in signature.iter() {
                let mut session =
                    Session::with_candidates(&registry, [platform.clone()]);
                session.observe(&msg(address, len));
                assert!(
                    session.candidates().contains(platform),
                    "{platform} eliminated by its own pair (0x{address:X}, {len})"
                );
            }
        }
    }
}

#[test]
fn length_mismatch_eliminates_sole_candidate() {
    let registry = ab_registry();
    let mut session = Session::with_candidates(&registry, [id("A")]);

    session.observe(&msg(0x2, 8));
    assert!(session.is_exhausted());
}

/// With several signatures, matching any one of them is enough.
#[test]
fn any_signature_keeps_platform_alive() {
    let registry = variant_registry();

    let mut session = Session::with_candidates(&registry, [id("V")]);
    session.observe(&msg(0x2, 4));
    assert_eq!(names(session.candidates()), ["V"]);

    let mut session = Session::with_candidates(&registry, [id("V")]);
    session.observe(&msg(0x2, 8));
    assert_eq!(names(session.candidates()), ["V"]);

    // Neither variant declares length 6 at 0x2.
    let mut session = Session::with_candidates(&registry, [id("V")]);
    session.observe(&msg(0x2, 6));
    assert!(session.is_exhausted());
}

/// An address no signature declares says nothing; only a positive length
/// mismatch on a declared address eliminates.
#[test]
fn silence_is_not_a_contradiction() {
    let registry = ab_registry();
    let mut session = Session::with_candidates(&registry, [id("A"), id("B")]);

    session.observe(&msg(0x7FF, 3));
    assert_eq!(names(session.candidates()), ["A", "B"]);
}

#[test]
fn extended_addresses_never_eliminate() {
    let registry = default_registry().expect("registry");
    let all = registry.all_legacy_fingerprint_platforms();

    let mut session = Session::new(&registry);
    session.observe(&msg(0x800, 1));
    session.observe(&msg(0x900, 8));
    assert_eq!(session.candidates(), &all);

    assert!(is_extended_address(0x800));
    assert!(!is_extended_address(0x7FF));
}

#[test]
fn debug_override_never_eliminates() {
    let registry = default_registry().expect("registry");
    let all = registry.all_legacy_fingerprint_platforms();

    // No built-in signature declares 0x758; the reserved entry alone makes
    // the message consistent.
    let mut session = Session::new(&registry);
    session.observe(&msg(0x758, 8));
    assert_eq!(session.candidates(), &all);

    assert!(matches_debug_override(&msg(0x758, 8)));
    assert!(!matches_debug_override(&msg(0x758, 5)));
}

/// The reserved entry only covers its exact (address, length) pair; it does
/// not shadow a real mismatch on a signature that declares that address.
#[test]
fn debug_override_does_not_mask_declared_mismatch() {
    let mut catalog = BrandCatalog::new("test");
    catalog.add_fingerprint("D", Signature::from_pairs([(0x758, 2)]));
    let registry = Registry::build(&[catalog]).expect("catalog is collision-free");

    let mut session = Session::with_candidates(&registry, [id("D")]);
    session.observe(&msg(0x758, 8));
    assert_eq!(names(session.candidates()), ["D"]);

    session.observe(&msg(0x758, 5));
    assert!(session.is_exhausted());
}

#[test]
fn zero_signature_platform_survives_everything() {
    let registry = default_registry().expect("registry");
    let mut session = Session::with_candidates(&registry, [id("MOCK")]);

    session.observe(&msg(0x17C, 1));
    session.observe(&msg(0x2, 200));
    assert_eq!(names(session.candidates()), ["MOCK"]);
}

/// Candidates the registry does not know behave like zero-signature
/// platforms: this matcher can never disprove them.
#[test]
fn unknown_candidate_is_never_eliminated() {
    let registry = ab_registry();
    let mut session = Session::with_candidates(&registry, [id("A"), id("UNKNOWN")]);

    session.observe(&msg(0x2, 8));
    assert_eq!(names(session.candidates()), ["UNKNOWN"]);
}

#[test]
fn observation_order_does_not_matter() {
    let registry = default_registry().expect("registry");
    let messages =
        [msg(0x17C, 8), msg(0x1A4, 8), msg(0x1D0, 8), msg(0x900, 1), msg(0x758, 8)];
    let orders: [[usize; 5]; 4] =
        [[0, 1, 2, 3, 4], [4, 3, 2, 1, 0], [2, 0, 4, 1, 3], [1, 4, 0, 3, 2]];

    let mut results = Vec::new();
    for order in orders {
        let mut session = Session::new(&registry);
        for index in order {
            session.observe(&messages[index]);
        }
        results.push(session.candidates().clone());
    }

    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

#[test]
fn observing_is_idempotent() {
    let registry = ab_registry();

    let mut once = Session::with_candidates(&registry, [id("A"), id("B")]);
    once.observe(&msg(0x2, 4));

    let mut twice = Session::with_candidates(&registry, [id("A"), id("B")]);
    twice.observe(&msg(0x2, 4));
    twice.observe(&msg(0x2, 4));

    assert_eq!(once.candidates(), twice.candidates());
}

#[test]
fn candidate_set_shrinks_monotonically() {
    let registry = default_registry().expect("registry");
    let mut session = Session::new(&registry);

    let mut previous = session.candidates().clone();
    for message in
        [msg(0x17C, 8), msg(0x900, 4), msg(0x1A4, 8), msg(0x39, 3), msg(0x1D0, 8)]
    {
        let remaining = session.observe(&message).clone();
        assert!(remaining.is_subset(&previous));
        previous = remaining;
    }
}

/// An agreeing address keeps both platforms, a diverging one eliminates
/// the mismatching platform.
#[test]
fn elimination_scenario_shared_then_diverging_address() {
    let registry = ab_registry();
    let mut session = Session::with_candidates(&registry, [id("A"), id("B")]);

    session.observe(&msg(0x1, 8));
    assert_eq!(names(session.candidates()), ["A", "B"]);

    session.observe(&msg(0x2, 4));
    assert_eq!(names(session.candidates()), ["A"]);
    assert_eq!(session.identified(), Some(&id("A")));
}

/// An extended address leaves the candidate set unchanged regardless of
/// signature content.
#[test]
fn elimination_scenario_extended_address_is_inert() {
    let registry = ab_registry();
    let mut session = Session::with_candidates(&registry, [id("A"), id("B")]);

    session.observe(&msg(0x900, 1));
    assert_eq!(names(session.candidates()), ["A", "B"]);
    assert_eq!(session.identified(), None);
}

#[test]
fn full_narrowing_converges_on_one_platform() {
    let registry = default_registry().expect("registry");
    let mut session = Session::new(&registry);

    session.observe_all([msg(0x17C, 8), msg(0x1A4, 8), msg(0x1D0, 8)]);
    assert_eq!(session.identified(), Some(&id("HONDA_CIVIC")));
}

#[test]
fn signature_consistency_rules() {
    let signature = Signature::from_pairs([(0x10, 8)]);

    assert!(signature_consistent(&signature, &msg(0x10, 8)));
    assert!(!signature_consistent(&signature, &msg(0x10, 4)));
    // Undeclared address below the extended range.
    assert!(signature_consistent(&signature, &msg(0x11, 4)));
    // Extended address, inconsistent length anywhere else.
    assert!(signature_consistent(&signature, &msg(0x810, 3)));
    // Reserved diagnostic pair.
    assert!(signature_consistent(&signature, &msg(0x758, 8)));
}
