use ident_core::brands::builtin_catalogs;
use ident_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn builtin_catalogs_have_unique_brand_names() {
    let catalogs = builtin_catalogs();
    assert!(!catalogs.is_empty());

    let mut brands: Vec<&str> = catalogs.iter().map(|c| c.brand.as_str()).collect();
    brands.sort();
    brands.dedup();
    assert_eq!(brands.len(), catalogs.len(), "brand names must be unique");
}

/// Signatures are recorded for 11-bit addressing with classic CAN payloads;
/// the built-in data must stay inside that envelope.
#[test]
fn builtin_signatures_use_standard_addressing() {
    for catalog in builtin_catalogs() {
        for (id, signatures) in &catalog.fingerprints {
            for signature in signatures {
                for (address, len) in signature.iter() {
                    assert!(
                        address < 0x800,
                        "{id}: address 0x{address:X} needs extended addressing"
                    );
                    assert!(
                        (1..=8).contains(&len),
                        "{id}: address 0x{address:X} has payload length {len}"
                    );
                }
            }
        }
    }
}
