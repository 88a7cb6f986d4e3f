//! Volkswagen group (VW / Audi / Škoda) platform catalog.

use super::sig;
use crate::registry::BrandCatalog;

pub const AUDI_A3_MK3: &str = "AUDI_A3_MK3";
pub const GOLF_MK7: &str = "VOLKSWAGEN_GOLF_MK7";
pub const JETTA_MK7: &str = "VOLKSWAGEN_JETTA_MK7";
pub const SKODA_KODIAQ_MK1: &str = "SKODA_KODIAQ_MK1";

pub fn catalog() -> BrandCatalog {
    let mut catalog = BrandCatalog::new("volkswagen");

    catalog.add_fingerprint(
        GOLF_MK7,
        sig(&[
            (0x40, 8),
            (0x86, 8),
            (0x9F, 8),
            (0xAD, 8),
            (0xFD, 8),
            (0x106, 8),
            (0x116, 8),
            (0x117, 8),
            (0x120, 8),
            (0x121, 8),
            (0x130, 4),
            (0x17C, 6),
        ]),
    );

    catalog.add_fingerprint(
        JETTA_MK7,
        sig(&[
            (0x40, 8),
            (0x86, 8),
            (0x9F, 8),
            (0xAD, 8),
            (0xFD, 4),
            (0x106, 8),
            (0x116, 8),
            (0x117, 8),
            (0x120, 8),
            (0x121, 8),
            (0x130, 4),
            (0x17C, 6),
        ]),
    );

    catalog.add_fingerprint(
        AUDI_A3_MK3,
        sig(&[
            (0x40, 8),
            (0x86, 8),
            (0x9F, 8),
            (0xAD, 8),
            (0xFD, 8),
            (0x106, 8),
            (0x116, 8),
            (0x117, 8),
            (0x120, 6),
            (0x121, 8),
            (0x130, 4),
            (0x17C, 6),
        ]),
    );

    catalog.add_firmware_platform(AUDI_A3_MK3);
    catalog.add_firmware_platform(GOLF_MK7);
    catalog.add_firmware_platform(JETTA_MK7);
    catalog.add_firmware_platform(SKODA_KODIAQ_MK1);

    catalog
}
