//! Toyota / Lexus platform catalog.

use super::sig;
use crate::registry::BrandCatalog;

pub const COROLLA: &str = "TOYOTA_COROLLA";
pub const COROLLA_TSS2: &str = "TOYOTA_COROLLA_TSS2";
pub const PRIUS: &str = "TOYOTA_PRIUS";
pub const RAV4: &str = "TOYOTA_RAV4";

pub fn catalog() -> BrandCatalog {
    let mut catalog = BrandCatalog::new("toyota");

    catalog.add_fingerprint(
        COROLLA,
        sig(&[
            (0x24, 8),
            (0x25, 8),
            (0xAA, 8),
            (0xB4, 8),
            (0xBA, 4),
            (0x130, 6),
            (0x17C, 4),
            (0x1C4, 8),
            (0x1D0, 8),
            (0x1D2, 8),
            (0x223, 8),
        ]),
    );

    catalog.add_fingerprint(
        RAV4,
        sig(&[
            (0x24, 8),
            (0x25, 8),
            (0xAA, 8),
            (0xB4, 8),
            (0xBA, 4),
            (0x130, 6),
            (0x17C, 4),
            (0x1C4, 4),
            (0x1D0, 8),
            (0x1D2, 8),
            (0x260, 8),
        ]),
    );

    catalog.add_fingerprint(
        PRIUS,
        sig(&[
            (0x24, 8),
            (0x25, 8),
            (0xAA, 8),
            (0xB4, 8),
            (0xBA, 6),
            (0x130, 6),
            (0x17C, 4),
            (0x1C4, 8),
            (0x1D0, 8),
            (0x1D2, 8),
            (0x2C1, 8),
        ]),
    );
    // Prime trim reports the hybrid state frame at half width.
    catalog.add_fingerprint(
        PRIUS,
        sig(&[
            (0x24, 8),
            (0x25, 8),
            (0xAA, 8),
            (0xB4, 8),
            (0xBA, 6),
            (0x130, 6),
            (0x17C, 4),
            (0x1C4, 8),
            (0x1D0, 8),
            (0x1D2, 4),
            (0x2C1, 8),
        ]),
    );

    catalog.add_firmware_platform(COROLLA);
    catalog.add_firmware_platform(COROLLA_TSS2);
    catalog.add_firmware_platform(PRIUS);
    catalog.add_firmware_platform(RAV4);

    catalog
}
