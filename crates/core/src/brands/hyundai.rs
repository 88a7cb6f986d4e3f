//! Hyundai / Kia platform catalog.

use super::sig;
use crate::registry::BrandCatalog;

pub const IONIQ5: &str = "HYUNDAI_IONIQ5";
pub const KONA_EV: &str = "HYUNDAI_KONA_EV";
pub const SONATA: &str = "HYUNDAI_SONATA";
pub const KIA_NIRO_EV: &str = "KIA_NIRO_EV";

pub fn catalog() -> BrandCatalog {
    let mut catalog = BrandCatalog::new("hyundai");

    catalog.add_fingerprint(
        SONATA,
        sig(&[
            (0x130, 5),
            (0x17C, 5),
            (0x251, 8),
            (0x260, 8),
            (0x2B0, 6),
            (0x340, 8),
            (0x386, 8),
            (0x394, 8),
            (0x3F5, 8),
            (0x48A, 8),
        ]),
    );

    catalog.add_fingerprint(
        KONA_EV,
        sig(&[
            (0x130, 5),
            (0x17C, 5),
            (0x251, 8),
            (0x260, 8),
            (0x2B0, 6),
            (0x340, 8),
            (0x386, 5),
            (0x394, 8),
            (0x3F5, 8),
            (0x524, 8),
        ]),
    );

    catalog.add_fingerprint(
        KIA_NIRO_EV,
        sig(&[
            (0x130, 5),
            (0x17C, 5),
            (0x251, 8),
            (0x260, 8),
            (0x2B0, 6),
            (0x340, 8),
            (0x386, 5),
            (0x394, 4),
            (0x3F5, 8),
            (0x524, 8),
        ]),
    );

    catalog.add_firmware_platform(KONA_EV);
    catalog.add_firmware_platform(SONATA);
    catalog.add_firmware_platform(KIA_NIRO_EV);
    // CAN-FD platform, firmware identification only.
    catalog.add_firmware_platform(IONIQ5);

    catalog
}
