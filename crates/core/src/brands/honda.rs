//! Honda / Acura platform catalog.

use super::sig;
use crate::registry::BrandCatalog;

pub const ACCORD: &str = "HONDA_ACCORD";
pub const CIVIC: &str = "HONDA_CIVIC";
pub const CIVIC_2022: &str = "HONDA_CIVIC_2022";
pub const CRV_5G: &str = "HONDA_CRV_5G";

pub fn catalog() -> BrandCatalog {
    let mut catalog = BrandCatalog::new("honda");

    catalog.add_fingerprint(
        CIVIC,
        sig(&[
            (0x39, 3),
            (0x94, 8),
            (0xE4, 5),
            (0x130, 8),
            (0x158, 8),
            (0x17C, 8),
            (0x191, 8),
            (0x1A4, 8),
            (0x1B0, 7),
            (0x1D0, 8),
            (0x1EA, 8),
            (0x200, 6),
        ]),
    );
    // Diesel trim: shorter powertrain frame, no cruise fault frame.
    catalog.add_fingerprint(
        CIVIC,
        sig(&[
            (0x39, 3),
            (0x94, 8),
            (0xE4, 5),
            (0x130, 8),
            (0x158, 8),
            (0x17C, 8),
            (0x191, 8),
            (0x1A4, 8),
            (0x1B0, 5),
            (0x1D0, 8),
            (0x1EA, 8),
            (0x221, 5),
        ]),
    );

    catalog.add_fingerprint(
        ACCORD,
        sig(&[
            (0x39, 3),
            (0x94, 8),
            (0xE4, 5),
            (0x130, 8),
            (0x158, 8),
            (0x17C, 8),
            (0x191, 8),
            (0x1A4, 4),
            (0x1B0, 7),
            (0x1D0, 8),
            (0x1EF, 8),
            (0x200, 6),
        ]),
    );

    catalog.add_fingerprint(
        CRV_5G,
        sig(&[
            (0x39, 3),
            (0x94, 8),
            (0xE4, 5),
            (0x130, 8),
            (0x158, 8),
            (0x17C, 8),
            (0x191, 8),
            (0x1A4, 8),
            (0x1B0, 7),
            (0x1D0, 4),
            (0x1EA, 8),
            (0x200, 6),
        ]),
    );

    catalog.add_firmware_platform(ACCORD);
    catalog.add_firmware_platform(CIVIC);
    // Bus fingerprints were never collected for the 2022 refresh; it is
    // identified via firmware probing only.
    catalog.add_firmware_platform(CIVIC_2022);
    catalog.add_firmware_platform(CRV_5G);

    catalog
}
