use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ident_core::model::ObservedMessage;
use ident_core::registry::BrandCatalog;
use sha2::{Digest, Sha256};

/// Parse a bus address written either as hex (`0x17C`) or decimal (`380`).
pub fn parse_address(input: &str) -> Result<u32> {
    let input = input.trim();
    if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("Invalid hex address: {input}"))
    } else {
        input.parse().with_context(|| format!("Invalid address: {input}"))
    }
}

/// Parse one capture line of the form `address,len`.
///
/// Blank lines and `#` comments yield `None`.
pub fn parse_capture_line(line: &str) -> Result<Option<ObservedMessage>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (address, len) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected `address,len`, got: {line:?}"))?;
    let address = parse_address(address)?;
    let len: u32 = len
        .trim()
        .parse()
        .with_context(|| format!("Invalid payload length: {:?}", len.trim()))?;

    Ok(Some(ObservedMessage::new(address, len)))
}

/// Read a whole capture file into observed messages.
pub fn read_capture(path: &Path) -> Result<Vec<ObservedMessage>> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file {}", path.display()))?;

    let mut messages = Vec::new();
    for (index, line) in body.lines().enumerate() {
        let parsed = parse_capture_line(line)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?;
        if let Some(msg) = parsed {
            messages.push(msg);
        }
    }
    Ok(messages)
}

/// Compute the SHA-256 digest of a capture file as a hex string.
///
/// Captures are small enough to hash in one read.
pub fn capture_digest(path: &Path) -> Result<String> {
    let body = fs::read(path)
        .with_context(|| format!("Failed to read capture file for hashing: {}", path.display()))?;
    let digest = Sha256::digest(&body);
    Ok(format!("{:x}", digest))
}

/// Load one external brand catalog from a YAML file.
pub fn load_catalog(path: &Path) -> Result<BrandCatalog> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_yaml::from_str(&body)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))
}

/// Built-in catalogs plus any external ones, in registration order.
///
/// External catalogs go last so a collision error names the external brand
/// as the second contributor.
pub fn assemble_catalogs(extra: &[String]) -> Result<Vec<BrandCatalog>> {
    let mut catalogs = ident_core::brands::builtin_catalogs();
    for path in extra {
        catalogs.push(load_catalog(Path::new(path))?);
    }
    Ok(catalogs)
}
