use std::path::Path;

use anyhow::{anyhow, Context, Result};
use canident::{assemble_catalogs, capture_digest, read_capture};
use clap::{Parser, Subcommand};
use ident_core::garage::{open_garage, VehicleRecord};
use ident_core::matcher::Session;
use ident_core::migration::{default_migrations, resolve_persisted};
use ident_core::model::PlatformId;
use ident_core::registry::Registry;

/// CAN-bus vehicle platform identification CLI.
///
/// This CLI is a thin wrapper around `ident-core` (exposed in code as
/// `ident_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "canident",
    version,
    about = "CAN-bus vehicle platform identification",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known platforms.
    Platforms {
        /// Only list platforms that carry bus fingerprint signatures.
        #[arg(long, default_value_t = false)]
        fingerprinted_only: bool,

        /// Restrict to one brand.
        #[arg(long)]
        brand: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Identify a platform from a capture of observed messages.
    ///
    /// The capture file has one `address,len` pair per line (addresses hex
    /// or decimal); blank lines and `#` comments are skipped.
    Identify {
        /// Path to the capture file.
        #[arg(long)]
        capture: String,

        /// Comma-separated platform identifiers to restrict the starting
        /// candidate set. Defaults to every fingerprinted platform.
        #[arg(long)]
        candidates: Option<String>,

        /// Extra brand catalog YAML files, merged after the built-ins.
        #[arg(long)]
        catalog: Vec<String>,

        /// Trace the candidate count after every message.
        #[arg(long, default_value_t = false)]
        verbose: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Resolve a legacy display name to its current platform identifier.
    Resolve {
        /// The legacy display name, e.g. "AUDI A3".
        name: String,
    },

    /// Identify from a capture and record the result in a garage database.
    Record {
        /// Path to the garage database file.
        #[arg(long)]
        db: String,

        /// Vehicle name to record under (unique per garage).
        #[arg(long)]
        name: String,

        /// Path to the capture file.
        #[arg(long)]
        capture: String,

        /// Skip identification and record this platform directly. Accepts a
        /// current identifier or a legacy display name.
        #[arg(long)]
        platform: Option<String>,

        /// Extra brand catalog YAML files, merged after the built-ins.
        #[arg(long)]
        catalog: Vec<String>,
    },

    /// List the vehicles recorded in a garage database.
    Garage {
        /// Path to the garage database file.
        #[arg(long)]
        db: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Platforms { fingerprinted_only, brand, json } => {
            platforms_command(fingerprinted_only, brand.as_deref(), json)?
        }
        Command::Identify { capture, candidates, catalog, verbose, json } => {
            identify_command(&capture, candidates.as_deref(), &catalog, verbose, json)?
        }
        Command::Resolve { name } => resolve_command(&name)?,
        Command::Record { db, name, capture, platform, catalog } => {
            record_command(&db, &name, &capture, platform.as_deref(), &catalog)?
        }
        Command::Garage { db, json } => garage_command(&db, json)?,
    }

    Ok(())
}

/// Row shape shared by text and JSON platform listings.
#[derive(Debug, serde::Serialize)]
struct PlatformRow {
    name: String,
    brand: String,
    signatures: usize,
    firmware: bool,
}

/// List the known platforms.
fn platforms_command(fingerprinted_only: bool, brand: Option<&str>, json: bool) -> Result<()> {
    let registry = ident_core::registry::default_registry()?;

    let rows: Vec<PlatformRow> = registry
        .iter()
        .filter(|(_, entry)| !fingerprinted_only || !entry.signatures.is_empty())
        .filter(|(_, entry)| brand.map_or(true, |b| entry.brand == b))
        .map(|(id, entry)| PlatformRow {
            name: id.to_string(),
            brand: entry.brand.clone(),
            signatures: entry.signatures.len(),
            firmware: entry.has_firmware,
        })
        .collect();

    if json {
        let serialized = serde_json::to_string_pretty(&rows)
            .context("Failed to serialize platforms to JSON")?;
        println!("{}", serialized);
    } else {
        println!("Platforms ({}):", rows.len());
        if rows.is_empty() {
            println!("  (none)");
            return Ok(());
        }
        for row in rows {
            let firmware = if row.firmware { "yes" } else { "no" };
            println!(
                "  - {} [brand: {}] signatures={} firmware={}",
                row.name, row.brand, row.signatures, firmware
            );
        }
    }

    Ok(())
}

/// Report shape for `identify --json`.
#[derive(Debug, serde::Serialize)]
struct IdentifyReport {
    messages: usize,
    candidates: Vec<String>,
    identified: Option<String>,
}

/// Run an elimination session over a capture file.
fn identify_command(
    capture: &str,
    candidates: Option<&str>,
    catalog_paths: &[String],
    verbose: bool,
    json: bool,
) -> Result<()> {
    let catalogs = assemble_catalogs(catalog_paths)?;
    let registry = Registry::build(&catalogs)?;

    let mut session = match candidates {
        Some(list) => Session::with_candidates(
            &registry,
            list.split(',').map(|name| PlatformId::new(name.trim())),
        ),
        None => Session::new(&registry),
    };

    let messages = read_capture(Path::new(capture))?;
    for msg in &messages {
        let remaining = session.observe(msg);
        if verbose {
            println!("  0x{:03X},{} -> {} candidates", msg.address, msg.len, remaining.len());
        }
    }

    let report = IdentifyReport {
        messages: messages.len(),
        candidates: session.candidates().iter().map(|id| id.to_string()).collect(),
        identified: session.identified().map(|id| id.to_string()),
    };

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize identify report")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Observed {} messages.", report.messages);
    match report.identified {
        Some(platform) => println!("Identified: {}", platform),
        None if report.candidates.is_empty() => {
            println!("No platform remains plausible.");
        }
        None => {
            println!("Still ambiguous ({} candidates):", report.candidates.len());
            for candidate in &report.candidates {
                println!("  - {}", candidate);
            }
        }
    }

    Ok(())
}

/// Resolve one legacy display name.
fn resolve_command(name: &str) -> Result<()> {
    let table = default_migrations();
    let id = table
        .resolve(name)
        .with_context(|| format!("Cannot resolve legacy platform name {name:?}"))?;
    println!("{}", id);
    Ok(())
}

/// Identify from a capture (or take `--platform`) and persist the result.
fn record_command(
    db: &str,
    name: &str,
    capture: &str,
    platform: Option<&str>,
    catalog_paths: &[String],
) -> Result<()> {
    let catalogs = assemble_catalogs(catalog_paths)?;
    let registry = Registry::build(&catalogs)?;
    let migrations = default_migrations();

    let platform = match platform {
        // An explicit platform may be a legacy name; store the current id.
        Some(given) => resolve_persisted(&registry, &migrations, given)
            .with_context(|| format!("Unknown platform {given:?}"))?,
        None => {
            let mut session = Session::new(&registry);
            session.observe_all(read_capture(Path::new(capture))?);
            match session.identified() {
                Some(id) => id.clone(),
                None if session.is_exhausted() => {
                    return Err(anyhow!("No platform matches the capture"));
                }
                None => {
                    return Err(anyhow!(
                        "Capture is ambiguous between {} platforms; observe more traffic or pass --platform",
                        session.candidates().len()
                    ));
                }
            }
        }
    };

    let garage = open_garage(db)?;
    let record = VehicleRecord::new(name, platform.as_str())
        .with_capture_hash(Some(capture_digest(Path::new(capture))?));
    garage.upsert_vehicle(&record).context("Failed to record vehicle")?;

    println!("Recorded vehicle:");
    println!("  Name: {}", record.name);
    println!("  Platform: {}", record.platform);
    println!("  Identified at: {}", record.identified_at);
    Ok(())
}

/// Row shape shared by text and JSON garage listings.
#[derive(Debug, serde::Serialize)]
struct GarageRow {
    name: String,
    platform: String,
    resolved: Option<String>,
    identified_at: String,
}

/// List recorded vehicles, resolving persisted platform strings to current
/// identifiers. Records that no longer resolve are reported, not dropped.
fn garage_command(db: &str, json: bool) -> Result<()> {
    let registry = ident_core::registry::default_registry()?;
    let migrations = default_migrations();
    let garage = open_garage(db)?;

    let rows: Vec<GarageRow> = garage
        .list_vehicles()
        .context("Failed to list vehicles")?
        .into_iter()
        .map(|record| {
            let resolved = resolve_persisted(&registry, &migrations, &record.platform)
                .ok()
                .map(|id| id.to_string());
            GarageRow {
                name: record.name,
                platform: record.platform,
                resolved,
                identified_at: record.identified_at,
            }
        })
        .collect();

    if json {
        let serialized =
            serde_json::to_string_pretty(&rows).context("Failed to serialize garage to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Vehicles ({}):", rows.len());
    if rows.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for row in rows {
        match row.resolved {
            Some(resolved) if resolved == row.platform => {
                println!("  - {} [{}] identified {}", row.name, resolved, row.identified_at);
            }
            Some(resolved) => {
                println!(
                    "  - {} [{} -> {}] identified {}",
                    row.name, row.platform, resolved, row.identified_at
                );
            }
            None => {
                println!(
                    "  - {} [UNRESOLVED: {}] identified {}",
                    row.name, row.platform, row.identified_at
                );
            }
        }
    }

    Ok(())
}
