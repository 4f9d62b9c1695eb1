//! # Butterfly-visit CLI
//!
//! Command-line interface for the butterfly-visit library.
//! Reads a spreadsheet export, geocodes one owner's addresses and prints a
//! Google Maps directions link for the visiting route.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use butterfly_visit::{
    GeocoderConfig, LinkConfig, NominatimGeocoder, PlanOptions, Sheet, SheetConfig,
    DEFAULT_ROUTE_FILE,
};
use clap::Parser;
use log::{error, info, LevelFilter};

mod cli;

/// Command-line interface for butterfly-visit
#[derive(Parser)]
#[command(name = "butterfly-visit")]
#[command(about = "Turn a spreadsheet of addresses into an ordered visiting route")]
#[command(long_about = "Builds a visiting route for one owner of a spreadsheet export:
  butterfly-visit visits.csv --list-owners     # Show the owners in the sheet
  butterfly-visit visits.csv --owner \"Ana\"     # Route Ana's addresses
  butterfly-visit visits.csv -d ';' -o ana.txt # Semicolon export, custom route file

Addresses are geocoded with Nominatim (OpenStreetMap), ordered with a
nearest-neighbor heuristic and written one per line to the route file.
Addresses that cannot be located are kept at the end in their original order.
The Google Maps directions link is printed on stdout.")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Spreadsheet exported as CSV
    sheet: PathBuf,

    /// Owner whose addresses are routed (defaults to the first owner in the sheet)
    #[arg(long)]
    owner: Option<String>,

    /// List the owners found in the sheet and exit
    #[arg(long)]
    list_owners: bool,

    /// Route file, one address per line (overwritten)
    #[arg(short, long, default_value = DEFAULT_ROUTE_FILE)]
    output: PathBuf,

    /// Header of the owner column
    #[arg(long, default_value = "Proprietário")]
    owner_column: String,

    /// Header of the address column
    #[arg(long, default_value = "Endereço")]
    address_column: String,

    /// Field delimiter of the CSV export
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Nominatim server root
    #[arg(long, default_value = "https://nominatim.openstreetmap.org")]
    geocoder_url: String,

    /// Minimum delay between geocoding requests, in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    /// Timeout for each geocoding request, in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Base of the directions link
    #[arg(long, default_value = "https://www.google.com/maps/dir/")]
    maps_url: String,

    /// Show what would be routed without geocoding anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if cli.verbose {
        eprintln!("🦋 Butterfly-visit v{} starting...", env!("BUTTERFLY_VERSION"));
    }

    let sheet_config = SheetConfig {
        owner_column: cli.owner_column.clone(),
        address_column: cli.address_column.clone(),
        delimiter: delimiter_byte(cli.delimiter)?,
    };
    let sheet = Sheet::from_path(&cli.sheet, &sheet_config)
        .with_context(|| format!("Failed to load {}", cli.sheet.display()))?;

    if cli.list_owners {
        for owner in sheet.owners() {
            println!("{owner}");
        }
        return Ok(());
    }

    let owner = match &cli.owner {
        Some(owner) => owner.clone(),
        None => {
            let Some(first) = sheet.owners().first() else {
                bail!("{} has no data rows", cli.sheet.display());
            };
            info!("No --owner given, using the first owner in the sheet: {first}");
            first.clone()
        }
    };

    if cli.dry_run {
        let rows = sheet.rows_for(&owner)?;
        let output = cli.output.display();
        eprintln!(
            "🔍 [DRY RUN] Would geocode {} addresses for '{owner}' and write the route to {output}",
            rows.len()
        );
        return Ok(());
    }

    plan(&cli, &sheet, &owner).await
}

/// Geocode, route, persist and print the link
async fn plan(cli: &Cli, sheet: &Sheet, owner: &str) -> anyhow::Result<()> {
    let geocoder = NominatimGeocoder::new(GeocoderConfig {
        base_url: cli.geocoder_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        min_interval: Duration::from_millis(cli.delay_ms),
        ..Default::default()
    })?;

    let total = sheet.rows_for(owner)?.len() as u64;
    let progress_manager = cli::ProgressManager::new(total, &format!("🌍 Geocoding addresses for {owner}"));

    let options = PlanOptions {
        route_path: cli.output.clone(),
        link: LinkConfig {
            base_url: cli.maps_url.clone(),
        },
        progress: Some(progress_manager.callback()),
    };

    let plan = butterfly_visit::plan_for_owner(sheet, owner, &geocoder, &options).await?;

    eprint!("{}", cli::render_summary(&plan.rows));
    eprintln!(
        "📍 {} of {} addresses located",
        plan.located_count(),
        plan.rows.len()
    );
    eprintln!("📁 Route saved to: {}", cli.output.display());

    match plan.link {
        Some(link) => {
            eprintln!("🗺️  Open the route in Google Maps:");
            println!("{link}");
        }
        None => {
            eprintln!("⚠️  Could not build a route: at least two addresses are needed");
        }
    }

    Ok(())
}

/// Delimiters must be a single byte for the CSV reader
fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        bail!("Delimiter '{delimiter}' must be an ASCII character")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('§').is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["butterfly-visit", "visits.csv"]);
        assert_eq!(cli.sheet, PathBuf::from("visits.csv"));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_ROUTE_FILE));
        assert_eq!(cli.owner_column, "Proprietário");
        assert_eq!(cli.address_column, "Endereço");
        assert_eq!(cli.delimiter, ',');
        assert_eq!(cli.delay_ms, 2000);
        assert!(cli.owner.is_none());
        assert!(!cli.list_owners);
    }

    #[test]
    fn test_cli_owner_and_output() {
        let cli = Cli::parse_from([
            "butterfly-visit",
            "visits.csv",
            "--owner",
            "Ana Souza",
            "-o",
            "ana.txt",
            "-d",
            ";",
        ]);
        assert_eq!(cli.owner.as_deref(), Some("Ana Souza"));
        assert_eq!(cli.output, PathBuf::from("ana.txt"));
        assert_eq!(cli.delimiter, ';');
    }
}
