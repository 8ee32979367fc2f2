use crate::{
    adapters,
    config::{self, Config, GeocodingGatewayKind},
    gateways,
};
use anyhow::{Context, Result};
use clap::Parser;
use geobatch_core::{
    entities::Table,
    gateways::geocode::GeoCodingGateway,
    usecases::{self, GeocodingSummary},
};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV file with the addresses [default: stdin]
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// CSV file for the result [default: stdout]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Geocoding service
    #[arg(long, value_enum)]
    gateway: Option<GeocodingGatewayKind>,

    /// Name of the column that contains the addresses
    #[arg(long, value_name = "NAME")]
    address_column: Option<String>,

    /// Field delimiter of input and output
    #[arg(long, value_name = "CHAR")]
    delimiter: Option<String>,
}

impl Args {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            gateway: self.gateway,
            address_column: self.address_column.clone(),
            delimiter: self.delimiter.clone(),
        }
    }
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_deref(), args.overrides())?;

    let gateway = gateways::geocoding_gateway(&cfg.geocoding);

    let summary = geocode_file(
        gateway.as_ref(),
        args.input.as_deref(),
        args.output.as_deref(),
        &cfg.table,
    )?;
    log::info!(
        "Geocoded {} rows: {} resolved, {} not found, {} failed, {} skipped",
        summary.rows,
        summary.resolved,
        summary.not_found,
        summary.failed,
        summary.skipped
    );
    Ok(())
}

/// Read the table, geocode the address column and write the extended table.
///
/// The output is replaced only after the whole input has been read
/// and processed, so input and output may be the same file.
fn geocode_file<G>(
    gateway: Option<&G>,
    input: Option<&Path>,
    output: Option<&Path>,
    cfg: &config::Table,
) -> Result<GeocodingSummary>
where
    G: GeoCodingGateway + ?Sized,
{
    let mut table = read_input(input, cfg.delimiter)?;
    let summary = usecases::geocode_table(gateway, &mut table, &cfg.address_column)?;
    write_output(output, &table, cfg.delimiter)?;
    Ok(summary)
}

fn read_input(path: Option<&Path>, delimiter: u8) -> Result<Table> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
            adapters::csv::read_table(BufReader::new(file), delimiter)
        }
        _ => adapters::csv::read_table(io::stdin().lock(), delimiter),
    }
}

fn write_output(path: Option<&Path>, table: &Table, delimiter: u8) -> Result<()> {
    let Some(path) = path else {
        return adapters::csv::write_table(io::stdout().lock(), table, delimiter);
    };
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Unable to create a temporary file in {}", dir.display()))?;
    adapters::csv::write_table(BufWriter::new(file.as_file_mut()), table, delimiter)?;
    file.persist(path)
        .with_context(|| format!("Unable to write {}", path.display()))?;
    Ok(())
}
