use super::{prelude::*, GeocodeOutcome};

pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeocodingSummary {
    pub rows: usize,
    pub resolved: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Rows that were not sent to any service.
    pub skipped: usize,
}

impl GeocodingSummary {
    fn count(&mut self, outcome: &GeocodeOutcome) {
        self.rows += 1;
        match outcome {
            GeocodeOutcome::Resolved(_) => self.resolved += 1,
            GeocodeOutcome::NotFound => self.not_found += 1,
            GeocodeOutcome::CallFailed(_) => self.failed += 1,
            GeocodeOutcome::NoClient => self.skipped += 1,
        }
    }
}

/// Geocode every address of `address_column` and store the
/// results in the columns [`LATITUDE_COLUMN`] and [`LONGITUDE_COLUMN`].
///
/// Rows are processed one after another in table order. Each row is
/// geocoded on its own, identical addresses are requested again.
/// Unresolved rows get empty cells in both columns.
pub fn geocode_table<G>(
    gateway: Option<&G>,
    table: &mut Table,
    address_column: &str,
) -> Result<GeocodingSummary>
where
    G: GeoCodingGateway + ?Sized,
{
    let addresses = table
        .column(address_column)
        .ok_or_else(|| Error::AddressColumn(address_column.to_string()))?;

    log::info!(
        "Geocoding {} addresses of column '{address_column}'",
        table.row_count()
    );

    let mut summary = GeocodingSummary::default();
    let (latitudes, longitudes): (Vec<_>, Vec<_>) = addresses
        .map(|query| {
            let outcome = super::geocode_address(gateway, query);
            summary.count(&outcome);
            match outcome.coordinates() {
                Some(Coordinates { lat, lng }) => (lat.to_string(), lng.to_string()),
                None => (String::new(), String::new()),
            }
        })
        .unzip();

    table.set_column(LATITUDE_COLUMN, latitudes)?;
    table.set_column(LONGITUDE_COLUMN, longitudes)?;
    Ok(summary)
}
