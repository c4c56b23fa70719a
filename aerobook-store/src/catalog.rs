use std::path::Path;

use aerobook_core::{Flight, InMemoryRepository, MissingPolicy, Repository};

use crate::loader::{open, read_records, LoadReport};
use crate::record::parse_flight;
use crate::StoreResult;

/// Load the flight catalog. Malformed lines are skipped with a warning; an
/// unreadable file is an error.
pub fn load_catalog(path: &Path) -> StoreResult<LoadReport<Flight>> {
    let report = read_records(open(path)?, path, parse_flight)?;

    tracing::info!(
        "Loaded {} flights from {} ({} skipped)",
        report.records.len(),
        path.display(),
        report.warnings.len()
    );
    Ok(report)
}

/// Build the flight repository from a loaded catalog
pub fn into_repository(flights: Vec<Flight>, policy: MissingPolicy) -> InMemoryRepository<Flight> {
    let mut repo = InMemoryRepository::with_policy(policy);
    for flight in flights {
        repo.create(flight);
    }
    repo
}
