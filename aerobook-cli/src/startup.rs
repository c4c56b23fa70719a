use aerobook_booking::ReservationEngine;
use aerobook_core::Repository;
use aerobook_store::app_config::Config;
use aerobook_store::catalog::into_repository;
use aerobook_store::{load_catalog, load_ledger, ReservationFile};
use anyhow::Context;

/// Engine state built at startup, plus warnings to show the operator
pub struct Startup {
    pub engine: ReservationEngine<ReservationFile>,
    pub warnings: Vec<String>,
}

/// Load the catalog and, if configured, replay the reservation file.
///
/// Only an unreadable catalog is fatal. Bad catalog lines, bad ledger lines,
/// an unreadable ledger and reservations that no longer fit their flight
/// all become warnings.
pub fn bootstrap(config: &Config) -> anyhow::Result<Startup> {
    let catalog_path = &config.files.catalog;
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("Failed to load flight catalog {}", catalog_path.display()))?;

    let mut warnings: Vec<String> = catalog
        .warnings
        .iter()
        .map(|w| format!("Invalid data format in {}, {w}", catalog_path.display()))
        .collect();

    let flights = into_repository(catalog.records, config.repository.missing_policy);
    let ledger_path = &config.files.reservations;
    let sink = ReservationFile::new(ledger_path, config.ledger.layout);
    let mut engine = ReservationEngine::new(flights, sink);

    if config.ledger.replay {
        match load_ledger(ledger_path, config.ledger.layout) {
            Ok(ledger) => {
                warnings.extend(ledger.warnings.iter().map(|w| {
                    format!("Invalid data format in {}, {w}", ledger_path.display())
                }));

                for record in ledger.records {
                    let code = record.passenger.reservation_code.clone();
                    let Some(reservation) = record.into_reservation() else {
                        warnings.push(format!(
                            "Reservation {code} in {} has no flight ID, not restored",
                            ledger_path.display()
                        ));
                        continue;
                    };

                    if let Err(err) = engine.restore(reservation) {
                        tracing::warn!("Could not restore reservation {code}: {err}");
                        warnings.push(format!("Reservation {code} not restored: {err}"));
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Continuing without stored reservations: {err}");
                warnings.push(format!("Error loading reservations: {err}"));
            }
        }
    }

    tracing::info!(
        "Ready with {} flights and {} reservations",
        engine.flights().len(),
        engine.reservations().len()
    );

    Ok(Startup { engine, warnings })
}
