use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use aerobook_booking::{ReservationSink, SinkError};
use aerobook_core::Reservation;

use crate::loader::{read_records, LoadReport};
use crate::record::{encode_reservation, parse_ledger, LedgerLayout, LedgerRecord};
use crate::{StoreError, StoreResult};

/// Append-only reservation file.
///
/// The file is opened (and created if needed) for every write and closed
/// straight after, so nothing is held open between bookings.
#[derive(Debug, Clone)]
pub struct ReservationFile {
    path: PathBuf,
    layout: LedgerLayout,
}

impl ReservationFile {
    pub fn new(path: impl Into<PathBuf>, layout: LedgerLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()
    }
}

impl ReservationSink for ReservationFile {
    fn append(&mut self, reservation: &Reservation) -> Result<(), SinkError> {
        let line = encode_reservation(reservation, self.layout);
        self.write_line(&line).map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Appended reservation {} to {}", reservation.code(), self.path.display());
        Ok(())
    }
}

/// Read back a ledger file. A file that does not exist yet is an empty ledger.
pub fn load_ledger(path: &Path, layout: LedgerLayout) -> StoreResult<LoadReport<LedgerRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No reservation file at {}, starting empty", path.display());
            return Ok(LoadReport::empty());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let report = read_records(BufReader::new(file), path, |line| parse_ledger(line, layout))?;
    tracing::info!(
        "Loaded {} reservations from {} ({} skipped)",
        report.records.len(),
        path.display(),
        report.warnings.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerobook_core::{FlightId, Passenger};

    fn reservation(first: &str, flight: i32) -> Reservation {
        Reservation::new(Passenger::new(first, "Nowak"), FlightId(flight))
    }

    #[test]
    fn test_appends_one_line_per_booking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passengers.txt");
        let mut file = ReservationFile::new(&path, LedgerLayout::Reservation);

        let first = reservation("Anna", 1);
        let second = reservation("Piotr", 2);
        file.append(&first).unwrap();
        file.append(&second).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Anna,Nowak,{},1", first.code()));
        assert_eq!(lines[1], format!("Piotr,Nowak,{},2", second.code()));
    }

    #[test]
    fn test_append_keeps_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passengers.txt");
        std::fs::write(&path, "Old,Entry,old-code,1\n").unwrap();

        let mut file = ReservationFile::new(&path, LedgerLayout::Passenger);
        let booked = reservation("Anna", 1);
        file.append(&booked).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            format!("Old,Entry,old-code,1\nAnna,Nowak,{}\n", booked.code())
        );
    }

    #[test]
    fn test_unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("passengers.txt");
        let mut file = ReservationFile::new(path, LedgerLayout::Reservation);

        let result = file.append(&reservation("Anna", 1));
        assert!(matches!(result, Err(SinkError::Io { .. })));
    }

    #[test]
    fn test_load_ledger_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passengers.txt");
        std::fs::write(&path, "Anna,Nowak,code-1,1\nbroken\nPiotr,Lis,code-2,x\nEwa,Lis,code-3,2\n")
            .unwrap();

        let report = load_ledger(&path, LedgerLayout::Reservation).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.records[1].flight_id, Some(FlightId(2)));
    }

    #[test]
    fn test_missing_ledger_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let report = load_ledger(&dir.path().join("none.txt"), LedgerLayout::Reservation).unwrap();
        assert!(report.records.is_empty());
        assert!(report.warnings.is_empty());
    }
}
