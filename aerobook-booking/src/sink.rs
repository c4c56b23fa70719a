use std::io;
use std::path::PathBuf;

use aerobook_core::Reservation;

/// Where new reservations are written as they are booked
pub trait ReservationSink {
    fn append(&mut self, reservation: &Reservation) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write reservation to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Reservation sink unavailable: {0}")]
    Unavailable(String),
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NullSink;

impl ReservationSink for NullSink {
    fn append(&mut self, _reservation: &Reservation) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that keeps appended reservations in memory, optionally failing every write
#[derive(Debug, Default)]
pub struct MemorySink {
    pub written: Vec<Reservation>,
    pub fail: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            written: Vec::new(),
            fail: true,
        }
    }
}

impl ReservationSink for MemorySink {
    fn append(&mut self, reservation: &Reservation) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Unavailable("memory sink set to fail".to_string()));
        }
        self.written.push(reservation.clone());
        Ok(())
    }
}
