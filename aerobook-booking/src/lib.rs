pub mod engine;
pub mod sink;

pub use engine::{Booking, Cancellation, Outcome, ReservationEngine};
pub use sink::{MemorySink, NullSink, ReservationSink, SinkError};

use aerobook_core::{FlightId, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Flight not found: {0}")]
    FlightNotFound(FlightId),

    #[error("No seats available on flight {0}")]
    SeatUnavailable(FlightId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type BookingResult<T> = Result<T, BookingError>;
