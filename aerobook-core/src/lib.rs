pub mod command;
pub mod flight;
pub mod passenger;
pub mod repository;
pub mod search;

pub use command::{BookCommand, CancelCommand, Command, SearchCommand};
pub use flight::{Flight, FlightId, FlightKind, FlightStatus};
pub use passenger::{Passenger, Reservation, ReservationCode, ReservationId};
pub use repository::{InMemoryRepository, Keyed, MissingPolicy, Repository, RepositoryError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid flight id: {0}")]
    InvalidFlightId(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
