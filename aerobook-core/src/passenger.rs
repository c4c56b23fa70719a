use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::FlightId;
use crate::repository::Keyed;

/// Opaque booking token handed to the passenger; the only key for cancellation.
///
/// Freshly issued codes are v4 UUIDs in canonical 36-character form. Codes
/// read back from a ledger file are taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationCode(String);

impl ReservationCode {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReservationCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for ReservationCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for ReservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub reservation_code: ReservationCode,
}

impl Passenger {
    /// New passenger with a freshly generated reservation code
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::with_code(first_name, last_name, ReservationCode::generate())
    }

    pub fn with_code(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        reservation_code: ReservationCode,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            reservation_code,
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "First Name: {}, Last Name: {}, Reservation Code: {}",
            self.first_name, self.last_name, self.reservation_code
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A passenger's seat on one flight.
///
/// The reservation owns its passenger; the flight is referenced by id and
/// stays owned by the flight repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub passenger: Passenger,
    pub flight_id: FlightId,
}

impl Reservation {
    pub fn new(passenger: Passenger, flight_id: FlightId) -> Self {
        Self {
            id: ReservationId::new(),
            passenger,
            flight_id,
        }
    }

    pub fn code(&self) -> &ReservationCode {
        &self.passenger.reservation_code
    }

    pub fn matches(&self, flight_id: FlightId, code: &ReservationCode) -> bool {
        self.flight_id == flight_id && self.code() == code
    }
}

impl Keyed for Reservation {
    type Key = ReservationId;

    fn key(&self) -> ReservationId {
        self.id
    }
}
