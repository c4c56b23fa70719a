use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::repository::Keyed;
use crate::{CoreError, CoreResult};

/// Date layout used by the catalog file and operator display
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Externally assigned flight number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(pub i32);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FlightId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(FlightId)
            .map_err(|_| CoreError::InvalidFlightId(s.trim().to_string()))
    }
}

/// What sort of service a flight is, beyond seats and a flat price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightKind {
    #[default]
    Standard,
    Cargo {
        capacity_tons: f32,
        cargo_type: String,
    },
    Premium {
        lounge_access: bool,
        special_service: String,
    },
}

/// Derived booking state; there is no stored status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Open,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub date: NaiveDate,
    pub departure_city: String,
    pub destination_city: String,
    pub available_seats: u32,
    pub price: Decimal,
    pub kind: FlightKind,
}

impl Flight {
    /// Build a standard flight. Fails if the price is negative.
    pub fn new(
        id: FlightId,
        date: NaiveDate,
        departure_city: impl Into<String>,
        destination_city: impl Into<String>,
        available_seats: u32,
        price: Decimal,
    ) -> CoreResult<Self> {
        if price < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "flight {id} has a negative price ({price})"
            )));
        }

        Ok(Self {
            id,
            date,
            departure_city: departure_city.into(),
            destination_city: destination_city.into(),
            available_seats,
            price,
            kind: FlightKind::Standard,
        })
    }

    pub fn with_kind(mut self, kind: FlightKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(&self) -> FlightStatus {
        if self.available_seats > 0 {
            FlightStatus::Open
        } else {
            FlightStatus::Full
        }
    }

    pub fn has_seats(&self) -> bool {
        self.status() == FlightStatus::Open
    }

    /// Case-insensitive match on the departure city
    pub fn departs_from(&self, city: &str) -> bool {
        self.departure_city.trim().to_lowercase() == city.trim().to_lowercase()
    }

    /// Take one seat. Returns false, leaving the counter alone, if the flight is full.
    pub fn take_seat(&mut self) -> bool {
        match self.available_seats.checked_sub(1) {
            Some(remaining) => {
                self.available_seats = remaining;
                true
            }
            None => false,
        }
    }

    /// Give back a seat freed by a cancellation
    pub fn release_seat(&mut self) {
        self.available_seats = self.available_seats.saturating_add(1);
    }
}

impl Keyed for Flight {
    type Key = FlightId;

    fn key(&self) -> FlightId {
        self.id
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            FlightKind::Standard => "Flight",
            FlightKind::Cargo { .. } => "Cargo Flight",
            FlightKind::Premium { .. } => "Premium Flight",
        };
        write!(
            f,
            "{label} ID: {}, Departure: {}, Destination: {}, Date: {}, Available Seats: {}, Price: {}",
            self.id,
            self.departure_city,
            self.destination_city,
            self.date.format(DATE_FORMAT),
            self.available_seats,
            self.price,
        )?;

        match &self.kind {
            FlightKind::Standard => Ok(()),
            FlightKind::Cargo {
                capacity_tons,
                cargo_type,
            } => write!(f, ", Cargo Capacity: {capacity_tons} tons, Cargo Type: {cargo_type}"),
            FlightKind::Premium {
                lounge_access,
                special_service,
            } => write!(
                f,
                ", Lounge Access: {}, Special Service: {special_service}",
                if *lounge_access { "yes" } else { "no" }
            ),
        }
    }
}
