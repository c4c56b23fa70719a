//! Line codecs for the flight catalog and the reservation ledger.
//!
//! Both files are comma separated, one record per line, with no quoting.

use std::str::FromStr;

use aerobook_core::flight::DATE_FORMAT;
use aerobook_core::{Flight, FlightId, FlightKind, Passenger, Reservation, ReservationCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const FIELD_SEPARATOR: char = ',';
const KIND_SEPARATOR: char = ':';

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("not valid UTF-8 after byte {valid_up_to}")]
    Encoding { valid_up_to: usize },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

fn invalid(field: &'static str, value: &str, reason: impl ToString) -> RecordError {
    RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).map(str::trim).collect()
}

/// Parse `id,dd-MM-yyyy,from,to,seats,price[,kind]`.
///
/// The optional seventh field is `standard`, `cargo:<tons>:<type>` or
/// `premium:<yes|no>:<service>`.
pub fn parse_flight(line: &str) -> Result<Flight, RecordError> {
    let fields = split_fields(line);
    if !(6..=7).contains(&fields.len()) {
        return Err(RecordError::FieldCount {
            expected: "6 or 7",
            found: fields.len(),
        });
    }

    let id = FlightId::from_str(fields[0]).map_err(|e| invalid("flight id", fields[0], e))?;
    let date = NaiveDate::parse_from_str(fields[1], DATE_FORMAT)
        .map_err(|e| invalid("date", fields[1], e))?;
    let seats = fields[4]
        .parse::<u32>()
        .map_err(|e| invalid("available seats", fields[4], e))?;
    let price = Decimal::from_str(fields[5]).map_err(|e| invalid("price", fields[5], e))?;

    let flight = Flight::new(id, date, fields[2], fields[3], seats, price)
        .map_err(|e| invalid("price", fields[5], e))?;

    match fields.get(6) {
        Some(kind) => Ok(flight.with_kind(parse_kind(kind)?)),
        None => Ok(flight),
    }
}

fn parse_kind(field: &str) -> Result<FlightKind, RecordError> {
    let parts: Vec<&str> = field.split(KIND_SEPARATOR).map(str::trim).collect();
    let tag = parts[0].to_lowercase();

    match (tag.as_str(), parts.as_slice()) {
        ("" | "standard", [_]) => Ok(FlightKind::Standard),
        ("cargo", [_, capacity, cargo_type]) => Ok(FlightKind::Cargo {
            capacity_tons: capacity
                .parse::<f32>()
                .ok()
                .filter(|tons| tons.is_finite() && *tons >= 0.0)
                .ok_or_else(|| invalid("cargo capacity", capacity, "not a non-negative number"))?,
            cargo_type: (*cargo_type).to_string(),
        }),
        ("premium", [_, lounge, service]) => Ok(FlightKind::Premium {
            lounge_access: parse_flag(lounge)?,
            special_service: (*service).to_string(),
        }),
        _ => Err(invalid("flight kind", field, "unrecognised kind")),
    }
}

fn parse_flag(value: &str) -> Result<bool, RecordError> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(invalid("lounge access", value, "expected yes or no")),
    }
}

/// Which columns a ledger line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerLayout {
    /// `firstName,lastName,reservationCode`
    Passenger,
    /// `firstName,lastName,reservationCode,flightId`
    #[default]
    Reservation,
}

impl LedgerLayout {
    pub fn field_count(self) -> usize {
        match self {
            Self::Passenger => 3,
            Self::Reservation => 4,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::Passenger => "3",
            Self::Reservation => "4",
        }
    }
}

/// One line of the ledger file. Passenger-layout lines carry no flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub passenger: Passenger,
    pub flight_id: Option<FlightId>,
}

impl LedgerRecord {
    pub fn into_reservation(self) -> Option<Reservation> {
        let flight_id = self.flight_id?;
        Some(Reservation::new(self.passenger, flight_id))
    }
}

pub fn parse_ledger(line: &str, layout: LedgerLayout) -> Result<LedgerRecord, RecordError> {
    let fields = split_fields(line);
    if fields.len() != layout.field_count() {
        return Err(RecordError::FieldCount {
            expected: layout.expected(),
            found: fields.len(),
        });
    }

    if fields[2].is_empty() {
        return Err(invalid("reservation code", fields[2], "empty"));
    }
    let passenger = Passenger::with_code(fields[0], fields[1], ReservationCode::from(fields[2]));

    let flight_id = match layout {
        LedgerLayout::Passenger => None,
        LedgerLayout::Reservation => Some(
            FlightId::from_str(fields[3]).map_err(|e| invalid("flight id", fields[3], e))?,
        ),
    };

    Ok(LedgerRecord {
        passenger,
        flight_id,
    })
}

/// Encode one reservation as a ledger line, without the trailing newline
pub fn encode_reservation(reservation: &Reservation, layout: LedgerLayout) -> String {
    let passenger = &reservation.passenger;
    match layout {
        LedgerLayout::Passenger => format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            passenger.first_name, passenger.last_name, passenger.reservation_code
        ),
        LedgerLayout::Reservation => format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            passenger.first_name,
            passenger.last_name,
            passenger.reservation_code,
            reservation.flight_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn test_parse_catalog_line() {
        let flight = parse_flight("1,15-06-2024,Warsaw,Paris,2,199.99").unwrap();

        assert_eq!(flight.id, FlightId(1));
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(flight.departure_city, "Warsaw");
        assert_eq!(flight.destination_city, "Paris");
        assert_eq!(flight.available_seats, 2);
        assert_eq!(flight.price, dec!(199.99));
        assert_eq!(flight.kind, FlightKind::Standard);
    }

    #[test]
    fn test_parse_negative_flight_id() {
        let flight = parse_flight("-7,15-06-2024,Warsaw,Paris,2,199.99").unwrap();
        assert_eq!(flight.id, FlightId(-7));
    }

    #[test]
    fn test_parse_trims_fields() {
        let flight = parse_flight(" 3 , 01-02-2025 , Oslo , Rome , 10 , 80 ").unwrap();
        assert_eq!(flight.departure_city, "Oslo");
        assert_eq!(flight.price, dec!(80));
    }

    #[test]
    fn test_parse_cargo_and_premium_kinds() {
        let cargo = parse_flight("4,01-01-2025,Gdansk,Hamburg,2,50.00,cargo:18.5:Containers").unwrap();
        assert_eq!(
            cargo.kind,
            FlightKind::Cargo {
                capacity_tons: 18.5,
                cargo_type: "Containers".to_string()
            }
        );

        let premium = parse_flight("5,01-01-2025,Krakow,Dubai,8,999.00,PREMIUM:yes:Chauffeur").unwrap();
        assert_eq!(
            premium.kind,
            FlightKind::Premium {
                lounge_access: true,
                special_service: "Chauffeur".to_string()
            }
        );
    }

    #[test_case("1,15-06-2024,Warsaw,Paris,2" ; "too few fields")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,199.99,cargo:1:x,extra" ; "too many fields")]
    #[test_case("" ; "empty line")]
    fn test_wrong_field_count(line: &str) {
        assert!(matches!(
            parse_flight(line),
            Err(RecordError::FieldCount { .. })
        ));
    }

    #[test_case("x,15-06-2024,Warsaw,Paris,2,199.99", "flight id" ; "non numeric id")]
    #[test_case("1,2024-06-15,Warsaw,Paris,2,199.99", "date" ; "iso date")]
    #[test_case("1,31-02-2024,Warsaw,Paris,2,199.99", "date" ; "impossible date")]
    #[test_case("1,15-06-2024,Warsaw,Paris,-2,199.99", "available seats" ; "negative seats")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,199,99", "flight kind" ; "comma decimal")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,abc", "price" ; "non numeric price")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,-5.00", "price" ; "negative price")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,5.00,luxury", "flight kind" ; "unknown kind")]
    #[test_case("1,15-06-2024,Warsaw,Paris,2,5.00,premium:maybe:x", "lounge access" ; "bad lounge flag")]
    fn test_invalid_field(line: &str, expected_field: &str) {
        match parse_flight(line) {
            Err(RecordError::InvalidField { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn test_ledger_line_roundtrip_reservation_layout() {
        let passenger = Passenger::with_code("Anna", "Nowak", "code-1".into());
        let reservation = Reservation::new(passenger.clone(), FlightId(7));

        let line = encode_reservation(&reservation, LedgerLayout::Reservation);
        assert_eq!(line, "Anna,Nowak,code-1,7");

        let record = parse_ledger(&line, LedgerLayout::Reservation).unwrap();
        assert_eq!(record.passenger, passenger);
        assert_eq!(record.flight_id, Some(FlightId(7)));
    }

    #[test]
    fn test_passenger_layout_has_no_flight() {
        let reservation = Reservation::new(
            Passenger::with_code("Anna", "Nowak", "code-1".into()),
            FlightId(7),
        );
        let line = encode_reservation(&reservation, LedgerLayout::Passenger);
        assert_eq!(line, "Anna,Nowak,code-1");

        let record = parse_ledger(&line, LedgerLayout::Passenger).unwrap();
        assert!(record.into_reservation().is_none());
    }

    #[test_case("Anna,Nowak,code-1", LedgerLayout::Reservation ; "missing flight id")]
    #[test_case("Anna,Nowak,code-1,7", LedgerLayout::Passenger ; "extra field for passenger layout")]
    fn test_ledger_field_count(line: &str, layout: LedgerLayout) {
        assert!(matches!(
            parse_ledger(line, layout),
            Err(RecordError::FieldCount { .. })
        ));
    }

    #[test]
    fn test_ledger_rejects_bad_flight_id() {
        assert!(matches!(
            parse_ledger("Anna,Nowak,code-1,seven", LedgerLayout::Reservation),
            Err(RecordError::InvalidField { field: "flight id", .. })
        ));
    }
}
