use aerobook_core::search::{available_flights, find_flight, search_by_departure_city};
use aerobook_core::{
    BookCommand, CancelCommand, Command, Flight, FlightId, InMemoryRepository, Passenger,
    Repository, Reservation, ReservationCode, SearchCommand,
};
use rust_decimal::Decimal;

use crate::sink::{NullSink, ReservationSink, SinkError};
use crate::{BookingError, BookingResult};

/// Result of a successful booking
#[derive(Debug)]
pub struct Booking {
    pub reservation: Reservation,
    pub remaining_seats: u32,
    pub amount_due: Decimal,
    /// Set when the reservation is held in memory but could not be written out
    pub persist_error: Option<SinkError>,
}

impl Booking {
    pub fn passenger(&self) -> &Passenger {
        &self.reservation.passenger
    }

    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub flight_id: FlightId,
    pub code: ReservationCode,
    pub cancelled: bool,
    pub remaining_seats: u32,
}

/// What executing a [`Command`] produced
#[derive(Debug)]
pub enum Outcome {
    Booked(Booking),
    Cancelled(Cancellation),
    Flights(Vec<Flight>),
    Passengers {
        flight_id: FlightId,
        passengers: Vec<Passenger>,
    },
}

/// Owns the flight catalog and the reservation ledger and keeps the two consistent.
///
/// The ledger is the only record of who is on a flight: a flight's passenger
/// list is always derived from it. Each booking adds one reservation and takes
/// one seat; each cancellation removes one and gives the seat back.
pub struct ReservationEngine<S = NullSink> {
    flights: InMemoryRepository<Flight>,
    reservations: InMemoryRepository<Reservation>,
    sink: S,
}

impl<S: ReservationSink> ReservationEngine<S> {
    /// The reservation ledger inherits the catalog's missing-record policy.
    pub fn new(flights: InMemoryRepository<Flight>, sink: S) -> Self {
        let reservations = InMemoryRepository::with_policy(flights.policy());
        Self {
            flights,
            reservations,
            sink,
        }
    }

    pub fn flights(&self) -> &InMemoryRepository<Flight> {
        &self.flights
    }

    pub fn reservations(&self) -> &InMemoryRepository<Reservation> {
        &self.reservations
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn flight(&self, flight_id: FlightId) -> Option<&Flight> {
        find_flight(&self.flights, flight_id)
    }

    /// Passengers booked on a flight, in booking order
    pub fn passengers(&self, flight_id: FlightId) -> Vec<&Passenger> {
        self.reservations
            .read_all()
            .iter()
            .filter(|reservation| reservation.flight_id == flight_id)
            .map(|reservation| &reservation.passenger)
            .collect()
    }

    pub fn search(&self, city: &str) -> Vec<&Flight> {
        search_by_departure_city(&self.flights, city)
    }

    /// Book a seat for a new passenger and hand the reservation to the sink.
    ///
    /// A sink failure does not undo the booking; it is reported through
    /// [`Booking::persist_error`].
    pub fn book_seat(
        &mut self,
        flight_id: FlightId,
        first_name: &str,
        last_name: &str,
    ) -> BookingResult<Booking> {
        let reservation = Reservation::new(Passenger::new(first_name, last_name), flight_id);
        let (remaining_seats, amount_due) = self.take_seat(reservation.clone())?;

        tracing::info!(
            "Booked flight {flight_id} for {first_name} {last_name}, code {}, {remaining_seats} seats left",
            reservation.code()
        );

        let persist_error = self.sink.append(&reservation).err();
        if let Some(err) = &persist_error {
            tracing::warn!("Booking {} kept in memory only: {err}", reservation.code());
        }

        Ok(Booking {
            reservation,
            remaining_seats,
            amount_due,
            persist_error,
        })
    }

    /// Cancel the reservation on `flight_id` holding `code`.
    ///
    /// Returns `Ok(false)` without touching any state when no reservation on
    /// that flight has the code. If several share a code only the first is
    /// cancelled.
    pub fn cancel_reservation(
        &mut self,
        flight_id: FlightId,
        code: &ReservationCode,
    ) -> BookingResult<bool> {
        if self.flights.get(&flight_id).is_none() {
            return Err(BookingError::FlightNotFound(flight_id));
        }

        let Some(reservation_id) = self
            .reservations
            .read_all()
            .iter()
            .find(|reservation| reservation.matches(flight_id, code))
            .map(|reservation| reservation.id)
        else {
            tracing::debug!("No reservation {code} on flight {flight_id}");
            return Ok(false);
        };

        self.reservations.delete(&reservation_id)?;
        if let Some(flight) = self.flights.get_mut(&flight_id) {
            flight.release_seat();
        }

        tracing::info!("Cancelled reservation {code} on flight {flight_id}");
        Ok(true)
    }

    /// Re-apply a reservation read back from storage. The sink is not called.
    pub fn restore(&mut self, reservation: Reservation) -> BookingResult<()> {
        self.take_seat(reservation).map(|_| ())
    }

    pub fn execute(&mut self, command: Command) -> BookingResult<Outcome> {
        tracing::debug!("Executing {command:?}");

        match command {
            Command::Book(BookCommand {
                flight_id,
                first_name,
                last_name,
            }) => self
                .book_seat(flight_id, &first_name, &last_name)
                .map(Outcome::Booked),
            Command::Cancel(CancelCommand { flight_id, code }) => {
                let cancelled = self.cancel_reservation(flight_id, &code)?;
                let remaining_seats = self
                    .flight(flight_id)
                    .map_or(0, |flight| flight.available_seats);
                Ok(Outcome::Cancelled(Cancellation {
                    flight_id,
                    code,
                    cancelled,
                    remaining_seats,
                }))
            }
            Command::Search(SearchCommand { city }) => Ok(Outcome::Flights(
                self.search(&city).into_iter().cloned().collect(),
            )),
            Command::ListFlights => Ok(Outcome::Flights(self.flights.read_all().to_vec())),
            Command::Passengers { flight_id } => {
                if self.flight(flight_id).is_none() {
                    return Err(BookingError::FlightNotFound(flight_id));
                }
                Ok(Outcome::Passengers {
                    flight_id,
                    passengers: self.passengers(flight_id).into_iter().cloned().collect(),
                })
            }
        }
    }

    /// Bookable flights, in catalog order
    pub fn available_flights(&self) -> Vec<&Flight> {
        available_flights(&self.flights)
    }

    /// Take a seat on the reservation's flight and record it in the ledger.
    /// Nothing is changed if the flight is unknown or full.
    fn take_seat(&mut self, reservation: Reservation) -> BookingResult<(u32, Decimal)> {
        let flight_id = reservation.flight_id;
        let flight = self
            .flights
            .get_mut(&flight_id)
            .ok_or(BookingError::FlightNotFound(flight_id))?;

        if !flight.take_seat() {
            return Err(BookingError::SeatUnavailable(flight_id));
        }
        let taken = (flight.available_seats, flight.price);

        self.reservations.create(reservation);
        Ok(taken)
    }
}
