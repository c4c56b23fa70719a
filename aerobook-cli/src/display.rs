use std::io::{self, Write};

use aerobook_booking::Booking;
use aerobook_core::{Flight, FlightId, Passenger};

pub fn write_flights<W: Write>(out: &mut W, heading: &str, flights: &[&Flight]) -> io::Result<()> {
    writeln!(out, "\n{heading}")?;
    if flights.is_empty() {
        return writeln!(out, "  (none)");
    }
    for flight in flights {
        writeln!(out, "  {flight}")?;
    }
    Ok(())
}

pub fn write_passengers<W: Write>(
    out: &mut W,
    flight_id: FlightId,
    passengers: &[Passenger],
) -> io::Result<()> {
    writeln!(out, "Passengers on flight {flight_id}:")?;
    if passengers.is_empty() {
        return writeln!(out, "  (none)");
    }
    for passenger in passengers {
        writeln!(out, "  {passenger}")?;
    }
    Ok(())
}

pub fn write_booking<W: Write>(out: &mut W, booking: &Booking) -> io::Result<()> {
    let passenger = booking.passenger();
    writeln!(
        out,
        "\nReservation successful. Passenger: {} {}, Flight ID: {}, Remaining Seats: {}, Amount to Pay: {}",
        passenger.first_name,
        passenger.last_name,
        booking.reservation.flight_id,
        booking.remaining_seats,
        booking.amount_due
    )?;
    writeln!(out, "Reservation code: {}", passenger.reservation_code)?;

    if let Some(err) = &booking.persist_error {
        writeln!(out, "Error saving reservation: {err}")?;
    }
    Ok(())
}
