use std::io::{self, BufRead, Write};

use aerobook_booking::{BookingError, Outcome, ReservationEngine, ReservationSink};
use aerobook_core::{BookCommand, CancelCommand, Command, FlightId, SearchCommand};

use crate::display::{write_booking, write_flights, write_passengers};
use crate::input::{parse_action, parse_menu_choice, Action, InputError, MenuChoice};

enum Flow {
    Continue,
    Exit,
}

/// Interactive prompt loop over any line source and output.
///
/// Each answer is turned into a [`Command`] for the engine; bad input is
/// reported and the loop carries on. The session ends on `E` or at end of
/// input.
pub struct Session<'a, S, R, W> {
    engine: &'a mut ReservationEngine<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: ReservationSink,
    R: BufRead,
    W: Write,
{
    pub fn new(engine: &'a mut ReservationEngine<S>, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn report_warnings(&mut self, warnings: &[String]) -> io::Result<()> {
        for warning in warnings {
            writeln!(self.output, "Warning: {warning}")?;
        }
        Ok(())
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let available = self.engine.available_flights();
            write_flights(&mut self.output, "Available flights:", &available)?;

            let Some(line) = self.prompt(
                "\nEnter a flight ID to book or cancel a seat, S to search by departure city, L to list all flights, or E to exit: ",
            )?
            else {
                break;
            };

            let flow = match parse_menu_choice(&line) {
                Ok(MenuChoice::Flight(flight_id)) => self.select_flight(flight_id)?,
                Ok(MenuChoice::Search) => self.search()?,
                Ok(MenuChoice::List) => self.list()?,
                Ok(MenuChoice::Exit) => Flow::Exit,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Closing the application. Thank you!")?;
        self.output.flush()
    }

    fn select_flight(&mut self, flight_id: FlightId) -> io::Result<Flow> {
        let passengers = match self.engine.execute(Command::Passengers { flight_id }) {
            Ok(Outcome::Passengers { passengers, .. }) => passengers,
            Ok(_) => Vec::new(),
            Err(_) => {
                writeln!(self.output, "{}", InputError::InvalidFlightId(flight_id.to_string()))?;
                return Ok(Flow::Continue);
            }
        };
        write_passengers(&mut self.output, flight_id, &passengers)?;

        let Some(line) = self.prompt("Do you want to book (B), cancel (C) a seat, or exit (E)? ")?
        else {
            return Ok(Flow::Exit);
        };

        match parse_action(&line) {
            Ok(Action::Book) => self.book(flight_id),
            Ok(Action::Cancel) if passengers.is_empty() => {
                writeln!(self.output, "There are no reservations on flight {flight_id} to cancel.")?;
                Ok(Flow::Continue)
            }
            Ok(Action::Cancel) => self.cancel(flight_id),
            Ok(Action::Exit) => Ok(Flow::Exit),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn book(&mut self, flight_id: FlightId) -> io::Result<Flow> {
        if self.engine.flight(flight_id).is_some_and(|flight| !flight.has_seats()) {
            writeln!(self.output, "{}", BookingError::SeatUnavailable(flight_id))?;
            return Ok(Flow::Continue);
        }

        let Some(first_name) = self.prompt("Enter first name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(last_name) = self.prompt("Enter last name: ")? else {
            return Ok(Flow::Exit);
        };

        let command = BookCommand {
            flight_id,
            first_name,
            last_name,
        };
        match self.engine.execute(command.into()) {
            Ok(Outcome::Booked(booking)) => write_booking(&mut self.output, &booking)?,
            Ok(_) => {}
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn cancel(&mut self, flight_id: FlightId) -> io::Result<Flow> {
        let Some(code) = self.prompt("Enter the passenger's reservation code to cancel: ")? else {
            return Ok(Flow::Exit);
        };

        let command = CancelCommand {
            flight_id,
            code: code.into(),
        };
        match self.engine.execute(command.into()) {
            Ok(Outcome::Cancelled(cancellation)) if cancellation.cancelled => {
                writeln!(
                    self.output,
                    "Reservation canceled successfully. Available seats: {}",
                    cancellation.remaining_seats
                )?;
            }
            Ok(_) => writeln!(self.output, "{}", InputError::UnknownReservationCode)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(city) = self.prompt("Enter departure city: ")? else {
            return Ok(Flow::Exit);
        };

        let heading = format!("Available flights from {city}:");
        match self.engine.execute(SearchCommand { city }.into()) {
            Ok(Outcome::Flights(flights)) => {
                let flights: Vec<_> = flights.iter().collect();
                write_flights(&mut self.output, &heading, &flights)?;
            }
            Ok(_) => {}
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<Flow> {
        match self.engine.execute(Command::ListFlights) {
            Ok(Outcome::Flights(flights)) => {
                let flights: Vec<_> = flights.iter().collect();
                write_flights(&mut self.output, "All flights:", &flights)?;
            }
            Ok(_) => {}
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    /// Print `text` and read one trimmed line, asking again while the answer
    /// is not valid UTF-8. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            write!(self.output, "{text}")?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(buf) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(err) => {
                    writeln!(self.output, "{}", InputError::Encoding)?;
                    buf = err.into_bytes();
                }
            }
        }
    }
}
