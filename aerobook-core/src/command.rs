use serde::{Deserialize, Serialize};

use crate::flight::FlightId;
use crate::passenger::ReservationCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCommand {
    pub flight_id: FlightId,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelCommand {
    pub flight_id: FlightId,
    pub code: ReservationCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCommand {
    pub city: String,
}

/// Everything an input surface can ask of the reservation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Book(BookCommand),
    Cancel(CancelCommand),
    Search(SearchCommand),
    ListFlights,
    Passengers { flight_id: FlightId },
}

impl From<BookCommand> for Command {
    fn from(command: BookCommand) -> Self {
        Self::Book(command)
    }
}

impl From<CancelCommand> for Command {
    fn from(command: CancelCommand) -> Self {
        Self::Cancel(command)
    }
}

impl From<SearchCommand> for Command {
    fn from(command: SearchCommand) -> Self {
        Self::Search(command)
    }
}
