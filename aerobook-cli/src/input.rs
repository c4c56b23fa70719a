use aerobook_core::FlightId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid flight ID: {0}")]
    InvalidFlightId(String),

    #[error("Invalid action: {0}")]
    UnknownAction(String),

    #[error("Invalid reservation code or no reservation for the given code.")]
    UnknownReservationCode,

    #[error("Invalid input: text is not valid UTF-8, please try again.")]
    Encoding,
}

/// Top-level prompt answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Flight(FlightId),
    Search,
    List,
    Exit,
}

/// What to do with a selected flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Book,
    Cancel,
    Exit,
}

pub fn parse_menu_choice(line: &str) -> Result<MenuChoice, InputError> {
    let line = line.trim();
    match line.to_uppercase().as_str() {
        "S" | "SEARCH" => Ok(MenuChoice::Search),
        "L" | "LIST" => Ok(MenuChoice::List),
        "E" | "EXIT" => Ok(MenuChoice::Exit),
        _ => line
            .parse::<FlightId>()
            .map(MenuChoice::Flight)
            .map_err(|_| InputError::InvalidFlightId(line.to_string())),
    }
}

pub fn parse_action(line: &str) -> Result<Action, InputError> {
    match line.trim().to_uppercase().as_str() {
        "B" => Ok(Action::Book),
        "C" => Ok(Action::Cancel),
        "E" => Ok(Action::Exit),
        other => Err(InputError::UnknownAction(other.to_string())),
    }
}
