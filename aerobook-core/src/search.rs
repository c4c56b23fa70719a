use crate::flight::{Flight, FlightId};
use crate::repository::Repository;

/// Bookable flights leaving `city`, in repository order.
///
/// The city comparison ignores case; flights with no seats left are
/// never returned.
pub fn search_by_departure_city<'a, R>(repo: &'a R, city: &str) -> Vec<&'a Flight>
where
    R: Repository<Flight>,
{
    repo.read_all()
        .iter()
        .filter(|flight| flight.departs_from(city) && flight.has_seats())
        .collect()
}

/// Every flight that still has at least one seat
pub fn available_flights<R>(repo: &R) -> Vec<&Flight>
where
    R: Repository<Flight>,
{
    repo.read_all().iter().filter(|flight| flight.has_seats()).collect()
}

pub fn find_flight<R>(repo: &R, id: FlightId) -> Option<&Flight>
where
    R: Repository<Flight>,
{
    repo.get(&id)
}
