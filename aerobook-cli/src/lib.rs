pub mod display;
pub mod input;
pub mod session;
pub mod startup;

pub use session::Session;
pub use startup::{bootstrap, Startup};
