//! Domain entities and state machines of the passenger desk.

pub mod draft;
pub mod intake;
pub mod passenger;
pub mod roster;
pub mod types;
