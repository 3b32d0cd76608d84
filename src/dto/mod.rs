//! DTO modules that bridge services with templates.

pub mod intake;
pub mod listing;
pub mod main;
