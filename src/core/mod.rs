mod config;
pub mod db;
mod location;

pub use config::{AppConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use location::{Coordinates, EmergencyContacts, Location};
