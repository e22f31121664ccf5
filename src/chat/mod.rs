pub mod db;
mod error;
pub mod models;

pub use db::*;
pub use error::*;
pub use models::*;
