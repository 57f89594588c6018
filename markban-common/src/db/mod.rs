//! Store access and data models

pub mod models;
pub mod open;

pub use models::*;
pub use open::*;
