pub mod analytics;
pub mod businesses;
pub mod connection;
pub mod rooms;

pub use connection::{init_db, Database};
