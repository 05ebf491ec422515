pub mod config;
pub mod db;
pub mod ops;
pub mod transport;
pub mod transport_axum;

pub use config::ApiConfig;
pub use db::{Database, DatabaseHandle};
