//! Scrapes per-city commodity prices from the AgBro home page and writes
//! them, with a status envelope, to a JSON file for downstream consumers.

pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod scrapers;

pub use config::Config;
pub use models::{CityRate, RatesEnvelope, Trend};
pub use runner::{collect, run};
