pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use db::ListingStore;
pub use error::{AppError, AppResult};
pub use models::{FilterCriteria, Listing, PreferenceBook, UserPreference};
