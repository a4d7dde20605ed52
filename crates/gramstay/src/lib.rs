pub mod auth;
pub mod config;
pub mod error;
pub mod listings;
pub mod submission;
pub mod telemetry;
