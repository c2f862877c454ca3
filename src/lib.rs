pub mod calendar;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod error;
pub mod telemetry;
