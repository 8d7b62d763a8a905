//! Core library for the `avgtemp` CLI.
//!
//! This crate defines:
//! - Configuration & provider endpoint handling
//! - Abstraction over temperature providers
//! - Aggregation of per-provider readings into one average
//!
//! It is used by `avgtemp-cli`, but can also be reused by other binaries or services.

pub mod average;
pub mod config;
pub mod error;
mod guard;
pub mod model;
pub mod provider;

pub use average::AverageService;
pub use config::{Config, ServiceConfig};
pub use error::{Error, Result};
pub use model::Coordinate;
pub use provider::{ProviderRegistry, ServiceId, TemperatureProvider};
