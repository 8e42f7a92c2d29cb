//! Core library for the `pollen` chat command.
//!
//! This crate defines:
//! - The Pollen.com forecast client and its error taxonomy
//! - Defensive models for the loosely-structured API payload
//! - Severity classification and reply rendering (plain text or card)
//! - Configuration handling for the default location
//!
//! It is used by `pollen-cli`, but can also be reused by other binaries or bots.

pub mod client;
pub mod config;
pub mod model;
pub mod render;
pub mod severity;

pub use client::{ClientConfig, FetchError, ForecastFetcher, PollenComClient, web_link};
pub use config::Config;
pub use model::{ForecastLocation, ForecastPeriod, PollenForecast, Trigger};
pub use render::{Card, CardField, RenderedMessage, SurfaceCapability, render};
pub use severity::{SeverityTier, classify};
