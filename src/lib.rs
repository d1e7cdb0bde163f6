//! Upcoming-fixture listing and reminder timing for a roster of football teams.
//!
//! Fixture pages are fetched per team, embedded match objects are parsed into UTC kickoffs,
//! results are merged, windowed and deduplicated, and each match gets a holiday-aware
//! reminder time.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod handler;
pub mod holiday;
pub mod model;
pub mod orchestrator;
pub mod reminder;
pub mod service;
pub mod skysports;

pub use error::{FetchError, FixtureError};
