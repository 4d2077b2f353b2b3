//! Riot API client used by the rivals TFT data core.
//!
//! The crate offers typed wrappers around the official REST endpoints, a
//! process-wide sliding-window rate budget shared by every outbound call, and
//! a client for the Community Dragon static-data bundle.

pub mod api;

pub use api::limit::RateBudget;
pub use api::static_data::CDragonClient;
pub use api::tft::TftApiClient;
