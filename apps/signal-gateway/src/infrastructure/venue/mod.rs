//! Venue Adapters
//!
//! Implementations of `VenuePort` for trading venues.

pub mod bybit;

pub use bybit::{BybitConfig, BybitEnvironment, BybitError, BybitVenueAdapter};
