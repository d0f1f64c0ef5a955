//! Bybit v5 Venue Adapter
//!
//! Implementation of `VenuePort` for Bybit's v5 REST API:
//! - public ticker read for the minimum order value check
//! - signed market order creation
//! - mainnet / testnet selection with an optional base URL override

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::BybitVenueAdapter;
pub use config::{BybitConfig, BybitEnvironment};
pub use error::BybitError;
