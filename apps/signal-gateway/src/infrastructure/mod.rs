//! Infrastructure Layer
//!
//! Adapters connecting the application to the outside world.

/// Webhook intake (driver adapter).
pub mod http;

/// Trading venue clients (driven adapters).
pub mod venue;
