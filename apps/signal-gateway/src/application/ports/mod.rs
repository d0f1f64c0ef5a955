//! Application Ports (Driven)
//!
//! Interfaces the pipeline uses to reach external systems.

mod venue_port;

pub use venue_port::{VenueError, VenuePort, VenueResponse};
