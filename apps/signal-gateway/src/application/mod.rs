//! Application Layer
//!
//! Orchestrates the domain pipeline for one signal:
//!
//! - **Ports**: the venue the pipeline reads prices from and submits to
//! - **Use Cases**: `SubmitSignalUseCase`, the per-request pipeline

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
