//! Application Use Cases

mod submit_signal;

pub use submit_signal::{PipelineSettings, SignalAccepted, SubmitSignalUseCase};
