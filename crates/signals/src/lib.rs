pub mod registry;

pub use registry::{score, OpenOutcome, SignalConfig, SignalRegistry};
