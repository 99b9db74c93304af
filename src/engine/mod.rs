//! Shared parameter state and the two loops that run against it

pub mod adjust;
pub mod generator;
pub mod params;
pub mod session;
pub mod stop;
pub mod store;

pub use adjust::{AdjustmentEvent, AdjustmentLoop, AMPLITUDE_STEP, DEFAULT_POLL_INTERVAL, FREQUENCY_STEP_HZ};
pub use generator::{cycle_samples, inter_sample_delay, GenerationLoop};
pub use params::WaveParameters;
pub use session::{Session, SessionReport};
pub use stop::{StopOnDrop, StopSignal};
pub use store::{ParameterStore, FREQUENCY_FLOOR_HZ};
