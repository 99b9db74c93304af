//! Real-time periodic waveform generator
//!
//! A generation loop renders one cycle at a time from a parameter snapshot while
//! an adjustment loop nudges frequency and amplitude from operator input. Both
//! share a [`engine::ParameterStore`] and a [`engine::StopSignal`].

pub mod cli;
pub mod config;
pub mod controller;
pub mod engine;
pub mod gen;
pub mod platform;
pub mod utils;
