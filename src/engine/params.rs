use crate::gen::waveform::WaveformKind;

pub const DEFAULT_FREQUENCY_HZ: f64 = 1.0;
pub const DEFAULT_AMPLITUDE: f64 = 1.0;
pub const DEFAULT_STEPS_PER_CYCLE: u32 = 100;

/// Complete set of generator parameters.
///
/// Outside of startup and shutdown this value only lives inside a
/// [`ParameterStore`](crate::engine::ParameterStore); loops work on copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    pub kind: WaveformKind,
    /// Cycles per second, > 0
    pub frequency_hz: f64,
    /// Normalized output level in [0, 1]
    pub amplitude: f64,
    /// Samples per cycle, > 0
    pub steps_per_cycle: u32,
}

impl WaveParameters {
    pub fn new(kind: WaveformKind, frequency_hz: f64, amplitude: f64, steps_per_cycle: u32) -> Self {
        Self {
            kind,
            frequency_hz,
            amplitude,
            steps_per_cycle,
        }
    }

    /// Check the invariants that must hold before the loops start
    pub fn is_valid(&self) -> bool {
        is_valid_frequency(self.frequency_hz)
            && is_valid_amplitude(self.amplitude)
            && is_valid_steps(self.steps_per_cycle)
    }
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self::new(
            WaveformKind::Sine,
            DEFAULT_FREQUENCY_HZ,
            DEFAULT_AMPLITUDE,
            DEFAULT_STEPS_PER_CYCLE,
        )
    }
}

pub fn is_valid_frequency(frequency_hz: f64) -> bool {
    frequency_hz.is_finite() && frequency_hz > 0.0
}

pub fn is_valid_amplitude(amplitude: f64) -> bool {
    (0.0..=1.0).contains(&amplitude)
}

pub fn is_valid_steps(steps: u32) -> bool {
    steps > 0
}
