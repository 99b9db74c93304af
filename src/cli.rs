use crate::config::DEFAULT_CONFIG_PATH;
use crate::engine::params::{is_valid_amplitude, is_valid_frequency};
use crate::engine::WaveParameters;
use crate::gen::WaveformKind;
use clap::Parser;
use std::path::PathBuf;

/// Real-time periodic waveform generator.
///
/// Positional arguments override the saved configuration. While running, the
/// arrow keys adjust frequency (up/down) and amplitude (right/left); 'q' quits.
#[derive(Parser, Debug, Clone)]
#[command(name = "wavegen", version)]
pub struct Cli {
    /// sine, square, triangular, sawtooth or arbitrary (unknown names use sine)
    pub waveform: Option<WaveformKind>,

    /// Frequency in Hz, greater than 0
    #[arg(allow_negative_numbers = true)]
    pub frequency: Option<String>,

    /// Amplitude between 0 and 1
    #[arg(allow_negative_numbers = true)]
    pub amplitude: Option<String>,

    /// Points per cycle, greater than 0
    #[arg(allow_negative_numbers = true)]
    pub steps: Option<String>,

    /// Configuration record loaded at startup and saved at exit
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Do not write the configuration back on exit
    #[arg(long)]
    pub no_save: bool,

    /// Stop after this many complete cycles
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Write samples to a 16-bit WAV file instead of stdout
    #[cfg(feature = "bounce")]
    #[arg(long)]
    pub wav: Option<PathBuf>,
}

impl Cli {
    /// Apply the positional overrides. Values that are not numbers or fall out
    /// of range are reported and the existing value is kept.
    pub fn apply_overrides(&self, params: &mut WaveParameters) {
        if let Some(kind) = self.waveform {
            params.kind = kind;
        }

        if let Some(raw) = &self.frequency {
            match raw.trim().parse::<f64>() {
                Ok(frequency) if is_valid_frequency(frequency) => params.frequency_hz = frequency,
                _ => log::warn!(
                    "Invalid frequency value {}. Using {:.2} Hz.",
                    raw,
                    params.frequency_hz
                ),
            }
        }

        if let Some(raw) = &self.amplitude {
            match raw.trim().parse::<f64>() {
                Ok(amplitude) if is_valid_amplitude(amplitude) => params.amplitude = amplitude,
                _ => log::warn!(
                    "Invalid amplitude value {}. Using {:.2}.",
                    raw,
                    params.amplitude
                ),
            }
        }

        if let Some(raw) = &self.steps {
            match raw.trim().parse::<u32>() {
                Ok(steps) if steps > 0 => params.steps_per_cycle = steps,
                _ => log::warn!(
                    "Invalid steps value {}. Using {}.",
                    raw,
                    params.steps_per_cycle
                ),
            }
        }
    }
}
