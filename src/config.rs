//! Persisted generator settings
//!
//! The record is a single line `<waveform> <frequency> <amplitude> <steps>`.
//! Loading is best-effort: anything unreadable or out of range is ignored and
//! the caller keeps whatever parameters it already had.

use crate::engine::params::{is_valid_amplitude, is_valid_frequency, is_valid_steps};
use crate::engine::WaveParameters;
use crate::gen::WaveformKind;
use anyhow::{bail, Context};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "waveform.cfg";

/// Parse and validate a configuration record. Tokens past the fourth are ignored.
pub fn parse_record(text: &str) -> Result<WaveParameters, anyhow::Error> {
    let mut fields = text.split_whitespace();
    let mut next = |name: &str| {
        fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing {} field", name))
    };

    let kind = WaveformKind::from_name(next("waveform")?);
    let frequency_hz: f64 = next("frequency")?.parse().context("invalid frequency")?;
    let amplitude: f64 = next("amplitude")?.parse().context("invalid amplitude")?;
    let steps: u32 = next("steps")?.parse().context("invalid steps")?;

    if !is_valid_frequency(frequency_hz) {
        bail!("frequency {} must be greater than 0", frequency_hz);
    }
    if !is_valid_amplitude(amplitude) {
        bail!("amplitude {} must be within [0, 1]", amplitude);
    }
    if !is_valid_steps(steps) {
        bail!("steps must be greater than 0");
    }

    Ok(WaveParameters::new(kind, frequency_hz, amplitude, steps))
}

pub fn format_record(params: &WaveParameters) -> String {
    format!(
        "{} {:.6} {:.6} {}\n",
        params.kind.name(),
        params.frequency_hz,
        params.amplitude,
        params.steps_per_cycle
    )
}

/// Read the record at `path`. Returns `None` when it is missing or malformed.
pub fn load(path: &Path) -> Option<WaveParameters> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("no configuration loaded from {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_record(&text) {
        Ok(params) => {
            log::info!("Loaded configuration from {}", path.display());
            Some(params)
        }
        Err(e) => {
            log::warn!("Ignoring configuration in {}: {:#}", path.display(), e);
            None
        }
    }
}

/// Overwrite the record at `path`
pub fn save(path: &Path, params: &WaveParameters) -> Result<(), anyhow::Error> {
    fs::write(path, format_record(params))
        .with_context(|| format!("failed to write configuration to {}", path.display()))?;
    log::info!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let params = parse_record("square 440.000000 0.750000 64\n").unwrap();
        assert_eq!(params, WaveParameters::new(WaveformKind::Square, 440.0, 0.75, 64));
    }

    #[test]
    fn test_parse_tolerates_layout() {
        let params = parse_record("  triangular\n2.5\t0.1 12 trailing junk").unwrap();
        assert_eq!(params, WaveParameters::new(WaveformKind::Triangular, 2.5, 0.1, 12));
    }

    #[test]
    fn test_unknown_waveform_loads_as_sine() {
        let params = parse_record("wobble 1 1 10").unwrap();
        assert_eq!(params.kind, WaveformKind::Sine);
    }

    #[test]
    fn test_rejects_malformed_records() {
        assert!(parse_record("").is_err());
        assert!(parse_record("sine 1.0 0.5").is_err());
        assert!(parse_record("sine fast 0.5 10").is_err());
        assert!(parse_record("sine 1.0 0.5 -4").is_err());
        assert!(parse_record("sine 1.0 0.5 2.5").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(parse_record("sine 0 0.5 10").is_err());
        assert!(parse_record("sine -1 0.5 10").is_err());
        assert!(parse_record("sine 1 1.5 10").is_err());
        assert!(parse_record("sine 1 0.5 0").is_err());
    }

    #[test]
    fn test_format_record() {
        let params = WaveParameters::new(WaveformKind::Sawtooth, 1.1, 0.35, 100);
        assert_eq!(format_record(&params), "sawtooth 1.100000 0.350000 100\n");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveform.cfg");
        let params = WaveParameters::new(WaveformKind::Arbitrary, 3.25, 0.5, 20);
        save(&path, &params).unwrap();
        assert_eq!(load(&path), Some(params));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("absent.cfg")), None);
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("waveform.cfg");
        assert!(save(&path, &WaveParameters::default()).is_err());
    }
}
