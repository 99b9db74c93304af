use super::params::WaveParameters;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Frequency nudges that would land at or below this value are rejected
pub const FREQUENCY_FLOOR_HZ: f64 = 0.1;

/// Shared home of the live [`WaveParameters`].
///
/// A single mutex guards every operation and the critical sections only copy
/// or update a few fields, so readers are never held up by I/O or sleeping.
#[derive(Debug, Default)]
pub struct ParameterStore {
    params: Mutex<WaveParameters>,
}

impl ParameterStore {
    pub fn new(params: WaveParameters) -> Self {
        Self {
            params: Mutex::new(params),
        }
    }

    // WaveParameters is Copy and every write is a whole-field assignment, so a
    // poisoned lock still holds a consistent value.
    fn lock(&self) -> MutexGuard<'_, WaveParameters> {
        self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consistent copy of the current parameters
    pub fn snapshot(&self) -> WaveParameters {
        *self.lock()
    }

    /// Add `delta` to the frequency.
    ///
    /// Returns the new frequency, or `None` when the result would be at or
    /// below [`FREQUENCY_FLOOR_HZ`] and the frequency was left unchanged.
    pub fn adjust_frequency(&self, delta: f64) -> Option<f64> {
        let mut params = self.lock();
        let next = params.frequency_hz + delta;
        if next <= FREQUENCY_FLOOR_HZ || !next.is_finite() {
            return None;
        }
        params.frequency_hz = next;
        Some(next)
    }

    /// Add `delta` to the amplitude, clamped into [0, 1]. Returns the new amplitude.
    pub fn adjust_amplitude(&self, delta: f64) -> f64 {
        let mut params = self.lock();
        let next = (params.amplitude + delta).clamp(0.0, 1.0);
        if !next.is_nan() {
            params.amplitude = next;
        }
        params.amplitude
    }

    /// Overwrite every field at once. Intended for startup and shutdown.
    pub fn replace_all(&self, params: WaveParameters) {
        *self.lock() = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::waveform::WaveformKind;

    fn store_with(frequency_hz: f64, amplitude: f64) -> ParameterStore {
        ParameterStore::new(WaveParameters::new(WaveformKind::Sine, frequency_hz, amplitude, 100))
    }

    #[test]
    fn test_amplitude_never_exceeds_one() {
        let store = store_with(1.0, 0.98);
        for _ in 0..10 {
            let amplitude = store.adjust_amplitude(0.05);
            assert!(amplitude <= 1.0);
        }
        assert_eq!(store.snapshot().amplitude, 1.0);
    }

    #[test]
    fn test_amplitude_never_below_zero() {
        let store = store_with(1.0, 0.02);
        for _ in 0..10 {
            let amplitude = store.adjust_amplitude(-0.05);
            assert!(amplitude >= 0.0);
        }
        assert_eq!(store.snapshot().amplitude, 0.0);
    }

    #[test]
    fn test_amplitude_climbs_to_exactly_one() {
        let store = store_with(1.0, 0.0);
        for _ in 0..25 {
            store.adjust_amplitude(0.05);
        }
        assert_eq!(store.snapshot().amplitude, 1.0);
    }

    #[test]
    fn test_frequency_floor_rejects_large_drop() {
        let store = store_with(1.0, 0.5);
        assert_eq!(store.adjust_frequency(-100.0), None);
        assert_eq!(store.snapshot().frequency_hz, 1.0);
    }

    #[test]
    fn test_frequency_steps_down_to_floor() {
        let store = store_with(1.0, 0.5);
        let mut accepted = 0;
        for _ in 0..20 {
            if store.adjust_frequency(-0.1).is_some() {
                accepted += 1;
            }
            assert!(store.snapshot().frequency_hz > FREQUENCY_FLOOR_HZ);
        }
        assert!(accepted >= 8, "only {accepted} decrements applied");
    }

    #[test]
    fn test_frequency_increase() {
        let store = store_with(1.0, 0.5);
        let next = store.adjust_frequency(0.1).unwrap();
        assert!((next - 1.1).abs() < 1e-12);
        assert_eq!(store.snapshot().frequency_hz, next);
    }

    #[test]
    fn test_adjustments_leave_other_fields_alone() {
        let store = ParameterStore::new(WaveParameters::new(WaveformKind::Sawtooth, 3.0, 0.5, 42));
        store.adjust_frequency(0.1);
        store.adjust_amplitude(-0.05);
        let params = store.snapshot();
        assert_eq!(params.kind, WaveformKind::Sawtooth);
        assert_eq!(params.steps_per_cycle, 42);
    }

    #[test]
    fn test_replace_all() {
        let store = ParameterStore::default();
        let params = WaveParameters::new(WaveformKind::Square, 12.5, 0.25, 8);
        store.replace_all(params);
        assert_eq!(store.snapshot(), params);
    }
}
