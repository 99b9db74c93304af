use super::params::WaveParameters;
use super::stop::StopSignal;
use super::store::ParameterStore;
use crate::gen::{evaluate, quantize};
use crate::platform::SampleSink;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Longest uninterrupted sleep, so a stop request is seen during slow cycles
const MAX_SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Time between consecutive samples: one period split into `steps` slices.
///
/// Non-positive or non-finite frequencies and zero steps give `Duration::ZERO`.
pub fn inter_sample_delay(frequency_hz: f64, steps: u32) -> Duration {
    if steps == 0 || !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Duration::ZERO;
    }
    let period = 1.0 / frequency_hz;
    Duration::try_from_secs_f64(period / f64::from(steps)).unwrap_or(Duration::ZERO)
}

/// One full cycle of quantized samples for the given parameters
pub fn cycle_samples(params: WaveParameters) -> impl Iterator<Item = u16> {
    let steps = params.steps_per_cycle.max(1);
    (0..steps).map(move |i| quantize(evaluate(params.kind, i, steps, params.amplitude)))
}

/// Drives the sink one cycle at a time.
///
/// Parameters are snapshotted once at the start of each cycle, so adjustments
/// made mid-cycle take effect at the next cycle boundary. The stop signal is
/// checked before every cycle and before every sample.
pub struct GenerationLoop<S: SampleSink> {
    store: Arc<ParameterStore>,
    stop: StopSignal,
    sink: S,
    max_cycles: Option<u64>,
}

impl<S: SampleSink> GenerationLoop<S> {
    pub fn new(store: Arc<ParameterStore>, stop: StopSignal, sink: S) -> Self {
        Self {
            store,
            stop,
            sink,
            max_cycles: None,
        }
    }

    /// Stop (and raise the stop signal) after this many complete cycles
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Generate until stopped. Returns the number of samples emitted.
    ///
    /// A sink failure raises the stop signal before the error is returned.
    pub fn run(&mut self) -> Result<u64, anyhow::Error> {
        log::debug!("generation loop started");
        let result = self.generate();
        if result.is_err() {
            self.stop.stop();
        }
        let flushed = self.sink.flush();
        let emitted = result?;
        flushed?;
        log::debug!("generation loop stopped after {} samples", emitted);
        Ok(emitted)
    }

    fn generate(&mut self) -> Result<u64, anyhow::Error> {
        let mut emitted = 0;
        let mut cycles = 0;

        while self.stop.is_running() {
            if self.max_cycles.is_some_and(|max| cycles >= max) {
                log::info!("Completed {} cycles", cycles);
                self.stop.stop();
                break;
            }

            let params = self.store.snapshot();
            let delay = inter_sample_delay(params.frequency_hz, params.steps_per_cycle);

            for sample in cycle_samples(params) {
                if self.stop.is_stopped() {
                    return Ok(emitted);
                }
                self.sink.emit(sample)?;
                emitted += 1;
                self.pause(delay);
            }
            cycles += 1;
        }

        Ok(emitted)
    }

    fn pause(&self, delay: Duration) {
        let mut remaining = delay;
        while !remaining.is_zero() && self.stop.is_running() {
            let slice = remaining.min(MAX_SLEEP_SLICE);
            thread::sleep(slice);
            remaining -= slice;
        }
    }
}
