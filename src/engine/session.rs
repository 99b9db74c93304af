use super::adjust::{AdjustmentLoop, DEFAULT_POLL_INTERVAL};
use super::generator::GenerationLoop;
use super::params::WaveParameters;
use super::stop::StopSignal;
use super::store::ParameterStore;
use crate::platform::{EventSource, SampleSink};
use anyhow::Context;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    /// Parameters read back after both loops were joined
    pub final_params: WaveParameters,
    pub samples_emitted: u64,
    pub events_handled: u64,
}

/// Runs the generation and adjustment loops on their own threads.
///
/// Both threads share one [`ParameterStore`] and one [`StopSignal`]. Either loop
/// raises the signal when it exits for any reason, so the other follows.
pub struct Session {
    store: Arc<ParameterStore>,
    stop: StopSignal,
    max_cycles: Option<u64>,
    poll_interval: Duration,
}

impl Session {
    pub fn new(params: WaveParameters) -> Self {
        Self {
            store: Arc::new(ParameterStore::new(params)),
            stop: StopSignal::new(),
            max_cycles: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Use an externally owned stop signal, e.g. one wired to an interrupt handler
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn store(&self) -> Arc<ParameterStore> {
        self.store.clone()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run both loops to completion.
    ///
    /// Returns only after both threads have terminated. Failing to start either
    /// thread is fatal. Loop errors are reported after joining; when both loops
    /// fail the adjuster's error is attached to the generator's.
    pub fn run<S, E>(self, sink: S, events: E) -> Result<SessionReport, anyhow::Error>
    where
        S: SampleSink + 'static,
        E: EventSource + 'static,
    {
        let mut generator = GenerationLoop::new(self.store.clone(), self.stop.clone(), sink)
            .with_max_cycles(self.max_cycles);
        let mut adjuster = AdjustmentLoop::new(self.store.clone(), self.stop.clone(), events)
            .with_poll_interval(self.poll_interval);

        let guard = self.stop.clone();
        let generator_handle = thread::Builder::new()
            .name("generator".into())
            .spawn(move || {
                let _stop = guard.stop_on_drop();
                generator.run()
            })
            .context("failed to spawn generator thread")?;

        let guard = self.stop.clone();
        let adjuster_handle = thread::Builder::new()
            .name("adjuster".into())
            .spawn(move || {
                let _stop = guard.stop_on_drop();
                adjuster.run()
            });
        let adjuster_handle = match adjuster_handle {
            Ok(handle) => handle,
            Err(e) => {
                self.stop.stop();
                if let Err(generator_error) = join_loop(generator_handle, "generator") {
                    log::warn!("{:#}", generator_error);
                }
                return Err(e).context("failed to spawn adjustment thread");
            }
        };

        let generated = join_loop(generator_handle, "generator");
        let adjusted = join_loop(adjuster_handle, "adjuster");

        let (samples_emitted, events_handled) = combine_outcomes(generated, adjusted)?;
        let report = SessionReport {
            final_params: self.store.snapshot(),
            samples_emitted,
            events_handled,
        };
        log::debug!(
            "session finished: {} samples, {} events",
            report.samples_emitted,
            report.events_handled
        );
        Ok(report)
    }
}

fn join_loop(handle: JoinHandle<Result<u64, anyhow::Error>>, name: &str) -> Result<u64, anyhow::Error> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("{} thread panicked", name))?
        .with_context(|| format!("{} loop failed", name))
}

fn combine_outcomes(
    generated: Result<u64, anyhow::Error>,
    adjusted: Result<u64, anyhow::Error>,
) -> Result<(u64, u64), anyhow::Error> {
    match (generated, adjusted) {
        (Ok(samples), Ok(events)) => Ok((samples, events)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(generator), Err(adjuster)) => {
            Err(generator.context(format!("adjuster also failed: {:#}", adjuster)))
        }
    }
}
