use super::stop::StopSignal;
use super::store::ParameterStore;
use crate::platform::EventSource;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const FREQUENCY_STEP_HZ: f64 = 0.1;
pub const AMPLITUDE_STEP: f64 = 0.05;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Decoded operator intent, independent of the device that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentEvent {
    IncreaseFrequency,
    DecreaseFrequency,
    IncreaseAmplitude,
    DecreaseAmplitude,
    Quit,
}

/// Applies adjustment events to the store while generation runs.
///
/// Each wake-up handles at most one event and then sleeps for the poll interval.
pub struct AdjustmentLoop<E: EventSource> {
    store: Arc<ParameterStore>,
    stop: StopSignal,
    events: E,
    poll_interval: Duration,
}

impl<E: EventSource> AdjustmentLoop<E> {
    pub fn new(store: Arc<ParameterStore>, stop: StopSignal, events: E) -> Self {
        Self {
            store,
            stop,
            events,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Poll until stopped or a quit event arrives. Returns the number of events handled.
    pub fn run(&mut self) -> Result<u64, anyhow::Error> {
        let mut handled = 0;

        while self.stop.is_running() {
            match self.events.poll_event() {
                Ok(Some(event)) => {
                    handled += 1;
                    self.apply(event);
                    if event == AdjustmentEvent::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    self.stop.stop();
                    return Err(e.context("failed to read adjustment input"));
                }
            }
            thread::sleep(self.poll_interval);
        }

        log::debug!("adjustment loop stopped after {} events", handled);
        Ok(handled)
    }

    /// Apply a single event to the store
    pub fn apply(&self, event: AdjustmentEvent) {
        match event {
            AdjustmentEvent::IncreaseFrequency => match self.store.adjust_frequency(FREQUENCY_STEP_HZ) {
                Some(frequency) => log::info!("Frequency increased to {:.2} Hz", frequency),
                None => log::debug!("frequency increase rejected"),
            },
            AdjustmentEvent::DecreaseFrequency => match self.store.adjust_frequency(-FREQUENCY_STEP_HZ) {
                Some(frequency) => log::info!("Frequency decreased to {:.2} Hz", frequency),
                None => log::debug!("frequency already at the {} Hz floor", super::FREQUENCY_FLOOR_HZ),
            },
            AdjustmentEvent::IncreaseAmplitude => {
                let amplitude = self.store.adjust_amplitude(AMPLITUDE_STEP);
                log::info!("Amplitude increased to {:.2}", amplitude);
            }
            AdjustmentEvent::DecreaseAmplitude => {
                let amplitude = self.store.adjust_amplitude(-AMPLITUDE_STEP);
                log::info!("Amplitude decreased to {:.2}", amplitude);
            }
            AdjustmentEvent::Quit => {
                log::info!("Quit requested");
                self.stop.stop();
            }
        }
    }
}
