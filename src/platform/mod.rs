//! Platform abstraction for sample output and adjustment input
//! The generation and adjustment loops only see these traits; terminals, files and
//! channels live behind them.
use crate::engine::AdjustmentEvent;
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Destination for quantized samples
pub trait SampleSink: Send {
    /// Consume one sample. May block briefly for back-pressure.
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error>;

    /// Called once when the generation loop exits
    fn flush(&mut self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

/// Non-blocking source of decoded adjustment events
pub trait EventSource: Send {
    /// Return the next pending event, or `None` when nothing is waiting
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error>;
}

impl SampleSink for Vec<u16> {
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error> {
        self.push(sample);
        Ok(())
    }
}

impl<S: SampleSink + ?Sized> SampleSink for Box<S> {
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error> {
        (**self).emit(sample)
    }

    fn flush(&mut self) -> Result<(), anyhow::Error> {
        (**self).flush()
    }
}

/// Scripted events, delivered front to back
impl EventSource for VecDeque<AdjustmentEvent> {
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
        Ok(self.pop_front())
    }
}

/// Events pushed from another thread. A hung-up sender counts as a quit request.
impl EventSource for Receiver<AdjustmentEvent> {
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
        match self.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Ok(Some(AdjustmentEvent::Quit)),
        }
    }
}

/// Source that never produces an event, for runs without an interactive terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleEvents;

impl EventSource for IdleEvents {
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
        Ok(None)
    }
}

impl<E: EventSource + ?Sized> EventSource for Box<E> {
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
        (**self).poll_event()
    }
}

pub mod stdout_sink;
pub use self::stdout_sink::StdoutSink;

#[cfg(feature = "bounce")]
pub mod wav_sink;
#[cfg(feature = "bounce")]
pub use self::wav_sink::WavSink;

#[cfg(feature = "crossterm")]
pub mod keyboard;
#[cfg(feature = "crossterm")]
pub use self::keyboard::KeyboardEvents;
