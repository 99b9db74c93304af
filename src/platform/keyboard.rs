use super::EventSource;
use crate::engine::AdjustmentEvent;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::time::Duration;

/// Arrow-key control of a running generator.
///
/// Raw mode is entered on construction and left again on drop. Because raw mode
/// swallows SIGINT, Ctrl+C arrives here as a key and is decoded as a quit request.
pub struct KeyboardEvents {
    _private: (),
}

impl KeyboardEvents {
    pub fn new() -> Result<Self, anyhow::Error> {
        print!("Keyboard control active.\r\n");
        print!("Use arrow keys to adjust parameters:\r\n");
        print!("   Up/Down: Increase/Decrease Frequency\r\n");
        print!("   Right/Left: Increase/Decrease Amplitude\r\n");
        print!("Press 'q' to quit.\r\n");
        enable_raw_mode().context("failed to enter raw terminal mode")?;
        Ok(Self { _private: () })
    }
}

impl Drop for KeyboardEvents {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {}", e);
        }
    }
}

impl EventSource for KeyboardEvents {
    fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
        // Drain whatever is pending but hand back at most one recognized event
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(adjustment) = decode_key(key) {
                    return Ok(Some(adjustment));
                }
            }
        }
        Ok(None)
    }
}

/// Map a key press onto an adjustment. Releases and unbound keys yield `None`.
pub fn decode_key(key: KeyEvent) -> Option<AdjustmentEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(AdjustmentEvent::IncreaseFrequency),
        KeyCode::Down => Some(AdjustmentEvent::DecreaseFrequency),
        KeyCode::Right => Some(AdjustmentEvent::IncreaseAmplitude),
        KeyCode::Left => Some(AdjustmentEvent::DecreaseAmplitude),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AdjustmentEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(AdjustmentEvent::Quit),
        _ => None,
    }
}
