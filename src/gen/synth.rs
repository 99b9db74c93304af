//! Per-sample waveform evaluation
//!
//! Every shape is expressed as a function of the sample index within a cycle,
//! so a cycle can be rendered from a parameter snapshot alone.

use crate::gen::waveform::WaveformKind;
use std::f64::consts::PI;

/// Evaluate sample `i` of a `steps`-long cycle.
///
/// Output lies in `[0, amplitude]`. A `steps` of 0 is treated as 1, and a half
/// cycle of zero length (steps == 1) is treated as one sample long.
pub fn evaluate(kind: WaveformKind, i: u32, steps: u32, amplitude: f64) -> f64 {
    let steps = steps.max(1);
    match kind {
        WaveformKind::Sine | WaveformKind::Arbitrary => sine(i, steps, amplitude),
        WaveformKind::Square => square(i, steps, amplitude),
        WaveformKind::Triangular => triangular(i, steps, amplitude),
        WaveformKind::Sawtooth => sawtooth(i, steps, amplitude),
    }
}

fn sine(i: u32, steps: u32, amplitude: f64) -> f64 {
    let angle = 2.0 * PI * f64::from(i) / f64::from(steps);
    // Shift [-1, 1] into [0, 1]
    ((angle.sin() + 1.0) / 2.0) * amplitude
}

fn square(i: u32, steps: u32, amplitude: f64) -> f64 {
    if i < steps / 2 {
        0.0
    } else {
        amplitude
    }
}

fn triangular(i: u32, steps: u32, amplitude: f64) -> f64 {
    let half = steps / 2;
    let half_len = f64::from(half.max(1));
    let value = if i < half {
        f64::from(i) / half_len * amplitude
    } else {
        f64::from(steps.saturating_sub(i)) / half_len * amplitude
    };
    // Odd step counts overshoot by one sample on the falling half
    value.min(amplitude)
}

fn sawtooth(i: u32, steps: u32, amplitude: f64) -> f64 {
    f64::from(i) / f64::from(steps) * amplitude
}
