pub mod quantize;
pub mod synth;
pub mod waveform;

pub use self::quantize::*;
pub use self::synth::*;
pub use self::waveform::*;
