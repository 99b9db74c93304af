use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Shape of the generated cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveformKind {
    #[default]
    Sine,
    Square,
    Triangular,
    Sawtooth,
    /// Sample-table playback is not implemented; renders as sine.
    Arbitrary,
}

impl WaveformKind {
    pub const ALL: [WaveformKind; 5] = [
        WaveformKind::Sine,
        WaveformKind::Square,
        WaveformKind::Triangular,
        WaveformKind::Sawtooth,
        WaveformKind::Arbitrary,
    ];

    /// Parse a lowercase waveform name. Unknown names fall back to sine.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sine" => WaveformKind::Sine,
            "square" => WaveformKind::Square,
            "triangular" => WaveformKind::Triangular,
            "sawtooth" => WaveformKind::Sawtooth,
            "arbitrary" => WaveformKind::Arbitrary,
            _ => WaveformKind::Sine,
        }
    }

    /// Name used in the configuration record and on the command line
    pub fn name(self) -> &'static str {
        match self {
            WaveformKind::Sine => "sine",
            WaveformKind::Square => "square",
            WaveformKind::Triangular => "triangular",
            WaveformKind::Sawtooth => "sawtooth",
            WaveformKind::Arbitrary => "arbitrary",
        }
    }
}

impl FromStr for WaveformKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WaveformKind::Sine => "Sine",
            WaveformKind::Square => "Square",
            WaveformKind::Triangular => "Triangular",
            WaveformKind::Sawtooth => "Sawtooth",
            WaveformKind::Arbitrary => "Arbitrary",
        };
        f.write_str(label)
    }
}
