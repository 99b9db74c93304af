use hound::{SampleFormat, WavSpec, WavWriter};

use super::SampleSink;
use anyhow::Context;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Bounces generated samples into a 16-bit mono WAV file
pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
}

impl WavSink {
    /// Create the file. `sample_rate` is the nominal rate written into the header.
    pub fn create(path: impl AsRef<Path>, sample_rate: u32) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let spec = WavSpec {
            channels: 1,
            sample_rate: sample_rate.max(1),
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self {
            writer: Some(writer),
        })
    }

    /// Offset-binary sample to signed PCM
    pub fn to_pcm(sample: u16) -> i16 {
        (i32::from(sample) - 32768) as i16
    }
}

impl SampleSink for WavSink {
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("WAV file already finalized"))?;
        writer.write_sample(Self::to_pcm(sample))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), anyhow::Error> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().context("failed to finalize WAV file")?;
        }
        Ok(())
    }
}
