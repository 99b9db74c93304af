use super::SampleSink;
use anyhow::Context;
use std::io::{self, Write};

/// Writes each sample as a hex line, the way a D/A port would be traced.
///
/// Lines end in `\r\n` so they stay aligned while the terminal is in raw mode.
pub struct StdoutSink<W: Write = io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SampleSink for StdoutSink<W> {
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error> {
        write!(self.out, "Output: 0x{:04X}\r\n", sample).context("failed to write sample")?;
        self.out.flush().context("failed to flush sample output")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), anyhow::Error> {
        self.out.flush()?;
        Ok(())
    }
}
