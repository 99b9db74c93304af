//! Process-level wiring: configuration, command line, sinks and the session

use crate::cli::Cli;
use crate::config;
use crate::engine::{Session, SessionReport, WaveParameters};
use crate::platform::{EventSource, IdleEvents, SampleSink, StdoutSink};

/// Defaults, then the saved record, then command-line overrides
pub fn resolve_parameters(cli: &Cli) -> WaveParameters {
    let mut params = config::load(&cli.config).unwrap_or_default();
    cli.apply_overrides(&mut params);
    params
}

pub fn print_settings(params: &WaveParameters) {
    println!("Waveform Generator Starting with Settings:");
    println!("Waveform: {}", params.kind);
    println!("Frequency: {:.2} Hz", params.frequency_hz);
    println!("Amplitude: {:.2}", params.amplitude);
    println!("Steps per cycle: {}", params.steps_per_cycle);
}

/// Nominal sample rate of the starting parameters, used for file headers
pub fn nominal_sample_rate(params: &WaveParameters) -> u32 {
    let rate = (params.frequency_hz * f64::from(params.steps_per_cycle)).round();
    rate.clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Pick the sample destination requested on the command line
pub fn open_sink(cli: &Cli, params: &WaveParameters) -> Result<Box<dyn SampleSink>, anyhow::Error> {
    match open_wav_sink(cli, params)? {
        Some(sink) => Ok(sink),
        None => Ok(Box::new(StdoutSink::new())),
    }
}

#[cfg(feature = "bounce")]
fn open_wav_sink(cli: &Cli, params: &WaveParameters) -> Result<Option<Box<dyn SampleSink>>, anyhow::Error> {
    let Some(path) = &cli.wav else {
        return Ok(None);
    };
    let rate = nominal_sample_rate(params);
    log::info!("Bouncing to {} at {} Hz", path.display(), rate);
    Ok(Some(Box::new(crate::platform::WavSink::create(path, rate)?)))
}

#[cfg(not(feature = "bounce"))]
fn open_wav_sink(_cli: &Cli, _params: &WaveParameters) -> Result<Option<Box<dyn SampleSink>>, anyhow::Error> {
    Ok(None)
}

/// Use the interactive source when it opened, otherwise run without adjustments
pub fn events_or_idle<E>(source: Result<E, anyhow::Error>) -> Box<dyn EventSource>
where
    E: EventSource + 'static,
{
    match source {
        Ok(events) => Box::new(events),
        Err(e) => {
            log::warn!("{:#}. Running without keyboard control.", e);
            Box::new(IdleEvents)
        }
    }
}

/// Run one session to completion and save the final parameters
pub fn run_session(
    cli: &Cli,
    params: WaveParameters,
    sink: Box<dyn SampleSink>,
    events: Box<dyn EventSource>,
) -> Result<SessionReport, anyhow::Error> {
    let session = Session::new(params).with_max_cycles(cli.cycles);
    let store = session.store();

    let outcome = session.run(sink, events);

    // Both loops are joined by now, whatever the outcome
    if !cli.no_save {
        if let Err(e) = config::save(&cli.config, &store.snapshot()) {
            log::warn!("{:#}", e);
        }
    }

    outcome
}

/// Run the generator with keyboard control until the operator quits
#[cfg(feature = "crossterm")]
pub fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    use crate::platform::KeyboardEvents;

    let params = resolve_parameters(cli);
    print_settings(&params);

    let events = events_or_idle(KeyboardEvents::new());
    let sink = open_sink(cli, &params)?;

    let report = run_session(cli, params, sink, events)?;
    log::info!(
        "Generated {} samples, handled {} adjustments",
        report.samples_emitted,
        report.events_handled
    );
    println!("Waveform generator terminated gracefully.");
    Ok(())
}
