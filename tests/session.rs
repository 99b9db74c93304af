// Integration tests for the two-thread session and the store's concurrency contract

use std::collections::VecDeque;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use wavegen::engine::{
    AdjustmentEvent, ParameterStore, Session, StopSignal, WaveParameters, FREQUENCY_FLOOR_HZ,
};
use wavegen::gen::WaveformKind;
use wavegen::platform::{EventSource, SampleSink};

// Records each sample together with whether the stop flag was already raised
struct ObservingSink {
    stop: StopSignal,
    log: Arc<Mutex<Vec<(u16, bool)>>>,
}

impl SampleSink for ObservingSink {
    fn emit(&mut self, sample: u16) -> Result<(), anyhow::Error> {
        self.log.lock().unwrap().push((sample, self.stop.is_stopped()));
        Ok(())
    }
}

#[test]
fn test_snapshots_are_never_torn() {
    let a = WaveParameters::new(WaveformKind::Sine, 2.0, 0.2, 10);
    let b = WaveParameters::new(WaveformKind::Square, 500.0, 0.9, 4000);
    let store = Arc::new(ParameterStore::new(a));

    let writer_store = store.clone();
    let writer = thread::spawn(move || {
        for i in 0..20_000 {
            writer_store.replace_all(if i % 2 == 0 { b } else { a });
        }
    });

    let reader_store = store.clone();
    let reader = thread::spawn(move || {
        for _ in 0..20_000 {
            let snapshot = reader_store.snapshot();
            assert!(snapshot == a || snapshot == b, "torn snapshot: {:?}", snapshot);
        }
    });

    writer.join().unwrap();
    reader.join().unwrap();
}

#[test]
fn test_concurrent_adjustments_keep_invariants() {
    let store = Arc::new(ParameterStore::new(WaveParameters::new(WaveformKind::Sine, 0.5, 0.5, 10)));

    let adjusters: Vec<_> = (0..4)
        .map(|n| {
            let store = store.clone();
            thread::spawn(move || {
                let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
                for _ in 0..5_000 {
                    store.adjust_amplitude(0.05 * sign);
                    store.adjust_frequency(-0.1 * sign);
                }
            })
        })
        .collect();

    for _ in 0..5_000 {
        let snapshot = store.snapshot();
        assert!((0.0..=1.0).contains(&snapshot.amplitude));
        assert!(snapshot.frequency_hz > FREQUENCY_FLOOR_HZ);
        assert_eq!(snapshot.steps_per_cycle, 10);
    }

    for handle in adjusters {
        handle.join().unwrap();
    }
}

#[test]
fn test_amplitude_climbs_to_exactly_one() {
    let mut events: VecDeque<AdjustmentEvent> =
        std::iter::repeat(AdjustmentEvent::IncreaseAmplitude).take(25).collect();
    events.push_back(AdjustmentEvent::Quit);

    let params = WaveParameters::new(WaveformKind::Sine, 1000.0, 0.0, 10);
    let report = Session::new(params)
        .with_poll_interval(Duration::ZERO)
        .run(Vec::<u16>::new(), events)
        .unwrap();

    assert_eq!(report.final_params.amplitude, 1.0);
    assert_eq!(report.events_handled, 26);
}

#[test]
fn test_quit_stops_generation_promptly() {
    let stop = StopSignal::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = ObservingSink {
        stop: stop.clone(),
        log: log.clone(),
    };
    let (tx, rx) = channel();

    let session = Session::new(WaveParameters::new(WaveformKind::Sawtooth, 200.0, 1.0, 10))
        .with_stop_signal(stop.clone());
    let runner = thread::spawn(move || session.run(sink, rx));

    thread::sleep(Duration::from_millis(50));
    tx.send(AdjustmentEvent::Quit).unwrap();
    let report = runner.join().unwrap().unwrap();

    let log = log.lock().unwrap();
    let after_stop = log.iter().filter(|(_, stopped)| *stopped).count();
    assert!(after_stop <= 1, "{} samples emitted after quit", after_stop);
    assert_eq!(report.samples_emitted as usize, log.len());
    assert!(stop.is_stopped());
}

#[test]
fn test_adjustments_reach_final_params() {
    let (tx, rx) = channel();
    let session = Session::new(WaveParameters::new(WaveformKind::Triangular, 1000.0, 0.5, 8))
        .with_poll_interval(Duration::from_millis(1));
    let store = session.store();
    let runner = thread::spawn(move || session.run(Vec::<u16>::new(), rx));

    for event in [
        AdjustmentEvent::IncreaseFrequency,
        AdjustmentEvent::IncreaseFrequency,
        AdjustmentEvent::DecreaseAmplitude,
        AdjustmentEvent::Quit,
    ] {
        tx.send(event).unwrap();
    }
    let report = runner.join().unwrap().unwrap();

    assert!((report.final_params.frequency_hz - 1000.2).abs() < 1e-9);
    assert!((report.final_params.amplitude - 0.45).abs() < 1e-9);
    assert_eq!(report.final_params.kind, WaveformKind::Triangular);
    assert_eq!(store.snapshot(), report.final_params);
    assert!(report.samples_emitted > 0);
}

#[test]
fn test_cycle_limit_ends_session() {
    // Keep the sender alive so only the cycle limit can end the session
    let (_tx, rx) = channel::<AdjustmentEvent>();
    let report = Session::new(WaveParameters::new(WaveformKind::Square, 1000.0, 1.0, 4))
        .with_max_cycles(Some(2))
        .run(Vec::<u16>::new(), rx)
        .unwrap();

    assert_eq!(report.samples_emitted, 8);
    assert_eq!(report.events_handled, 0);
}

#[test]
fn test_external_stop_signal_ends_session() {
    let (_tx, rx) = channel::<AdjustmentEvent>();
    let session = Session::new(WaveParameters::default());
    let stop = session.stop_signal();
    let runner = thread::spawn(move || session.run(Vec::<u16>::new(), rx));

    thread::sleep(Duration::from_millis(30));
    stop.stop();
    let report = runner.join().unwrap().unwrap();
    assert_eq!(report.final_params, WaveParameters::default());
}

#[test]
fn test_sink_error_is_reported_after_join() {
    struct BrokenSink;
    impl SampleSink for BrokenSink {
        fn emit(&mut self, _sample: u16) -> Result<(), anyhow::Error> {
            anyhow::bail!("broken pipe")
        }
    }

    let (_tx, rx) = channel::<AdjustmentEvent>();
    let err = Session::new(WaveParameters::default())
        .run(BrokenSink, rx)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("broken pipe"));
}

#[test]
fn test_both_loop_failures_are_reported() {
    // Fails only once the adjuster has already failed and raised the stop flag
    struct LateBrokenSink {
        stop: StopSignal,
    }
    impl SampleSink for LateBrokenSink {
        fn emit(&mut self, _sample: u16) -> Result<(), anyhow::Error> {
            while self.stop.is_running() {
                thread::sleep(Duration::from_millis(1));
            }
            anyhow::bail!("broken pipe")
        }
    }

    struct LostTerminal;
    impl EventSource for LostTerminal {
        fn poll_event(&mut self) -> Result<Option<AdjustmentEvent>, anyhow::Error> {
            anyhow::bail!("terminal closed")
        }
    }

    let session = Session::new(WaveParameters::new(WaveformKind::Sine, 1000.0, 1.0, 10));
    let sink = LateBrokenSink {
        stop: session.stop_signal(),
    };
    let err = session.run(sink, LostTerminal).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("broken pipe"), "{}", message);
    assert!(message.contains("terminal closed"), "{}", message);
}
