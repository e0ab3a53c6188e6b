// Integration tests for the neutral conductor current

use triphase::engine::{combine, Engine, Event, Phase};
use triphase::grid::FUNDAMENTAL_HZ;

#[test]
fn test_neutral_is_sum_of_phase_totals() {
    let mut engine = Engine::new();
    engine.handle(Event::generate(Phase::A, 1, 1.0, 0.0));
    engine.handle(Event::generate(Phase::A, 5, 0.2, 33.0));
    engine.handle(Event::generate(Phase::B, 3, 0.7, 140.0));
    let frame = engine.handle(Event::generate(Phase::C, 2, -0.4, 260.0));

    let a = frame.phase(Phase::A).values();
    let b = frame.phase(Phase::B).values();
    let c = frame.phase(Phase::C).values();
    let neutral = frame.neutral.values();

    assert_eq!(neutral.len(), engine.grid().len());
    for i in 0..neutral.len() {
        assert_eq!(neutral[i], a[i] + b[i] + c[i], "sample {}", i);
    }
    assert_eq!(engine.neutral(), neutral);
}

#[test]
fn test_empty_phases_count_as_zero() {
    let mut engine = Engine::new();
    let frame = engine.handle(Event::generate(Phase::B, 3, 0.5, 0.0));

    assert_eq!(frame.neutral.values(), frame.phase(Phase::B).values());
    assert_eq!(
        combine(
            &engine.phase_total(Phase::A),
            &engine.phase_total(Phase::B),
            &engine.phase_total(Phase::C)
        ),
        frame.neutral.values()
    );
}

#[test]
fn test_balanced_fundamental_cancels_in_neutral() {
    let mut engine = Engine::new();
    engine.handle(Event::generate(Phase::A, 1, 1.0, 0.0));
    engine.handle(Event::generate(Phase::B, 1, 1.0, 120.0));
    let frame = engine.handle(Event::generate(Phase::C, 1, 1.0, 240.0));

    for (i, value) in frame.neutral.values().iter().enumerate() {
        assert!(value.abs() < 1e-9, "sample {}: {}", i, value);
    }
}

#[test]
fn test_balanced_third_harmonic_triples_in_neutral() {
    let mut engine = Engine::new();
    for (phase, shift) in [(Phase::A, 0.0), (Phase::B, 120.0), (Phase::C, 240.0)] {
        engine.handle(Event::generate(phase, 3, 0.5, shift));
    }
    let frame = engine.frame();

    let omega = 2.0 * std::f64::consts::PI * FUNDAMENTAL_HZ;
    for (&(_, value), &t) in frame.neutral.points.iter().zip(engine.grid().times()) {
        let expected = 1.5 * (3.0 * omega * t).cos();
        assert!((value - expected).abs() < 1e-9);
    }
}

#[test]
fn test_restart_zeroes_every_trace() {
    let mut engine = Engine::new();
    engine.handle(Event::generate(Phase::A, 1, 1.0, 0.0));
    engine.handle(Event::generate(Phase::C, 3, 1.0, 0.0));

    let frame = engine.handle(Event::Restart);
    for trace in frame.traces() {
        assert_eq!(trace.len(), engine.grid().len());
        assert!(trace.values().iter().all(|&v| v == 0.0), "{}", trace.title);
    }
    assert!(Phase::ALL.iter().all(|&p| engine.phase(p).is_empty()));
}

#[test]
fn test_frame_axis_is_electrical_angle() {
    let engine = Engine::new();
    let frame = engine.frame();

    let angles = frame.neutral.angles();
    assert_eq!(angles[0], 0.0);
    assert!((angles[250] - 90.0).abs() < 1e-9);
    assert!(*angles.last().unwrap() < 360.0);
    assert_eq!(frame.phase(Phase::B).angles(), angles);
}
