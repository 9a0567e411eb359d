//! Integration tests for tactus-core.
//!
//! These drive the public engine API through complete gestures.

use proptest::prelude::*;
use tactus_core::{
    Direction, ElementId, GestureConfig, GestureEngine, GestureEvent, GestureKind, GestureType,
    MotionInput, PinchPhase, Point, PointerId, Target,
};
use tracing_subscriber::EnvFilter;

const ELEMENT: ElementId = ElementId(42);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine(gestures: &[GestureType]) -> GestureEngine {
    init_tracing();
    let mut engine = GestureEngine::new();
    engine
        .bind(ELEMENT, GestureConfig::default())
        .expect("default config is valid");
    for gesture in gestures {
        engine.subscribe(ELEMENT, *gesture, "integration");
    }
    engine
}

fn sample(pointer: PointerId, x: f32, y: f32, t: u64) -> MotionInput {
    MotionInput::new(pointer, Target::generic(ELEMENT), Point::new(x, y), t)
}

fn kinds(events: &[GestureEvent]) -> Vec<GestureKind> {
    events.iter().map(|e| e.kind).collect()
}

// =============================================================================
// Single pointer
// =============================================================================

#[test]
fn test_tap_then_hold_on_separate_presses() {
    let mut engine = engine(&[GestureType::Tap, GestureType::Hold]);
    let finger = PointerId::Touch(0);

    engine.on_start(ELEMENT, &sample(finger, 50.0, 50.0, 0));
    let tap = engine.on_end(&sample(finger, 51.0, 50.0, 120));
    assert_eq!(kinds(&tap), vec![GestureKind::Tap]);
    assert_eq!(tap[0].element(), ELEMENT);

    engine.on_start(ELEMENT, &sample(finger, 50.0, 50.0, 1_000));
    engine.on_move(&sample(finger, 51.0, 51.0, 1_100));
    let deadline = engine.next_deadline().expect("hold scheduled");
    let hold = engine.advance(deadline);
    assert_eq!(kinds(&hold), vec![GestureKind::Hold]);
    assert_eq!(hold[0].session.end, Some(Point::new(50.0, 50.0)));
    assert!(engine.on_end(&sample(finger, 51.0, 51.0, 1_500)).is_empty());
}

#[test]
fn test_hold_disabled_after_tap_time() {
    let config = GestureConfig {
        tap_time_ms: 100,
        held_tap_time_ms: 400,
        ..Default::default()
    };
    let mut engine = GestureEngine::new();
    engine.bind(ELEMENT, config).expect("valid config");
    engine.subscribe(ELEMENT, GestureType::Hold, "");

    let finger = PointerId::Touch(3);
    engine.on_start(ELEMENT, &sample(finger, 0.0, 0.0, 0));
    engine.on_move(&sample(finger, 0.0, 0.0, 150));
    assert!(engine.advance(400).is_empty());
}

#[test]
fn test_fling_payload_carries_session() {
    let mut engine = engine(&[GestureType::FlingLeft]);
    let mouse = PointerId::Mouse(0);
    engine.on_start(ELEMENT, &sample(mouse, 300.0, 100.0, 0));
    let events = engine.on_move(&sample(mouse, 200.0, 95.0, 50));
    assert_eq!(
        kinds(&events),
        vec![GestureKind::Fling {
            direction: Direction::Left
        }]
    );
    let session = &events[0].session;
    assert_eq!(session.start, Point::new(300.0, 100.0));
    assert_eq!(session.current, Point::new(200.0, 95.0));
    assert_eq!(session.delta, Point::new(-100.0, -5.0));
    assert_eq!(session.elapsed_ms, 50);
}

#[test]
fn test_unsubscribed_swipe_is_silent() {
    let mut engine = engine(&[GestureType::Tap, GestureType::SwipeUp]);
    engine.unsubscribe(ELEMENT, GestureType::SwipeUp, Some("integration"));
    let finger = PointerId::Touch(1);
    engine.on_start(ELEMENT, &sample(finger, 0.0, 200.0, 0));
    assert!(engine.on_move(&sample(finger, 0.0, 0.0, 100)).is_empty());
    assert!(engine.on_end(&sample(finger, 0.0, 0.0, 150)).is_empty());
}

// =============================================================================
// Pinch
// =============================================================================

#[test]
fn test_pinch_sequence_with_promotion() {
    let mut engine = engine(&[GestureType::Pinch]);
    let a = PointerId::Touch(10);
    let b = PointerId::Touch(11);
    let c = PointerId::Touch(12);

    assert!(engine.on_start(ELEMENT, &sample(a, 0.0, 0.0, 0)).is_empty());
    let start = engine.on_start(ELEMENT, &sample(b, 30.0, 40.0, 5));
    assert_eq!(
        kinds(&start),
        vec![GestureKind::Pinch {
            phase: PinchPhase::Start
        }]
    );

    engine.on_move(&sample(b, 30.0, 40.0, 10));
    let grow = engine.on_move(&sample(b, 60.0, 80.0, 20));
    assert_eq!(grow[0].pinch_delta(), 200.0);

    let end = engine.on_end(&sample(a, 0.0, 0.0, 30));
    assert_eq!(
        kinds(&end),
        vec![GestureKind::Pinch {
            phase: PinchPhase::End
        }]
    );

    let restart = engine.on_start(ELEMENT, &sample(c, 0.0, 0.0, 40));
    assert_eq!(restart.len(), 1);
    assert_eq!(engine.pinch().primary(), Some(b));
    assert_eq!(engine.pinch().secondary(), Some(c));
}

#[test]
fn test_pinch_is_shared_across_elements() {
    let other = ElementId(7);
    let mut engine = engine(&[GestureType::PinchStart]);
    engine.subscribe(other, GestureType::PinchStart, "");

    engine.on_start(ELEMENT, &sample(PointerId::Touch(0), 0.0, 0.0, 0));
    let events = engine.on_start(
        other,
        &MotionInput::new(PointerId::Touch(1), Target::generic(other), Point::new(5.0, 0.0), 0),
    );
    assert_eq!(kinds(&events), vec![GestureKind::PinchStart]);
    assert_eq!(events[0].element(), other);
}

#[test]
fn test_release_after_unsubscribing_everything() {
    let mut engine = engine(&[GestureType::Tap]);
    assert!(!engine.release(ELEMENT));
    engine.unsubscribe(ELEMENT, GestureType::Tap, None);
    assert!(engine.is_empty(ELEMENT));
    assert!(engine.release(ELEMENT));

    engine.on_start(ELEMENT, &sample(PointerId::Touch(0), 0.0, 0.0, 0));
    assert_eq!(engine.session_count(), 0);
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Debug, Clone)]
enum Step {
    Start(u32, f32, f32),
    Move(u32, f32, f32),
    End(u32),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u32..3, -200.0f32..200.0, -200.0f32..200.0).prop_map(|(p, x, y)| Step::Start(p, x, y)),
        (0u32..3, -200.0f32..200.0, -200.0f32..200.0).prop_map(|(p, x, y)| Step::Move(p, x, y)),
        (0u32..3).prop_map(Step::End),
    ]
}

proptest! {
    #[test]
    fn prop_at_most_one_swipe_per_session(steps in prop::collection::vec(step_strategy(), 1..60)) {
        let mut engine = GestureEngine::new();
        engine.bind(ELEMENT, GestureConfig::default()).expect("valid config");
        for gesture in GestureType::SWIPES {
            engine.subscribe(ELEMENT, gesture, "");
        }
        engine.subscribe(ELEMENT, GestureType::Tap, "");
        engine.subscribe(ELEMENT, GestureType::Pinch, "");

        let mut swipes_in_session = [0u32; 3];
        for (t, step) in steps.into_iter().enumerate() {
            let t = t as u64 * 16;
            let events = match step {
                Step::Start(p, x, y) => {
                    if engine.session(PointerId::Touch(p)).is_none() {
                        swipes_in_session[p as usize] = 0;
                    }
                    engine.on_start(ELEMENT, &sample(PointerId::Touch(p), x, y, t))
                }
                Step::Move(p, x, y) => engine.on_move(&sample(PointerId::Touch(p), x, y, t)),
                Step::End(p) => engine.on_end(&sample(PointerId::Touch(p), 0.0, 0.0, t)),
            };
            for event in &events {
                if matches!(event.kind, GestureKind::Swipe { .. } | GestureKind::Fling { .. }) {
                    let PointerId::Touch(p) = event.session.pointer else {
                        unreachable!("only touch pointers are used");
                    };
                    swipes_in_session[p as usize] += 1;
                    prop_assert!(swipes_in_session[p as usize] <= 1);
                }
            }

            let pinch = engine.pinch();
            for slot in [pinch.primary(), pinch.secondary()].into_iter().flatten() {
                prop_assert!(engine.session(slot).is_some());
            }
            prop_assert!(pinch.primary().is_some() || pinch.secondary().is_none());
        }
    }

    #[test]
    fn prop_end_twice_is_noop(x in -100.0f32..100.0, y in -100.0f32..100.0, t in 0u64..1000) {
        let mut engine = GestureEngine::new();
        engine.bind(ELEMENT, GestureConfig::default()).expect("valid config");
        for gesture in GestureType::ALL {
            engine.subscribe(ELEMENT, gesture, "");
        }
        let finger = PointerId::Touch(0);
        engine.on_start(ELEMENT, &sample(finger, x, y, 0));
        engine.on_end(&sample(finger, x, y, t));
        prop_assert!(engine.on_end(&sample(finger, x, y, t + 1)).is_empty());
        prop_assert!(engine.advance(u64::MAX - 1).is_empty());
    }
}
