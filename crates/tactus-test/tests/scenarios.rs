//! Runs the TOML scenarios under `tests/scenarios`.

#![allow(clippy::unwrap_used)]

use tactus_test::GestureScript;

fn run(name: &str, text: &str) {
    let script = GestureScript::from_toml(text).unwrap_or_else(|err| panic!("{name}: {err}"));
    let report = script.run().unwrap();
    assert!(
        report.passed(),
        "{name} ({}): {:?}",
        script.name,
        report.failures
    );
}

macro_rules! scenario {
    ($test:ident, $file:literal) => {
        #[test]
        fn $test() {
            run($file, include_str!(concat!("scenarios/", $file)));
        }
    };
}

scenario!(test_tap_and_hold, "tap_and_hold.toml");
scenario!(test_swipe_and_fling, "swipe_and_fling.toml");
scenario!(test_passive_axis, "passive_axis.toml");
scenario!(test_two_finger_pinch, "two_finger_pinch.toml");
scenario!(test_modifier_pinch, "modifier_pinch.toml");
scenario!(test_touch_suppresses_mouse, "touch_suppresses_mouse.toml");
scenario!(test_ignored_control, "ignored_control.toml");

#[test]
fn test_pinch_events_carry_session_snapshot() {
    let script = GestureScript::from_toml(include_str!("scenarios/two_finger_pinch.toml")).unwrap();
    let report = script.run().unwrap();
    let names: Vec<_> = report.events.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["pinchStart", "pinchMove", "pinchMove", "pinchEnd"]
    );
    assert_eq!(report.events[0].session.pointer, tactus_core::PointerId::Touch(2));
    assert_eq!(report.events[3].session.pointer, tactus_core::PointerId::Touch(1));
}
