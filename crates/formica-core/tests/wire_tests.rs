//! Wire format and boundary serialization tests.

use formica_core::codec;
use formica_core::config::AgentConfig;
use formica_core::geometry::{PolarCoordinate, RelativeCoordinate};
use formica_core::signal::{Signal, SignalKind};

#[test]
fn decoding_is_total_and_stable() {
    // Sparse sweep over the whole word space.
    let mut word: u32 = 0;
    loop {
        let signal = codec::decode(word);
        assert!(codec::is_lossless(&signal));
        assert_eq!(codec::decode(codec::encode(&signal)), signal);
        match word.checked_add(65_521) {
            Some(next) => word = next,
            None => break,
        }
    }
    let last = codec::decode(u32::MAX);
    assert_eq!(last.hop_count, 3);
    assert_eq!(last.coordinates, RelativeCoordinate::new(-4095, -4095));
    assert_eq!(last.kind, SignalKind::Unassigned(15));
}

#[test]
fn diagonal_sweep_roundtrips() {
    for v in (-4095..=4095).step_by(7) {
        for kind in SignalKind::ASSIGNED {
            let signal = Signal::new(kind, RelativeCoordinate::new(v, -v)).with_hop_count(1);
            assert_eq!(codec::decode(codec::encode(&signal)), signal);
        }
    }
}

#[test]
fn clamped_coordinates_keep_their_sign() {
    let signal = Signal::new(SignalKind::BugSpotted, RelativeCoordinate::new(5000, -5000));
    assert!(!codec::is_lossless(&signal));
    let decoded = codec::decode(codec::encode(&signal));
    assert_eq!(decoded.coordinates, RelativeCoordinate::new(904, -904));
}

#[test]
fn polar_form_of_a_wire_coordinate() {
    let coordinate = RelativeCoordinate::new(0, -250);
    let polar = coordinate.to_polar();
    assert_eq!(polar, PolarCoordinate::new(250, -90));
    assert_eq!(RelativeCoordinate::from(polar), coordinate);
}

#[test]
fn signal_json_defaults_age() {
    let signal: Signal = serde_json::from_str(
        r#"{"kind":"AttackPoint","coordinates":{"x":3,"y":-4},"hop_count":1}"#,
    )
    .unwrap();
    assert_eq!(signal.age, 0);
    assert_eq!(signal.kind, SignalKind::AttackPoint);
    assert_eq!(signal.coordinates.distance_to(&RelativeCoordinate::ORIGIN), 5);
}

#[test]
fn config_survives_json() {
    let config = AgentConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: AgentConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
