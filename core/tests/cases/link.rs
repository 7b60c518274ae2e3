use crate::common::TestHarness;
use qoslink_core::*;

#[test]
fn test_invalid_bandwidth_rejects_run() {
    let mut h = TestHarness::new();
    h.add(TrafficClass::Voice, 800, 0.0);
    h.add(TrafficClass::Video, 2000, 0.0);

    for bw in [-1_000_000.0, 0.0, f64::NAN, f64::INFINITY] {
        let config = h.config.clone().with_bandwidth(bw);
        for kind in PolicyKind::ALL {
            let err = run_policy(kind, &config, h.packets.clone()).unwrap_err();
            assert!(matches!(err, SimError::InvalidLink(_)), "{} accepted {} bps", kind, bw);
        }
    }
}

#[test]
fn test_negative_bandwidth_from_json_is_rejected() {
    let config = SimulationConfig::from_json_str(r#"{ "link": { "bandwidth_bps": -1000000.0 } }"#).unwrap();
    let mut h = TestHarness::new();
    h.add(TrafficClass::Voice, 800, 0.0);

    let err = run_policy(PolicyKind::Priority, &config, h.packets.clone()).unwrap_err();
    assert!(matches!(err, SimError::InvalidLink(bw) if bw == -1_000_000.0));
    assert!(run_comparison(&config, &PolicyKind::ALL, &h.packets).is_err());
}

#[test]
fn test_custom_bandwidth_scales_transmission() {
    let mut h = TestHarness::new();
    h.config = h.config.clone().with_bandwidth(2_000_000.0);
    h.add(TrafficClass::Voice, 800, 0.0);

    let outcome = h.run(PolicyKind::Priority);
    assert!((outcome.end_time - 0.0004).abs() < 1e-12);
}
