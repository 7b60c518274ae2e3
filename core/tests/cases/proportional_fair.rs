use crate::common::{assert_conservation, TestHarness};
use qoslink_core::*;

fn avg_throughput(outcome: &SimulationOutcome, class: TrafficClass) -> f64 {
    outcome.scheduler_state["avg_throughput"][class.label()].as_f64().unwrap()
}

#[test]
fn test_average_converges_to_link_rate() {
    let mut h = TestHarness::new();
    // every transmission achieves the full link rate
    for i in 0..60 {
        h.add(TrafficClass::Voice, 800, i as f64 * 0.001);
    }
    h.add(TrafficClass::Data, 8000, 0.5);

    let outcome = h.run(PolicyKind::ProportionalFair);
    assert!(outcome.dropped.is_empty());

    let voice = avg_throughput(&outcome, TrafficClass::Voice);
    let expected = LINK_BANDWIDTH_BPS * (1.0 - 0.9f64.powi(60));
    assert!((voice - expected).abs() < 1.0, "voice avg {} != {}", voice, expected);
    assert!(voice > 0.99 * LINK_BANDWIDTH_BPS);

    let data = avg_throughput(&outcome, TrafficClass::Data);
    assert!((data - 0.1 * LINK_BANDWIDTH_BPS).abs() < 1.0);
    assert!(avg_throughput(&outcome, TrafficClass::Video) < 1e-5);
}

#[test]
fn test_backlogged_underserved_class_goes_first() {
    let mut h = TestHarness::new();
    for i in 0..20 {
        h.add(TrafficClass::Voice, 800, i as f64 * 0.001);
    }
    // arrives once voice has built up a large average
    let data = h.add(TrafficClass::Data, 800, 0.0195);
    let voice = h.add(TrafficClass::Voice, 800, 0.0195);

    let outcome = h.run(PolicyKind::ProportionalFair);
    let tail: Vec<u64> = outcome.transmitted.iter().rev().take(2).map(Packet::id).collect();
    assert_eq!(tail, vec![voice, data]);
}

#[test]
fn test_shared_buffer_limits_all_classes() {
    let mut h = TestHarness::new().with_buffer(4);
    h.add(TrafficClass::Data, 20_000, 0.0);
    h.uniform(&TrafficClass::ALL, 800, 0.0, 2);
    // all seven arrive together; only the first four fit
    let outcome = h.run(PolicyKind::ProportionalFair);
    assert_eq!(outcome.drop_count(DropReason::Admission), 3);
    assert_conservation(&outcome, &h.packets);
}
