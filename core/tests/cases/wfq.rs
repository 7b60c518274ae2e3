use crate::common::{assert_conservation, TestHarness};
use qoslink_core::*;
use std::collections::HashMap;

#[test]
fn test_finish_times_monotonic_per_class() {
    let mut h = TestHarness::new();
    h.generate(300.0, 4.0, 77);
    let outcome = h.run(PolicyKind::Wfq);
    assert_conservation(&outcome, &h.packets);

    let mut stamped: Vec<&Packet> = outcome
        .transmitted
        .iter()
        .chain(outcome.dropped_packets())
        .filter(|p| p.virtual_finish().is_some())
        .collect();
    stamped.sort_by_key(|p| p.id());

    let mut last: HashMap<TrafficClass, f64> = HashMap::new();
    for p in stamped {
        let finish = p.virtual_finish().unwrap();
        let prev = last.insert(p.class(), finish).unwrap_or(0.0);
        assert!(finish >= prev, "packet {} finish {} < {}", p.id(), finish, prev);
    }
}

#[test]
fn test_service_shares_follow_weights() {
    let mut h = TestHarness::new().with_buffer(1000);
    // each class alone would fill the link twice over
    h.uniform(&TrafficClass::ALL, 100, 0.000_05, 200);

    let outcome = h.run(PolicyKind::Wfq);
    assert!(outcome.dropped.is_empty());

    let window = &outcome.transmitted[..99];
    let mut bits = [0u64; 3];
    for p in window {
        bits[p.class().index()] += p.size_bits();
    }
    let total: u64 = bits.iter().sum();
    for (class, expected) in TrafficClass::ALL.iter().zip([5.0 / 9.0, 3.0 / 9.0, 1.0 / 9.0]) {
        let share = bits[class.index()] as f64 / total as f64;
        assert!((share - expected).abs() < 0.03, "{} share {:.3}, want {:.3}", class, share, expected);
    }
}

#[test]
fn test_heap_capacity_is_global() {
    let mut h = TestHarness::new().with_buffer(3);
    h.add(TrafficClass::Data, 20_000, 0.0);
    h.add(TrafficClass::Voice, 800, 0.001);
    h.add(TrafficClass::Video, 800, 0.001);
    h.add(TrafficClass::Data, 800, 0.001);
    h.add(TrafficClass::Voice, 800, 0.001);

    let outcome = h.run(PolicyKind::Wfq);
    assert_eq!(outcome.drop_count(DropReason::Admission), 1);
    assert_eq!(outcome.dropped[0].packet.id(), 4);
}

#[test]
fn test_weights_adapt_under_voice_pressure() {
    let mut h = TestHarness::new();
    // one big data packet first, then a voice burst that queues behind it
    h.add(TrafficClass::Data, 45_000, 0.0);
    for _ in 0..5 {
        h.add(TrafficClass::Voice, 800, 0.0001);
    }

    let outcome = h.run(PolicyKind::Wfq);
    assert!(outcome.dropped.is_empty());
    let voice_weight = outcome.scheduler_state["weights"]["voice"].as_f64().unwrap();
    assert!(voice_weight > 5.0 && voice_weight <= 10.0, "voice weight {}", voice_weight);
    assert_eq!(outcome.scheduler_state["weights"]["data"].as_f64().unwrap(), 1.0);
}
