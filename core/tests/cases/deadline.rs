use crate::common::{assert_conservation, TestHarness};
use qoslink_core::*;

#[test]
fn test_late_voice_is_dropped_by_every_policy() {
    let mut h = TestHarness::new();
    // 60ms on the wire keeps the voice packet waiting past its 50ms budget
    h.add(TrafficClass::Data, 60_000, 0.0);
    let voice = h.add(TrafficClass::Voice, 800, 0.001);

    for outcome in h.run_all() {
        assert_eq!(outcome.transmitted.len(), 1, "{}", outcome.policy);
        assert_eq!(outcome.dropped.len(), 1);
        let drop = &outcome.dropped[0];
        assert_eq!(drop.packet.id(), voice);
        assert_eq!(drop.reason, DropReason::Deadline);
        assert!(drop.at >= 0.001 + TrafficClass::Voice.deadline());
        assert_conservation(&outcome, &h.packets);
    }
}

#[test]
fn test_dropped_packet_does_not_use_the_link() {
    let mut h = TestHarness::new();
    h.add(TrafficClass::Data, 60_000, 0.0);
    h.add(TrafficClass::Voice, 800, 0.001);
    let video = h.add(TrafficClass::Video, 2000, 0.002);

    let outcome = h.run(PolicyKind::Priority);
    let sent = outcome.transmitted.iter().find(|p| p.id() == video).unwrap();
    // video starts the moment the data packet ends
    assert!((sent.start_time().unwrap() - 0.06).abs() < 1e-12);
    assert!((outcome.end_time - 0.062).abs() < 1e-12);
}

#[test]
fn test_waiting_within_budget_is_transmitted() {
    let mut h = TestHarness::new();
    h.add(TrafficClass::Data, 40_000, 0.0);
    h.add(TrafficClass::Voice, 800, 0.0);
    h.add(TrafficClass::Data, 800, 0.0);

    for outcome in h.run_all() {
        assert!(outcome.dropped.is_empty(), "{}", outcome.policy);
    }
}

#[test]
fn test_wait_equal_to_deadline_is_still_sent() {
    let mut h = TestHarness::new();
    // exactly one second on the wire
    h.add(TrafficClass::Data, 1_000_000, 0.0);
    let on_time = h.add(TrafficClass::Data, 800, 0.0);
    let late = h.add(TrafficClass::Data, 800, 0.0);

    for outcome in h.run_all() {
        let sent = outcome.transmitted.iter().find(|p| p.id() == on_time);
        let sent = sent.unwrap_or_else(|| panic!("{}: packet at the deadline was dropped", outcome.policy));
        assert_eq!(sent.start_time(), Some(TrafficClass::Data.deadline()));

        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].packet.id(), late);
        assert_eq!(outcome.dropped[0].reason, DropReason::Deadline);
        assert_conservation(&outcome, &h.packets);
    }
}
