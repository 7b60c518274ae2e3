use crate::common::{ids, TestHarness};
use qoslink_core::*;

#[test]
fn test_determinism_across_runs() {
    let seed = 12345;

    let mut h1 = TestHarness::new();
    h1.generate(180.0, 5.0, seed);
    let mut h2 = TestHarness::new();
    h2.generate(180.0, 5.0, seed);

    for kind in PolicyKind::ALL {
        let a = h1.run(kind);
        let b = h2.run(kind);
        assert_eq!(ids(&a.transmitted), ids(&b.transmitted), "{} order mismatch", kind);
        assert_eq!(a.dropped.len(), b.dropped.len());
        assert_eq!(a.series.queued, b.series.queued);
        assert_eq!(a.end_time, b.end_time);
    }
}

#[test]
fn test_determinism_with_different_seeds() {
    let mut h1 = TestHarness::new();
    h1.generate(180.0, 2.0, 100);
    let mut h2 = TestHarness::new();
    h2.generate(180.0, 2.0, 200);

    let a = h1.run(PolicyKind::Wfq);
    let b = h2.run(PolicyKind::Wfq);
    assert_ne!(a.end_time, b.end_time, "Different seeds should produce different runs");
}
