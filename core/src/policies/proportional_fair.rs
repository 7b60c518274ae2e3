use crate::config::{LinkConfig, PolicyConfig};
use crate::packet::{Packet, TrafficClass};
use crate::policies::PolicyKind;
use crate::traits::{Admission, Scheduler};
use std::collections::VecDeque;

/// Smoothing factor for the per-class throughput average.
pub const ALPHA: f64 = 0.9;
/// Starting average, kept above zero so the metric stays finite.
pub const INITIAL_THROUGHPUT: f64 = 1e-6;

/// Serves the backlogged class whose smoothed throughput is lowest.
pub struct ProportionalFairScheduler {
    pub name: String,
    /// Bound on the combined length of all three queues.
    pub capacity: usize,
    pub bandwidth_bps: f64,
    pub avg_throughput: [f64; 3],
    pub queues: [VecDeque<Packet>; 3],
}

impl ProportionalFairScheduler {
    pub fn new(name: &str, capacity: usize, bandwidth_bps: f64) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            bandwidth_bps,
            avg_throughput: [INITIAL_THROUGHPUT; 3],
            queues: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
        }
    }

    pub fn from_config(config: &PolicyConfig, link: &LinkConfig) -> Self {
        Self::new("PF", config.capacity(), link.bandwidth_bps)
    }

    pub fn average_throughput(&self, class: TrafficClass) -> f64 {
        self.avg_throughput[class.index()]
    }

    pub fn metric(&self, class: TrafficClass) -> f64 {
        self.bandwidth_bps / self.avg_throughput[class.index()]
    }
}

impl Default for ProportionalFairScheduler {
    fn default() -> Self {
        Self::new("PF", 150, crate::LINK_BANDWIDTH_BPS)
    }
}

impl Scheduler for ProportionalFairScheduler {
    fn name(&self) -> &str { &self.name }
    fn kind(&self) -> PolicyKind { PolicyKind::ProportionalFair }

    fn admit(&mut self, packet: Packet) -> Admission {
        if self.queued() >= self.capacity {
            return Admission::Rejected(packet);
        }
        self.queues[packet.class().index()].push_back(packet);
        Admission::Queued
    }

    fn select(&mut self) -> Option<Packet> {
        let mut best: Option<(TrafficClass, f64)> = None;
        for class in TrafficClass::ALL {
            if self.queues[class.index()].is_empty() {
                continue;
            }
            let metric = self.metric(class);
            // strict > keeps the earlier class on ties
            if best.map_or(true, |(_, m)| metric > m) {
                best = Some((class, metric));
            }
        }
        let (class, _) = best?;
        self.queues[class.index()].pop_front()
    }

    fn queued(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    fn on_transmitted(&mut self, packet: &Packet, tx_duration: f64, _now: f64) {
        if tx_duration <= 0.0 {
            return;
        }
        let achieved = packet.size_bits() as f64 / tx_duration;
        let avg = &mut self.avg_throughput[packet.class().index()];
        *avg = ALPHA * *avg + (1.0 - ALPHA) * achieved;
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "capacity": self.capacity,
            "queued": self.queued(),
            "avg_throughput": {
                "voice": self.average_throughput(TrafficClass::Voice),
                "video": self.average_throughput(TrafficClass::Video),
                "data": self.average_throughput(TrafficClass::Data),
            },
        })
    }
}
