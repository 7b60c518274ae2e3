use crate::config::{LinkConfig, PolicyConfig};
use crate::packet::{Packet, TrafficClass};
use crate::policies::PolicyKind;
use crate::traits::{Admission, Scheduler};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

pub const MIN_WEIGHT: f64 = 0.5;
pub const MAX_WEIGHT: f64 = 10.0;

/// Voice packets slower than this push the voice weight up.
pub const VOICE_DELAY_TARGET: f64 = 0.04;
pub const VOICE_WEIGHT_GAIN: f64 = 1.05;
pub const VIDEO_DELAY_TARGET: f64 = 0.12;
pub const VIDEO_WEIGHT_GAIN: f64 = 1.03;

struct HeapEntry {
    finish: f64,
    seq: u64,
    packet: Packet,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.finish.total_cmp(&other.finish).then(self.seq.cmp(&other.seq))
    }
}

/// Weighted fair queuing over a single shared heap.
///
/// Each admitted packet is stamped with a virtual finish time
/// `max(virtual_clock, last_finish[class]) + size / weight[class]` and the
/// smallest stamp is served first. Weights for voice and video grow while
/// their realised delays exceed the class targets, bounded by
/// [`MIN_WEIGHT`, `MAX_WEIGHT`].
pub struct WfqScheduler {
    pub name: String,
    /// Shared across all classes; there is no per-class sub-limit.
    pub capacity: usize,
    pub virtual_clock: f64,
    pub last_finish: [f64; 3],
    pub weights: [f64; 3],
    heap: BinaryHeap<Reverse<HeapEntry>>,
    next_seq: u64,
}

impl WfqScheduler {
    pub fn new(name: &str, capacity: usize) -> Self {
        let mut weights = [0.0; 3];
        for class in TrafficClass::ALL {
            weights[class.index()] = class.weight() as f64;
        }
        Self {
            name: name.to_string(),
            capacity,
            virtual_clock: 0.0,
            last_finish: [0.0; 3],
            weights,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn from_config(config: &PolicyConfig, _link: &LinkConfig) -> Self {
        Self::new("WFQ", config.capacity())
    }

    pub fn weight(&self, class: TrafficClass) -> f64 {
        self.weights[class.index()]
    }

    fn adapt_weights(&mut self, packet: &Packet) {
        let Some(delay) = packet.delay() else { return };
        match packet.class() {
            TrafficClass::Voice if delay > VOICE_DELAY_TARGET => {
                self.weights[TrafficClass::Voice.index()] *= VOICE_WEIGHT_GAIN;
            }
            TrafficClass::Video if delay > VIDEO_DELAY_TARGET => {
                self.weights[TrafficClass::Video.index()] *= VIDEO_WEIGHT_GAIN;
            }
            _ => {}
        }
        for w in self.weights.iter_mut() {
            *w = w.clamp(MIN_WEIGHT, MAX_WEIGHT);
        }
    }
}

impl Default for WfqScheduler {
    fn default() -> Self {
        Self::new("WFQ", 150)
    }
}

impl Scheduler for WfqScheduler {
    fn name(&self) -> &str { &self.name }
    fn kind(&self) -> PolicyKind { PolicyKind::Wfq }

    fn admit(&mut self, mut packet: Packet) -> Admission {
        if self.heap.len() >= self.capacity {
            return Admission::Rejected(packet);
        }
        let idx = packet.class().index();
        let start = self.virtual_clock.max(self.last_finish[idx]);
        let finish = start + packet.size_bits() as f64 / self.weights[idx];
        packet.set_virtual_finish(finish);
        self.last_finish[idx] = finish;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(HeapEntry { finish, seq, packet }));
        Admission::Queued
    }

    fn select(&mut self) -> Option<Packet> {
        self.heap.pop().map(|Reverse(entry)| entry.packet)
    }

    fn queued(&self) -> usize {
        self.heap.len()
    }

    fn on_transmitted(&mut self, packet: &Packet, _tx_duration: f64, now: f64) {
        self.virtual_clock = now;
        self.adapt_weights(packet);
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "capacity": self.capacity,
            "queued": self.heap.len(),
            "virtual_clock": self.virtual_clock,
            "weights": {
                "voice": self.weight(TrafficClass::Voice),
                "video": self.weight(TrafficClass::Video),
                "data": self.weight(TrafficClass::Data),
            },
        })
    }
}
