use crate::config::{LinkConfig, PolicyConfig};
use crate::packet::{Packet, TrafficClass};
use crate::policies::PolicyKind;
use crate::traits::{Admission, Scheduler};
use std::collections::VecDeque;

/// Strict priority: voice always beats video, video always beats data.
pub struct PriorityScheduler {
    pub name: String,
    /// Per-class cap, applied to each queue independently.
    pub capacity: usize,
    pub queues: [VecDeque<Packet>; 3],
}

impl PriorityScheduler {
    pub fn new(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            queues: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
        }
    }

    pub fn from_config(config: &PolicyConfig, _link: &LinkConfig) -> Self {
        Self::new("Priority", config.capacity())
    }

    pub fn queue_len(&self, class: TrafficClass) -> usize {
        self.queues[class.index()].len()
    }
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self::new("Priority", 50)
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &str { &self.name }
    fn kind(&self) -> PolicyKind { PolicyKind::Priority }

    fn admit(&mut self, packet: Packet) -> Admission {
        let queue = &mut self.queues[packet.class().index()];
        if queue.len() >= self.capacity {
            return Admission::Rejected(packet);
        }
        queue.push_back(packet);
        Admission::Queued
    }

    fn select(&mut self) -> Option<Packet> {
        self.queues.iter_mut().find_map(|q| q.pop_front())
    }

    fn queued(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "capacity_per_class": self.capacity,
            "voice": self.queue_len(TrafficClass::Voice),
            "video": self.queue_len(TrafficClass::Video),
            "data": self.queue_len(TrafficClass::Data),
        })
    }
}
