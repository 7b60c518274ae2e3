use crate::engine::{DroppedPacket, SimulationOutcome};
use crate::packet::{Packet, TrafficClass};
use hdrhistogram::Histogram;
use serde::Serialize;

/// Queue occupancy sampled after every completed transmission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueueSeries {
    pub time: Vec<f64>,
    pub queued: Vec<usize>,
}

impl QueueSeries {
    pub fn push(&mut self, time: f64, queued: usize) {
        self.time.push(time);
        self.queued.push(queued);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn peak(&self) -> usize {
        self.queued.iter().copied().max().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        if self.queued.is_empty() {
            return 0.0;
        }
        self.queued.iter().sum::<usize>() as f64 / self.queued.len() as f64
    }

    /// At most `points` evenly spaced samples, always keeping the last one.
    pub fn downsample(&self, points: usize) -> Vec<(f64, usize)> {
        let n = self.len();
        if points == 0 || n == 0 {
            return Vec::new();
        }
        if n <= points {
            return self.time.iter().copied().zip(self.queued.iter().copied()).collect();
        }
        (0..points)
            .map(|i| {
                let idx = if points == 1 { n - 1 } else { i * (n - 1) / (points - 1) };
                (self.time[idx], self.queued[idx])
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ClassMetrics {
    /// Mean end-to-end delay of transmitted packets, seconds.
    pub average_delay: f64,
    pub p99_delay: f64,
    pub max_delay: f64,
    pub transmitted: usize,
    pub dropped: usize,
    pub loss_ratio: f64,
    pub delivered_bits: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub voice: ClassMetrics,
    pub video: ClassMetrics,
    pub data: ClassMetrics,
    /// Delivered bits over the offered window, bits/second.
    pub overall_throughput: f64,
}

impl MetricsReport {
    pub fn class(&self, class: TrafficClass) -> &ClassMetrics {
        match class {
            TrafficClass::Voice => &self.voice,
            TrafficClass::Video => &self.video,
            TrafficClass::Data => &self.data,
        }
    }

    pub fn from_outcome(outcome: &SimulationOutcome, simulation_time: f64) -> Self {
        calculate_metrics(&outcome.transmitted, &outcome.dropped, simulation_time)
    }
}

const MICROS: f64 = 1_000_000.0;

fn class_metrics(class: TrafficClass, transmitted: &[Packet], dropped: &[DroppedPacket]) -> ClassMetrics {
    let mut histogram = Histogram::<u64>::new(3).expect("3 significant figures is in range");
    let mut total_delay = 0.0;
    let mut max_delay: f64 = 0.0;
    let mut count = 0usize;
    let mut bits = 0u64;

    for p in transmitted.iter().filter(|p| p.class() == class) {
        let Some(delay) = p.delay() else { continue };
        count += 1;
        bits += p.size_bits();
        total_delay += delay;
        max_delay = max_delay.max(delay);
        histogram.saturating_record((delay * MICROS).round().max(1.0) as u64);
    }

    let dropped = dropped.iter().filter(|d| d.packet.class() == class).count();
    let offered = count + dropped;
    let p99_delay = if count > 0 { histogram.value_at_quantile(0.99) as f64 / MICROS } else { 0.0 };

    ClassMetrics {
        average_delay: if count > 0 { total_delay / count as f64 } else { 0.0 },
        p99_delay,
        max_delay,
        transmitted: count,
        dropped,
        loss_ratio: if offered > 0 { dropped as f64 / offered as f64 } else { 0.0 },
        delivered_bits: bits,
    }
}

/// Per-class delay and loss plus link throughput over `simulation_time` seconds.
pub fn calculate_metrics(transmitted: &[Packet], dropped: &[DroppedPacket], simulation_time: f64) -> MetricsReport {
    let [voice, video, data] = TrafficClass::ALL.map(|c| class_metrics(c, transmitted, dropped));
    let total_bits = voice.delivered_bits + video.delivered_bits + data.delivered_bits;
    let overall_throughput = if simulation_time > 0.0 { total_bits as f64 / simulation_time } else { 0.0 };
    MetricsReport { voice, video, data, overall_throughput }
}

/// Jain's index over per-class delivered bits, always across all three
/// classes: 1.0 when shares are equal, 1/3 when a single class gets
/// everything, 0 when nothing was delivered.
pub fn jains_fairness(transmitted: &[Packet]) -> f64 {
    let mut per_class = [0.0f64; 3];
    for p in transmitted {
        per_class[p.class().index()] += p.size_bits() as f64;
    }
    let sum: f64 = per_class.iter().sum();
    let sum_sq: f64 = per_class.iter().map(|x| x * x).sum();
    if sum_sq == 0.0 {
        return 0.0;
    }
    sum * sum / (per_class.len() as f64 * sum_sq)
}
