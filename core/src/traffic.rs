use crate::packet::{Packet, TrafficClass};
use rand::prelude::*;
use rand_distr::Exp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    /// Length of the offered arrival window, in seconds.
    pub simulation_time: f64,
    /// Mean packets per second across all classes.
    pub arrival_rate: f64,
    pub seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self { simulation_time: 20.0, arrival_rate: 120.0, seed: 12345 }
    }
}

/// Poisson arrivals with a uniform class mix and per-class size ranges.
pub struct TrafficGenerator {
    pub config: TrafficConfig,
    rng: StdRng,
}

impl TrafficGenerator {
    pub fn new(config: TrafficConfig) -> Self {
        Self { rng: StdRng::seed_from_u64(config.seed), config }
    }

    /// Size range in bytes for each class.
    pub fn size_range_bytes(class: TrafficClass) -> (u64, u64) {
        match class {
            TrafficClass::Voice => (500, 1000),
            TrafficClass::Video => (1000, 5000),
            TrafficClass::Data => (5000, 10000),
        }
    }

    pub fn generate(&mut self) -> Vec<Packet> {
        let rate = self.config.arrival_rate;
        let inter_arrival = match Exp::new(rate) {
            Ok(exp) if rate > 0.0 && rate.is_finite() => exp,
            _ => {
                log::warn!("arrival rate {} produces no traffic", rate);
                return Vec::new();
            }
        };

        let window = self.config.simulation_time;
        if !window.is_finite() || window <= 0.0 {
            log::warn!("simulation time {} produces no traffic", window);
            return Vec::new();
        }

        let mut packets = Vec::new();
        let mut now = 0.0;
        let mut next_id = 0u64;
        loop {
            now += inter_arrival.sample(&mut self.rng);
            if now > self.config.simulation_time {
                break;
            }
            let class = TrafficClass::ALL[self.rng.gen_range(0..TrafficClass::ALL.len())];
            let (lo, hi) = Self::size_range_bytes(class);
            let size_bits = self.rng.gen_range(lo..=hi) * 8;
            packets.push(Packet::new(next_id, now, size_bits, class));
            next_id += 1;
        }
        log::debug!("generated {} packets over {}s at {} pkt/s", packets.len(), self.config.simulation_time, rate);
        packets
    }
}
