use crate::error::SimError;
use crate::policies::PolicyKind;
use crate::traffic::TrafficConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinkConfig {
    pub bandwidth_bps: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { bandwidth_bps: crate::LINK_BANDWIDTH_BPS }
    }
}

impl LinkConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.bandwidth_bps.is_finite() || self.bandwidth_bps <= 0.0 {
            return Err(SimError::InvalidLink(self.bandwidth_bps));
        }
        Ok(())
    }

    pub fn transmission_time(&self, size_bits: u64) -> f64 {
        size_bits as f64 / self.bandwidth_bps
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Packets the policy may buffer. Zero or negative drops every arrival.
    pub buffer_size: i64,
}

impl PolicyConfig {
    pub fn new(buffer_size: i64) -> Self {
        Self { buffer_size }
    }

    pub fn capacity(&self) -> usize {
        if self.buffer_size <= 0 {
            log::warn!("buffer size {} leaves no room, every arrival will be dropped", self.buffer_size);
        }
        usize::try_from(self.buffer_size).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub link: LinkConfig,
    pub traffic: TrafficConfig,
    pub priority: PolicyConfig,
    pub wfq: PolicyConfig,
    pub pf: PolicyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            traffic: TrafficConfig::default(),
            priority: PolicyConfig::new(50),
            wfq: PolicyConfig::new(150),
            pf: PolicyConfig::new(150),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn policy(&self, kind: PolicyKind) -> &PolicyConfig {
        match kind {
            PolicyKind::Priority => &self.priority,
            PolicyKind::Wfq => &self.wfq,
            PolicyKind::ProportionalFair => &self.pf,
        }
    }

    /// Same buffer size for every policy, as the interactive panel does.
    pub fn with_buffer_size(mut self, buffer_size: i64) -> Self {
        let cfg = PolicyConfig::new(buffer_size);
        self.priority = cfg;
        self.wfq = cfg;
        self.pf = cfg;
        self
    }

    pub fn with_traffic(mut self, traffic: TrafficConfig) -> Self {
        self.traffic = traffic;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth_bps: f64) -> Self {
        self.link.bandwidth_bps = bandwidth_bps;
        self
    }
}
