use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TrafficClass {
    Voice,
    Video,
    Data,
}

impl TrafficClass {
    /// Every class, in tie-break order.
    pub const ALL: [TrafficClass; 3] = [TrafficClass::Voice, TrafficClass::Video, TrafficClass::Data];

    pub fn index(self) -> usize {
        match self {
            TrafficClass::Voice => 0,
            TrafficClass::Video => 1,
            TrafficClass::Data => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficClass::Voice => "voice",
            TrafficClass::Video => "video",
            TrafficClass::Data => "data",
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            TrafficClass::Voice => 5,
            TrafficClass::Video => 3,
            TrafficClass::Data => 1,
        }
    }

    /// Maximum tolerated wait between arrival and selection, in seconds.
    pub fn deadline(self) -> f64 {
        match self {
            TrafficClass::Voice => 0.05,
            TrafficClass::Video => 0.15,
            TrafficClass::Data => 1.0,
        }
    }

    /// Lenient parse: anything that is not voice or video is treated as
    /// best-effort data. Use `str::parse` to reject unknown labels instead.
    pub fn from_label_or_data(label: &str) -> Self {
        label.parse().unwrap_or(TrafficClass::Data)
    }
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrafficClass {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voice" => Ok(TrafficClass::Voice),
            "video" => Ok(TrafficClass::Video),
            "data" => Ok(TrafficClass::Data),
            _ => Err(SimError::UnknownTrafficClass(s.to_string())),
        }
    }
}

/// One unit of traffic offered to the link.
///
/// Arrival, size and class are fixed at construction, and so are the
/// weight and deadline derived from the class. The scheduling outcome
/// fields are filled in at most once by the driver or the active policy.
#[derive(Debug, Clone, Serialize)]
pub struct Packet {
    id: u64,
    arrival_time: f64,
    size_bits: u64,
    class: TrafficClass,
    weight: u32,
    deadline: f64,
    start_time: Option<f64>,
    end_time: Option<f64>,
    virtual_finish: Option<f64>,
}

impl Packet {
    pub fn new(id: u64, arrival_time: f64, size_bits: u64, class: TrafficClass) -> Self {
        Self {
            id,
            arrival_time,
            size_bits,
            class,
            weight: class.weight(),
            deadline: class.deadline(),
            start_time: None,
            end_time: None,
            virtual_finish: None,
        }
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn arrival_time(&self) -> f64 { self.arrival_time }
    pub fn size_bits(&self) -> u64 { self.size_bits }
    pub fn class(&self) -> TrafficClass { self.class }
    pub fn weight(&self) -> u32 { self.weight }
    pub fn deadline(&self) -> f64 { self.deadline }
    pub fn start_time(&self) -> Option<f64> { self.start_time }
    pub fn end_time(&self) -> Option<f64> { self.end_time }
    pub fn virtual_finish(&self) -> Option<f64> { self.virtual_finish }

    pub fn waiting_time(&self, now: f64) -> f64 {
        now - self.arrival_time
    }

    /// End-to-end delay, available once the packet has been transmitted.
    pub fn delay(&self) -> Option<f64> {
        self.end_time.map(|end| end - self.arrival_time)
    }

    pub fn is_transmitted(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.size_bits == 0 {
            return Err(SimError::InvalidPacket { id: self.id, reason: "size must be positive".into() });
        }
        if !self.arrival_time.is_finite() || self.arrival_time < 0.0 {
            return Err(SimError::InvalidPacket {
                id: self.id,
                reason: format!("arrival time {} is not a non-negative number", self.arrival_time),
            });
        }
        Ok(())
    }

    pub(crate) fn mark_started(&mut self, now: f64) {
        debug_assert!(self.start_time.is_none(), "packet {} started twice", self.id);
        self.start_time = Some(now);
    }

    pub(crate) fn mark_finished(&mut self, now: f64) {
        debug_assert!(self.end_time.is_none(), "packet {} finished twice", self.id);
        self.end_time = Some(now);
    }

    pub(crate) fn set_virtual_finish(&mut self, finish: f64) {
        debug_assert!(self.virtual_finish.is_none(), "packet {} stamped twice", self.id);
        self.virtual_finish = Some(finish);
    }
}
