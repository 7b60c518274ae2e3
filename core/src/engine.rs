use crate::analytics::QueueSeries;
use crate::config::{LinkConfig, SimulationConfig};
use crate::error::SimError;
use crate::packet::Packet;
use crate::policies::{create_scheduler, PolicyKind};
use crate::traits::{Admission, Scheduler};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Buffer full when the packet arrived.
    Admission,
    /// Waited longer than its class deadline before being selected.
    Deadline,
}

#[derive(Debug, Clone, Serialize)]
pub struct DroppedPacket {
    pub packet: Packet,
    pub reason: DropReason,
    /// Clock value when the drop happened.
    pub at: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub policy: PolicyKind,
    pub transmitted: Vec<Packet>,
    pub dropped: Vec<DroppedPacket>,
    pub series: QueueSeries,
    pub end_time: f64,
    pub scheduler_state: serde_json::Value,
}

impl SimulationOutcome {
    pub fn dropped_packets(&self) -> impl Iterator<Item = &Packet> {
        self.dropped.iter().map(|d| &d.packet)
    }

    pub fn drop_count(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|d| d.reason == reason).count()
    }
}

/// Shared admit / select / transmit loop, driven by one policy instance.
pub struct Simulation<S: Scheduler> {
    pub time: f64,
    pub link: LinkConfig,
    pub scheduler: S,
    pub pending: VecDeque<Packet>,
    pub transmitted: Vec<Packet>,
    pub dropped: Vec<DroppedPacket>,
    pub series: QueueSeries,
}

impl<S: Scheduler> Simulation<S> {
    /// Takes ownership of the packets so no other run can touch their
    /// scheduling fields. Any malformed packet rejects the whole sequence.
    pub fn new(scheduler: S, link: LinkConfig, mut packets: Vec<Packet>) -> Result<Self, SimError> {
        link.validate()?;
        for p in &packets {
            p.validate()?;
            if p.start_time().is_some() || p.virtual_finish().is_some() {
                return Err(SimError::InvalidPacket { id: p.id(), reason: "already scheduled by another run".into() });
            }
        }
        // stable: equal arrivals keep their input order
        packets.sort_by(|a, b| a.arrival_time().total_cmp(&b.arrival_time()));
        Ok(Self {
            time: 0.0,
            link,
            scheduler,
            pending: packets.into(),
            transmitted: Vec::new(),
            dropped: Vec::new(),
            series: QueueSeries::default(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.scheduler.queued() == 0
    }

    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        while self.pending.front().is_some_and(|p| p.arrival_time() <= self.time) {
            if let Some(packet) = self.pending.pop_front() {
                if let Admission::Rejected(packet) = self.scheduler.admit(packet) {
                    self.drop_packet(packet, DropReason::Admission);
                }
            }
        }

        if let Some(packet) = self.scheduler.select() {
            self.transmit(packet);
            true
        } else if let Some(next) = self.pending.front() {
            // idle link: jump to the next arrival
            self.time = self.time.max(next.arrival_time());
            true
        } else {
            false
        }
    }

    pub fn run(&mut self) {
        while self.step() {}
    }

    fn transmit(&mut self, mut packet: Packet) {
        if packet.waiting_time(self.time) > packet.deadline() {
            self.drop_packet(packet, DropReason::Deadline);
            return;
        }

        packet.mark_started(self.time);
        let tx_duration = self.link.transmission_time(packet.size_bits());
        self.time += tx_duration;
        packet.mark_finished(self.time);

        self.scheduler.on_transmitted(&packet, tx_duration, self.time);
        self.transmitted.push(packet);
        self.series.push(self.time, self.scheduler.queued());
    }

    fn drop_packet(&mut self, packet: Packet, reason: DropReason) {
        log::trace!(
            "{}: dropped packet {} ({}) at {:.6}s: {:?}",
            self.scheduler.name(),
            packet.id(),
            packet.class(),
            self.time,
            reason
        );
        self.dropped.push(DroppedPacket { packet, reason, at: self.time });
    }

    pub fn finish(self) -> SimulationOutcome {
        SimulationOutcome {
            policy: self.scheduler.kind(),
            scheduler_state: self.scheduler.snapshot(),
            transmitted: self.transmitted,
            dropped: self.dropped,
            series: self.series,
            end_time: self.time,
        }
    }
}

/// Runs one policy, freshly constructed from `config`, over `packets`.
pub fn run_policy(
    kind: PolicyKind,
    config: &SimulationConfig,
    packets: Vec<Packet>,
) -> Result<SimulationOutcome, SimError> {
    let scheduler = create_scheduler(kind, config.policy(kind), &config.link);
    let offered = packets.len();
    let mut sim = Simulation::new(scheduler, config.link, packets)?;
    log::debug!("{}: simulating {} packets", kind, offered);
    sim.run();
    let outcome = sim.finish();
    log::debug!(
        "{}: {} transmitted, {} dropped, clock {:.4}s",
        kind,
        outcome.transmitted.len(),
        outcome.dropped.len(),
        outcome.end_time
    );
    Ok(outcome)
}
