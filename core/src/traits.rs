use crate::packet::Packet;
use crate::policies::PolicyKind;

/// Result of offering a packet to a policy.
#[derive(Debug)]
pub enum Admission {
    Queued,
    /// Buffer full; ownership goes back to the driver which records the drop.
    Rejected(Packet),
}

pub trait Scheduler {
    fn name(&self) -> &str;
    fn kind(&self) -> PolicyKind;

    fn admit(&mut self, packet: Packet) -> Admission;
    fn select(&mut self) -> Option<Packet>;

    /// Packets currently buffered across all classes.
    fn queued(&self) -> usize;

    /// Called once per completed transmission, after the clock has advanced.
    fn on_transmitted(&mut self, _packet: &Packet, _tx_duration: f64, _now: f64) {}

    // Metrics
    fn snapshot(&self) -> serde_json::Value;
}

impl<T: Scheduler + ?Sized> Scheduler for Box<T> {
    fn name(&self) -> &str { (**self).name() }
    fn kind(&self) -> PolicyKind { (**self).kind() }
    fn admit(&mut self, packet: Packet) -> Admission { (**self).admit(packet) }
    fn select(&mut self) -> Option<Packet> { (**self).select() }
    fn queued(&self) -> usize { (**self).queued() }
    fn on_transmitted(&mut self, packet: &Packet, tx_duration: f64, now: f64) {
        (**self).on_transmitted(packet, tx_duration, now)
    }
    fn snapshot(&self) -> serde_json::Value { (**self).snapshot() }
}
