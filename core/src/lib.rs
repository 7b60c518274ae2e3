pub mod analytics;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod packet;
pub mod policies;
pub mod traffic;
pub mod traits;

pub use analytics::{calculate_metrics, jains_fairness, ClassMetrics, MetricsReport, QueueSeries};
pub use comparison::{run_comparison, ComparisonReport, PolicyReport};
pub use config::{LinkConfig, PolicyConfig, SimulationConfig};
pub use engine::{run_policy, DropReason, DroppedPacket, Simulation, SimulationOutcome};
pub use error::SimError;
pub use packet::{Packet, TrafficClass};
pub use policies::{create_scheduler, policy_catalog, PolicyKind};
pub use policies::priority::PriorityScheduler;
pub use policies::proportional_fair::ProportionalFairScheduler;
pub use policies::wfq::WfqScheduler;
pub use traffic::{TrafficConfig, TrafficGenerator};
pub use traits::{Admission, Scheduler};

/// Outbound link rate shared by every policy in a comparison run (bits/second)
pub const LINK_BANDWIDTH_BPS: f64 = 1_000_000.0;
