use crate::analytics::{jains_fairness, MetricsReport};
use crate::config::SimulationConfig;
use crate::engine::{run_policy, DropReason, SimulationOutcome};
use crate::error::SimError;
use crate::packet::Packet;
use crate::policies::PolicyKind;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub metrics: MetricsReport,
    pub fairness: f64,
    pub admission_drops: usize,
    pub deadline_drops: usize,
    pub outcome: SimulationOutcome,
}

impl PolicyReport {
    pub fn new(outcome: SimulationOutcome, simulation_time: f64) -> Self {
        Self {
            policy: outcome.policy,
            metrics: MetricsReport::from_outcome(&outcome, simulation_time),
            fairness: jains_fairness(&outcome.transmitted),
            admission_drops: outcome.drop_count(DropReason::Admission),
            deadline_drops: outcome.drop_count(DropReason::Deadline),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub offered: usize,
    pub simulation_time: f64,
    pub reports: Vec<PolicyReport>,
}

impl ComparisonReport {
    pub fn get(&self, kind: PolicyKind) -> Option<&PolicyReport> {
        self.reports.iter().find(|r| r.policy == kind)
    }
}

/// Runs each policy on its own copy of `packets`.
pub fn run_comparison(
    config: &SimulationConfig,
    policies: &[PolicyKind],
    packets: &[Packet],
) -> Result<ComparisonReport, SimError> {
    let simulation_time = config.traffic.simulation_time;
    let reports = policies
        .iter()
        .map(|&kind| run_policy(kind, config, packets.to_vec()).map(|o| PolicyReport::new(o, simulation_time)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ComparisonReport { offered: packets.len(), simulation_time, reports })
}
