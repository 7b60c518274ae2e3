use crate::config::{LinkConfig, PolicyConfig};
use crate::error::SimError;
use crate::traits::Scheduler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod priority;
pub mod proportional_fair;
pub mod wfq;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Priority,
    Wfq,
    ProportionalFair,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Priority, PolicyKind::Wfq, PolicyKind::ProportionalFair];

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Priority => "Priority",
            PolicyKind::Wfq => "WFQ",
            PolicyKind::ProportionalFair => "PF",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" | "sp" => Ok(PolicyKind::Priority),
            "wfq" => Ok(PolicyKind::Wfq),
            "pf" | "proportional_fair" | "proportional-fair" => Ok(PolicyKind::ProportionalFair),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

macro_rules! register_policies {
    ($($kind:path => $type:ty, $description:expr),* $(,)?) => {
        /// Builds a fresh policy instance; per-class state is never shared between runs.
        pub fn create_scheduler(kind: PolicyKind, config: &PolicyConfig, link: &LinkConfig) -> Box<dyn Scheduler> {
            match kind {
                $(
                    $kind => Box::new(<$type>::from_config(config, link)),
                )*
            }
        }

        pub fn policy_catalog() -> Vec<(PolicyKind, &'static str)> {
            vec![
                $( ($kind, $description) ),*
            ]
        }
    };
}

register_policies!(
    PolicyKind::Priority => priority::PriorityScheduler, "Strict precedence voice > video > data, per-class buffers",
    PolicyKind::Wfq => wfq::WfqScheduler, "Virtual finish time ordering with delay-adaptive weights",
    PolicyKind::ProportionalFair => proportional_fair::ProportionalFairScheduler, "Serves the class with the lowest smoothed throughput",
);
