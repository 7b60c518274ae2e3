mod report;

use anyhow::{Context, Result};
use clap::Parser;
use qoslink_core::{run_comparison, PolicyKind, SimulationConfig, TrafficGenerator};
use std::path::PathBuf;

/// Compare QoS scheduling policies on one simulated outbound link.
#[derive(Debug, Parser)]
#[command(name = "qoslink", version)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Policy to run: all, priority, wfq or pf
    #[arg(long, default_value = "all")]
    policy: String,

    /// Mean offered packets per second
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Length of the arrival window in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Buffer size applied to every policy (<= 0 drops every arrival)
    #[arg(long, allow_hyphen_values = true)]
    buffer_size: Option<i64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Link rate in bits per second
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Queue samples to print per policy
    #[arg(long, default_value_t = 0)]
    series: usize,
}

impl Args {
    fn policies(&self) -> Result<Vec<PolicyKind>> {
        if self.policy.eq_ignore_ascii_case("all") {
            return Ok(PolicyKind::ALL.to_vec());
        }
        Ok(vec![self.policy.parse()?])
    }

    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(rate) = self.arrival_rate {
            config.traffic.arrival_rate = rate;
        }
        if let Some(duration) = self.duration {
            config.traffic.simulation_time = duration;
        }
        if let Some(seed) = self.seed {
            config.traffic.seed = seed;
        }
        if let Some(buffer) = self.buffer_size {
            config = config.with_buffer_size(buffer);
        }
        if let Some(bw) = self.bandwidth {
            config = config.with_bandwidth(bw);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let policies = args.policies()?;

    let packets = TrafficGenerator::new(config.traffic).generate();
    tracing::info!(
        packets = packets.len(),
        rate = config.traffic.arrival_rate,
        duration = config.traffic.simulation_time,
        seed = config.traffic.seed,
        "generated traffic"
    );

    let report = run_comparison(&config, &policies, &packets)?;
    tracing::info!(policies = report.reports.len(), "simulation complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report, args.series)?);
    }
    Ok(())
}
