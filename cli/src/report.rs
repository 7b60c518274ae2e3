use qoslink_core::{ComparisonReport, TrafficClass};
use std::fmt::Write;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 48;

/// Queue occupancy as a one-line bar chart scaled to its own peak.
pub fn sparkline(values: &[usize]) -> String {
    let max_val = values.iter().copied().max().unwrap_or(0).max(1);
    values
        .iter()
        .map(|&v| BARS[(v * (BARS.len() - 1) + max_val / 2) / max_val])
        .collect()
}

pub fn render(report: &ComparisonReport, series_points: usize) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report, series_points)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &ComparisonReport, series_points: usize) -> std::fmt::Result {
    writeln!(out, "\n========= QoS COMPARISON RESULTS =========")?;
    writeln!(out, "{} packets offered over {}s", report.offered, report.simulation_time)?;

    for class in TrafficClass::ALL {
        writeln!(out, "\n--- {} ---", class.label().to_uppercase())?;
        writeln!(out, "{:<10} {:>12} {:>12} {:>10} {:>8}", "policy", "avg delay", "p99 delay", "loss", "sent")?;
        for r in &report.reports {
            let m = r.metrics.class(class);
            writeln!(
                out,
                "{:<10} {:>11.4}s {:>11.4}s {:>10.4} {:>8}",
                r.policy.label(),
                m.average_delay,
                m.p99_delay,
                m.loss_ratio,
                m.transmitted
            )?;
        }
    }

    writeln!(out)?;
    for r in &report.reports {
        writeln!(
            out,
            "{:<10} throughput {:>12.2} bps  fairness {:.4}  drops {} admission / {} deadline",
            r.policy.label(),
            r.metrics.overall_throughput,
            r.fairness,
            r.admission_drops,
            r.deadline_drops
        )?;
    }

    writeln!(out)?;
    for r in &report.reports {
        let series = &r.outcome.series;
        let shape: Vec<usize> = series.downsample(SPARK_WIDTH).into_iter().map(|(_, q)| q).collect();
        writeln!(
            out,
            "{:<10} queue peak {:>4} mean {:>7.2} {}",
            r.policy.label(),
            series.peak(),
            series.mean(),
            sparkline(&shape)
        )?;
        if series_points > 0 {
            for (t, q) in series.downsample(series_points) {
                writeln!(out, "    t={:>9.4}s queued={}", t, q)?;
            }
        }
    }
    Ok(())
}
