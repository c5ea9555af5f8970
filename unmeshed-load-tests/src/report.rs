use std::collections::BTreeMap;
use std::fmt::Write;

use crate::summary::SummaryReport;

/// Human-readable rendering of a summary plus the run's failure count.
pub fn render(report: &SummaryReport, failures: u64) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report, failures);
    out
}

fn write_report(out: &mut String, report: &SummaryReport, failures: u64) -> std::fmt::Result {
    writeln!(out, "Unmeshed Load Test Results")?;
    writeln!(out, "==========================")?;
    writeln!(out, "Successful runs:       {}", report.count)?;
    writeln!(out, "Failed runs:           {}", failures)?;

    let Some(stats) = &report.durations else {
        writeln!(out, "No samples recorded.")?;
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "Min latency:           {} ms", stats.min_millis)?;
    writeln!(out, "Max latency:           {} ms", stats.max_millis)?;
    writeln!(out, "Avg latency:           {:.2} ms", stats.average_millis)?;
    for (p, value) in &stats.percentiles {
        let label = format!("P{} latency:", format_percentile(*p));
        writeln!(out, "{label:<23}{value} ms")?;
    }
    writeln!(out, "Throughput:            {:.2} runs/s", report.throughput_per_sec)?;

    writeln!(out)?;
    writeln!(out, "Per-bucket counts ({} ms buckets):", report.bucket_width_millis)?;
    write_buckets(out, "started", &report.starts_per_bucket)?;
    write_buckets(out, "completed", &report.completions_per_bucket)?;
    Ok(())
}

fn write_buckets(out: &mut String, label: &str, buckets: &BTreeMap<u64, u64>) -> std::fmt::Result {
    for (bucket, count) in buckets {
        writeln!(out, "  bucket {bucket:>4} {label:<10} {count}")?;
    }
    Ok(())
}

/// `50.0` -> `"50"`, `99.9` -> `"99.9"`.
pub fn format_percentile(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{}", p as u64)
    } else {
        format!("{p}")
    }
}
