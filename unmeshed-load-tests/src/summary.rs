//! Latency and throughput statistics over a finished set of [`RunSample`]s.
//!
//! Summarizing is a pure function of its input: samples may arrive in any
//! order and the report is the same for every permutation.

use std::collections::BTreeMap;
use std::num::NonZeroU64;

use crate::sample::RunSample;

pub const DEFAULT_PERCENTILES: [f64; 3] = [50.0, 75.0, 95.0];

/// One minute.
pub const DEFAULT_BUCKET_WIDTH_MILLIS: NonZeroU64 = match NonZeroU64::new(60_000) {
    Some(width) => width,
    None => panic!("bucket width must be non-zero"),
};

/// Order statistics of the sample durations. Only present for non-empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub min_millis: u64,
    pub max_millis: u64,
    pub average_millis: f64,
    /// `(percentile, duration)` in the order the percentiles were requested.
    pub percentiles: Vec<(f64, u64)>,
}

impl DurationStats {
    /// Duration recorded for a requested percentile.
    pub fn percentile(&self, p: f64) -> Option<u64> {
        self.percentiles.iter().find(|(q, _)| *q == p).map(|(_, v)| *v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub count: usize,
    /// `None` when there were no samples.
    pub durations: Option<DurationStats>,
    /// Samples per second of wall-clock span; `0.0` for fewer than two samples or a zero span.
    pub throughput_per_sec: f64,
    pub bucket_width_millis: u64,
    /// Bucket index (`start / width`) → number of samples started in it. Sparse.
    pub starts_per_bucket: BTreeMap<u64, u64>,
    /// Bucket index (`end / width`) → number of samples completed in it. Sparse.
    pub completions_per_bucket: BTreeMap<u64, u64>,
}

impl SummaryReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summarizer settings: which percentiles to report and how wide a time bucket is.
#[derive(Debug, Clone, PartialEq)]
pub struct Summarizer {
    percentiles: Vec<f64>,
    bucket_width_millis: NonZeroU64,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENTILES.to_vec(), DEFAULT_BUCKET_WIDTH_MILLIS)
    }
}

impl Summarizer {
    pub fn new(percentiles: Vec<f64>, bucket_width_millis: NonZeroU64) -> Self {
        Self { percentiles, bucket_width_millis }
    }

    pub fn summarize(&self, samples: &[RunSample]) -> SummaryReport {
        let width = self.bucket_width_millis;

        let mut sorted: Vec<u64> = samples.iter().map(|s| s.duration_millis).collect();
        sorted.sort_unstable();

        let durations = match (sorted.first(), sorted.last()) {
            (Some(&min_millis), Some(&max_millis)) => {
                let total: u128 = sorted.iter().map(|&d| d as u128).sum();
                let percentiles = self
                    .percentiles
                    .iter()
                    .filter_map(|&p| percentile(&sorted, p).map(|v| (p, v)))
                    .collect();
                Some(DurationStats {
                    min_millis,
                    max_millis,
                    average_millis: total as f64 / sorted.len() as f64,
                    percentiles,
                })
            }
            _ => None,
        };

        SummaryReport {
            count: samples.len(),
            durations,
            throughput_per_sec: throughput(samples),
            bucket_width_millis: width.get(),
            starts_per_bucket: bucket_counts(samples.iter().map(|s| s.start_time_millis), width),
            completions_per_bucket: bucket_counts(samples.iter().map(RunSample::end_time_millis), width),
        }
    }
}

/// Summarize with the default percentiles (50/75/95) and one-minute buckets.
pub fn summarize(samples: &[RunSample]) -> SummaryReport {
    Summarizer::default().summarize(samples)
}

/// Nearest-rank percentile of an ascending slice: the element at
/// `ceil(p / 100 * n) - 1`, clamped to `[0, n - 1]`. No interpolation.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[u64], p: f64) -> Option<u64> {
    let last = sorted.len().checked_sub(1)?;
    // Multiply before dividing so integral percentiles give an exact rank.
    let rank = (p * sorted.len() as f64 / 100.0).ceil();
    let idx = if rank >= 1.0 { (rank as usize - 1).min(last) } else { 0 };
    Some(sorted[idx])
}

/// Parse a requested percentile, accepting only values in `(0, 100]`.
pub fn validate_percentile(raw: &str) -> Result<f64, String> {
    let p: f64 = raw.trim().parse().map_err(|_| format!("{raw:?} is not a number"))?;
    if p > 0.0 && p <= 100.0 {
        Ok(p)
    } else {
        Err(format!("percentile {p} is outside (0, 100]"))
    }
}

/// Samples per second between the earliest start and the latest end.
///
/// A single sample has no span to measure a rate over, so it reports `0.0`, as
/// does any set whose earliest start equals its latest end.
pub fn throughput(samples: &[RunSample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let earliest_start = samples.iter().map(|s| s.start_time_millis).min();
    let latest_end = samples.iter().map(RunSample::end_time_millis).max();
    match (earliest_start, latest_end) {
        (Some(start), Some(end)) if end > start => samples.len() as f64 / ((end - start) as f64 / 1000.0),
        _ => 0.0,
    }
}

/// Count timestamps per fixed-width bucket keyed by `timestamp / width`.
/// Buckets without any timestamp are absent.
pub fn bucket_counts(timestamps: impl IntoIterator<Item = u64>, width: NonZeroU64) -> BTreeMap<u64, u64> {
    let mut counts = BTreeMap::new();
    for ts in timestamps {
        *counts.entry(ts / width.get()).or_insert(0) += 1;
    }
    counts
}
