use std::sync::Mutex;

/// One measured unit of work. Times are milliseconds since the run started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSample {
    pub start_time_millis: u64,
    pub duration_millis: u64,
}

impl RunSample {
    pub fn new(start_time_millis: u64, duration_millis: u64) -> Self {
        Self { start_time_millis, duration_millis }
    }

    pub fn end_time_millis(&self) -> u64 {
        self.start_time_millis.saturating_add(self.duration_millis)
    }
}

/// Append-only sample sink shared by concurrent producers.
///
/// Producers only `push`; the single consumer reads with `snapshot` once every
/// producer has reported. Insertion order is whatever order the producers raced in.
#[derive(Debug, Default)]
pub struct RunSampleCollection {
    samples: Mutex<Vec<RunSample>>,
}

impl RunSampleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { samples: Mutex::new(Vec::with_capacity(capacity)) }
    }

    pub fn push(&self, sample: RunSample) {
        // A panicking producer cannot leave a half-written Vec behind, so a poisoned
        // lock still guards valid data.
        self.samples.lock().unwrap_or_else(|e| e.into_inner()).push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of everything pushed so far.
    pub fn snapshot(&self) -> Vec<RunSample> {
        self.samples.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn into_samples(self) -> Vec<RunSample> {
        self.samples.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}
