use std::sync::Arc;

use unmeshed_load_tests::sample::{RunSample, RunSampleCollection};

#[test]
fn test_end_time_is_start_plus_duration() {
    assert_eq!(RunSample::new(1_000, 250).end_time_millis(), 1_250);
    assert_eq!(RunSample::new(u64::MAX, 1).end_time_millis(), u64::MAX);
}

#[test]
fn test_concurrent_pushes_are_all_kept() {
    let collection = Arc::new(RunSampleCollection::new());
    assert!(collection.is_empty());

    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let collection = Arc::clone(&collection);
            std::thread::spawn(move || {
                for i in 0..500u64 {
                    collection.push(RunSample::new(t * 1_000 + i, i));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(collection.len(), 4_000);
    let mut starts: Vec<u64> = collection.snapshot().iter().map(|s| s.start_time_millis).collect();
    starts.sort_unstable();
    starts.dedup();
    assert_eq!(starts.len(), 4_000);

    let collection = Arc::try_unwrap(collection).unwrap();
    assert_eq!(collection.into_samples().len(), 4_000);
}
