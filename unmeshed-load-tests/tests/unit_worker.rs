use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use unmeshed_load_tests::worker::{run, LoadConfig};

fn config(total_requests: usize, concurrency: u32) -> LoadConfig {
    LoadConfig {
        total_requests,
        concurrency,
        max_wait: Some(Duration::from_secs(10)),
        grace_period: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_every_successful_unit_yields_a_sample() {
    let result = run(config(100, 8), |_iteration| async { Ok::<_, String>(()) }).await;

    assert_eq!(result.samples.len(), 100);
    assert_eq!(result.failures, 0);
    assert_eq!(result.completed, 100);
    assert!(result.drained);
}

#[tokio::test]
async fn test_failed_units_count_down_but_add_no_sample() {
    let result = run(config(100, 16), |iteration| async move {
        if iteration % 2 == 1 {
            Err(format!("iteration {iteration} failed"))
        } else {
            Ok(())
        }
    })
    .await;

    assert_eq!(result.samples.len(), 50);
    assert_eq!(result.failures, 50);
    assert_eq!(result.completed, 100);
    assert!(result.drained);
}

#[tokio::test]
async fn test_in_flight_units_never_exceed_concurrency() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let (in_flight_op, peak_op) = (Arc::clone(&in_flight), Arc::clone(&peak));
    let result = run(config(60, 4), move |_iteration| {
        let in_flight = Arc::clone(&in_flight_op);
        let peak = Arc::clone(&peak_op);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, String>(())
        }
    })
    .await;

    assert_eq!(result.completed, 60);
    assert!(peak.load(Ordering::SeqCst) <= 4, "peak concurrency {}", peak.load(Ordering::SeqCst));
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sample_durations_reflect_unit_latency() {
    let result = run(config(5, 5), |_iteration| async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok::<_, String>(())
    })
    .await;

    assert_eq!(result.samples.len(), 5);
    assert!(result.samples.iter().all(|s| s.duration_millis >= 30));
}

#[tokio::test]
async fn test_panicking_unit_still_releases_the_latch() {
    let result = run(config(10, 2), |iteration| async move {
        if iteration == 3 {
            panic!("unit of work blew up");
        }
        Ok::<_, String>(())
    })
    .await;

    assert_eq!(result.completed, 10);
    assert_eq!(result.samples.len(), 9);
    assert!(result.drained);
}

#[tokio::test]
async fn test_grace_expiry_returns_partial_results() {
    let cfg = LoadConfig {
        total_requests: 4,
        concurrency: 4,
        max_wait: Some(Duration::from_millis(100)),
        grace_period: Duration::from_millis(50),
    };
    let result = run(cfg, |iteration| async move {
        if iteration == 0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok::<_, String>(())
    })
    .await;

    assert!(!result.drained);
    assert_eq!(result.completed, 3);
    assert_eq!(result.samples.len(), 3);
    // Missing the grace period is a warning, not a failed run.
    assert_eq!(result.exit_code(), 0);
}

#[tokio::test]
async fn test_exit_code_reflects_failures_only() {
    let clean = run(config(10, 4), |_iteration| async { Ok::<_, String>(()) }).await;
    assert_eq!(clean.exit_code(), 0);

    let failing = run(config(10, 4), |iteration| async move {
        if iteration == 7 {
            Err("engine rejected run".to_string())
        } else {
            Ok(())
        }
    })
    .await;
    assert_eq!(failing.failures, 1);
    assert_eq!(failing.exit_code(), 1);
}

#[tokio::test]
async fn test_zero_requests_finishes_immediately() {
    let result = run(config(0, 0), |_iteration| async { Ok::<_, String>(()) }).await;

    assert!(result.samples.is_empty());
    assert_eq!(result.completed, 0);
    assert!(result.drained);
}
