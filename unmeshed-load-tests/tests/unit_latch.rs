use std::sync::Arc;
use std::time::Duration;

use unmeshed_load_tests::latch::CompletionLatch;

#[tokio::test]
async fn test_zero_count_latch_is_already_open() {
    let latch = CompletionLatch::new(0);
    assert_eq!(latch.remaining(), 0);
    assert!(latch.wait_timeout(Duration::from_millis(10)).await);
}

#[tokio::test]
async fn test_count_down_saturates_at_zero() {
    let latch = CompletionLatch::new(2);
    latch.count_down();
    assert_eq!(latch.remaining(), 1);
    latch.count_down();
    latch.count_down();
    assert_eq!(latch.remaining(), 0);
}

#[tokio::test]
async fn test_wait_timeout_reports_unfinished_work() {
    let latch = CompletionLatch::new(1);
    assert!(!latch.wait_timeout(Duration::from_millis(20)).await);
    assert_eq!(latch.remaining(), 1);
}

#[tokio::test]
async fn test_wait_releases_after_concurrent_count_downs() {
    let latch = Arc::new(CompletionLatch::new(50));
    for i in 0..50u64 {
        let latch = Arc::clone(&latch);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(i % 5)).await;
            latch.count_down();
        });
    }
    assert!(latch.wait_timeout(Duration::from_secs(5)).await);
    assert_eq!(latch.remaining(), 0);
}

#[tokio::test]
async fn test_guard_counts_down_on_drop_and_panic() {
    let latch = Arc::new(CompletionLatch::new(2));

    {
        let _guard = latch.guard();
    }
    assert_eq!(latch.remaining(), 1);

    let guard = latch.guard();
    let handle = tokio::spawn(async move {
        let _guard = guard;
        panic!("unit of work blew up");
    });
    assert!(handle.await.is_err());
    assert_eq!(latch.remaining(), 0);
}
