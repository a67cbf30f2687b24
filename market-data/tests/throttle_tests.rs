use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::error::Error;
use market_data::throttle::DEFAULT_INTERVAL;
use market_data::Throttle;
use tokio::time::sleep;

#[tokio::test]
async fn test_second_call_within_interval_uses_cache() {
    let throttle = Throttle::new(DEFAULT_INTERVAL);
    let calls = Arc::new(AtomicUsize::new(0));

    let first = {
        let calls = calls.clone();
        throttle
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42u64)
            })
            .await
            .unwrap()
    };

    let second = {
        let calls = calls.clone();
        throttle
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(99u64)
            })
            .await
            .unwrap()
    };

    // The wrapped function ran once; both calls saw the same value
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, 42);
    assert_eq!(second, 42);
}

#[tokio::test]
async fn test_fetch_runs_again_after_interval() {
    let throttle = Throttle::new(Duration::from_millis(20));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let calls = calls.clone();
        throttle
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1u64)
            })
            .await
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    sleep(Duration::from_millis(30)).await;

    let calls2 = calls.clone();
    throttle
        .run(|| async move {
            calls2.fetch_add(1, Ordering::SeqCst);
            Ok(2u64)
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_first_failure_propagates() {
    let throttle: Throttle<u64> = Throttle::new(Duration::from_secs(60));

    let result = throttle
        .run(|| async { Err(Error::Internal("upstream down".to_string())) })
        .await;

    assert!(matches!(result.unwrap_err(), Error::Internal(_)));
}

#[tokio::test]
async fn test_later_failure_returns_stale_value() {
    let throttle = Throttle::new(Duration::from_millis(10));

    let first = throttle.run(|| async { Ok(7u64) }).await.unwrap();
    assert_eq!(first, 7);

    // Let the cache go stale, then fail the refresh
    sleep(Duration::from_millis(20)).await;

    let second = throttle
        .run(|| async { Err(Error::Internal("upstream down".to_string())) })
        .await
        .unwrap();

    assert_eq!(second, 7);
}
