//! Tests for the rate limiter

use super::limiter::RateLimiter;
use crate::config::RateLimitConfig;
use std::sync::Arc;
use std::time::Duration;

fn limiter(limit: u32, window_seconds: u64) -> RateLimiter {
    RateLimiter::new(&RateLimitConfig {
        limit,
        window_seconds,
    })
}

#[test]
fn test_allows_within_limit() {
    let limiter = limiter(10, 60);

    for i in 0..10 {
        let decision = limiter.admit("source-1");
        assert!(decision.allowed, "event {} should be admitted", i);
    }
}

#[test]
fn test_blocks_over_limit() {
    let limiter = limiter(5, 60);

    for _ in 0..5 {
        assert!(limiter.admit("source-1").allowed);
    }

    let decision = limiter.admit("source-1");
    assert!(!decision.allowed);
    assert!(decision.retry_after_secs.is_some());
}

#[test]
fn test_exactly_limit_admitted_regardless_of_excess() {
    let limiter = limiter(10, 60);

    let admitted = (0..25).filter(|_| limiter.admit("source-1").allowed).count();
    assert_eq!(admitted, 10);
}

#[test]
fn test_different_keys_independent() {
    let limiter = limiter(2, 60);

    limiter.admit("key1");
    limiter.admit("key1");
    assert!(!limiter.admit("key1").allowed);

    assert!(limiter.admit("key2").allowed);
}

#[test]
fn test_remaining_count() {
    let limiter = limiter(5, 60);

    let decision = limiter.admit("source-1");
    assert_eq!(decision.remaining, 4);

    limiter.admit("source-1");
    limiter.admit("source-1");

    let decision = limiter.admit("source-1");
    assert_eq!(decision.remaining, 1);
}

#[test]
fn test_rejected_events_not_recorded() {
    let limiter = RateLimiter::with_window(2, Duration::from_millis(100));

    assert!(limiter.admit("source-1").allowed);
    assert!(limiter.admit("source-1").allowed);

    // Hammer the key while full: none of these may consume capacity
    for _ in 0..20 {
        assert!(!limiter.admit("source-1").allowed);
    }

    // Once the two admitted events expire, full capacity is back
    std::thread::sleep(Duration::from_millis(150));
    assert!(limiter.admit("source-1").allowed);
    assert!(limiter.admit("source-1").allowed);
}

#[test]
fn test_window_slides_without_clock_alignment() {
    let limiter = RateLimiter::with_window(2, Duration::from_millis(120));

    assert!(limiter.admit("source-1").allowed);
    std::thread::sleep(Duration::from_millis(70));
    assert!(limiter.admit("source-1").allowed);
    assert!(!limiter.admit("source-1").allowed);

    // First event leaves the window, second is still inside it
    std::thread::sleep(Duration::from_millis(70));
    assert!(limiter.admit("source-1").allowed);
    assert!(!limiter.admit("source-1").allowed);
}

#[test]
fn test_idle_key_decided_as_new() {
    let limiter = RateLimiter::with_window(3, Duration::from_millis(50));

    for _ in 0..3 {
        limiter.admit("source-1");
    }
    assert!(!limiter.admit("source-1").allowed);

    std::thread::sleep(Duration::from_millis(80));

    let decision = limiter.admit("source-1");
    assert!(decision.allowed);
    assert_eq!(decision.current_count, 0);
}

#[test]
fn test_cleanup_evicts_idle_keys() {
    let limiter = RateLimiter::with_window(100, Duration::from_millis(50));

    limiter.admit("key1");
    limiter.admit("key2");
    assert_eq!(limiter.tracked_keys(), 2);

    std::thread::sleep(Duration::from_millis(100));
    limiter.cleanup();

    assert_eq!(limiter.tracked_keys(), 0);
    assert!(limiter.admit("key1").allowed);
}

#[test]
fn test_cleanup_keeps_active_keys() {
    let limiter = RateLimiter::with_window(100, Duration::from_secs(60));

    limiter.admit("active");
    limiter.cleanup();

    assert_eq!(limiter.tracked_keys(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_admits_never_exceed_limit() {
    // Repeated stress runs with deterministic counting
    for _ in 0..10 {
        let limiter = Arc::new(RateLimiter::with_window(5, Duration::from_secs(60)));

        let mut handles = Vec::new();
        for _ in 0..64 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.admit("shared-source").allowed
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 5);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_distinct_keys_all_admitted() {
    let limiter = Arc::new(RateLimiter::with_window(1, Duration::from_secs(60)));

    let mut handles = Vec::new();
    for i in 0..64 {
        let limiter = Arc::clone(&limiter);
        handles.push(tokio::spawn(async move {
            limiter.admit(&format!("source-{}", i)).allowed
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
