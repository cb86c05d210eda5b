#![cfg(feature = "effect")]
//! Integration tests for `Task`.
//!
//! Tests cover:
//! - Deferred construction and re-invocation
//! - Functor and Monad operations
//! - Sequential and concurrent combination
//! - Batch aggregation

use optask::effect::Task;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn recording_task(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> Task<&'static str> {
    let log = Arc::clone(log);
    Task::new(move || {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push(label.to_string());
            label
        }
    })
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_task_from_io_is_deferred() {
    let counter = Arc::new(AtomicUsize::new(0));
    let task = {
        let counter = Arc::clone(&counter);
        Task::from_io(move || counter.fetch_add(1, Ordering::SeqCst))
    };

    // Not executed yet
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    task.run().await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn test_task_run_without_polling_does_not_execute_async_body() {
    let counter = Arc::new(AtomicUsize::new(0));
    let task = {
        let counter = Arc::clone(&counter);
        Task::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    let pending = task.run();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    pending.await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn test_task_clones_share_the_computation() {
    let counter = Arc::new(AtomicUsize::new(0));
    let task = {
        let counter = Arc::clone(&counter);
        Task::from_io(move || counter.fetch_add(1, Ordering::SeqCst) + 1)
    };
    let copy = task.clone();

    assert_eq!(task.run().await, 1);
    assert_eq!(copy.run().await, 2);
}

// =============================================================================
// Functor / Monad
// =============================================================================

#[rstest]
#[case(0, 1)]
#[case(20, 41)]
#[case(-3, -5)]
#[tokio::test]
async fn test_task_fmap_then_flat_map(#[case] input: i32, #[case] expected: i32) {
    let task = Task::pure(input)
        .fmap(|n| n * 2)
        .flat_map(|n| Task::pure(n + 1));
    assert_eq!(task.run().await, expected);
}

#[rstest]
#[tokio::test]
async fn test_task_flat_map_reinvokes_upstream() {
    let counter = Arc::new(AtomicUsize::new(0));
    let upstream = {
        let counter = Arc::clone(&counter);
        Task::from_io(move || counter.fetch_add(1, Ordering::SeqCst))
    };
    let chained = upstream.and_then(|n| Task::pure(n * 10));

    assert_eq!(chained.run().await, 0);
    assert_eq!(chained.run().await, 10);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Combination
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_task_map2_runs_left_before_right() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let combined = recording_task(&log, "left").map2(recording_task(&log, "right"), |a, b| {
        format!("{a}+{b}")
    });

    assert_eq!(combined.run().await, "left+right");
    assert_eq!(*log.lock().unwrap(), vec!["left", "right"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_task_par_overlaps_both_sides() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let delayed = |label: &'static str, millis: u64| {
        let log = Arc::clone(&log);
        Task::new(move || {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(format!("start {label}"));
                tokio::time::sleep(Duration::from_millis(millis)).await;
                log.lock().unwrap().push(format!("end {label}"));
                label
            }
        })
    };

    let both = delayed("slow", 20).par(delayed("fast", 10));

    assert_eq!(both.run().await, ("slow", "fast"));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["start slow", "start fast", "end fast", "end slow"]
    );
}

// =============================================================================
// Batch Aggregation
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_task_sequence_array_keeps_index_order() {
    let tasks = (1..=5).map(Task::pure);
    assert_eq!(Task::sequence_array(tasks).run().await, vec![1, 2, 3, 4, 5]);
}

#[rstest]
#[tokio::test]
async fn test_task_sequence_array_empty() {
    let empty: Vec<Task<i32>> = Vec::new();
    assert!(Task::sequence_array(empty).run().await.is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_task_sequence_seq_array_waits_for_each_task() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let tasks = [30_u64, 10, 20].map(|millis| {
        let log = Arc::clone(&log);
        Task::new(move || {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(format!("start {millis}"));
                tokio::time::sleep(Duration::from_millis(millis)).await;
                log.lock().unwrap().push(format!("end {millis}"));
                millis
            }
        })
    });

    assert_eq!(Task::sequence_seq_array(tasks).run().await, vec![30, 10, 20]);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "start 30", "end 30", "start 10", "end 10", "start 20", "end 20"
        ]
    );
}
