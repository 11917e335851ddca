// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for notification lifecycle throughput.
//!
//! Measures the cost of:
//! - Admission (`add` into a free slot vs. the pending queue)
//! - A full churn cycle (add, expire via tick, promote)
//! - Snapshot fan-out to subscribers

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::{Duration, Instant};
use toastline::config::ManagerConfig;
use toastline::manager::Manager;
use toastline::notification::{Expiry, Notification};

fn config(limit: usize, duration_ms: u64) -> ManagerConfig {
    ManagerConfig {
        limit,
        duration: Expiry::from_millis(duration_ms),
        static_mode: false,
    }
}

/// Benchmark admission into free slots and into the pending queue.
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_churn");

    group.bench_function("add_100", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut manager = Manager::with_config(config(4, 6000));
            for _ in 0..100 {
                black_box(manager.add_at(Notification::info("bench"), t0));
            }
            black_box(&manager);
        });
    });

    group.finish();
}

/// Benchmark the full expire-evict-promote cycle.
fn bench_churn_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_churn");

    group.bench_function("expire_and_promote_100", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut manager = Manager::with_config(config(2, 10));
            for _ in 0..100 {
                manager.add_at(Notification::info("bench"), t0);
            }
            let mut now = t0;
            while manager.has_notifications() {
                now += Duration::from_millis(10);
                manager.tick_at(now);
            }
            black_box(&manager);
        });
    });

    group.finish();
}

/// Benchmark snapshot delivery to a handful of subscribers.
fn bench_subscriber_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_churn");

    group.bench_function("fanout_8_subscribers", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut manager = Manager::with_config(config(4, 6000));
            for _ in 0..8 {
                manager.subscribe(|notifications| {
                    black_box(notifications.len());
                });
            }
            for _ in 0..50 {
                let id = manager.add_at(Notification::info("bench"), t0);
                manager.remove_at(&id, t0);
            }
            black_box(&manager);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_churn_cycle, bench_subscriber_fanout);
criterion_main!(benches);
