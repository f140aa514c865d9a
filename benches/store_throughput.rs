//! Tool store throughput benchmark.
//!
//! Measures record_access and toggle_favorite against the in-memory backend
//! at different pre-filled collection sizes using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use toolhub_core::storage::MemoryStore;
use toolhub_core::tools::{ToolInput, ToolStore};

fn tool(i: usize) -> ToolInput {
    ToolInput::new(
        format!("tool-{}", i),
        "icon",
        "category",
        format!("https://example.com/tools/{}", i),
    )
}

fn bench_record_access(c: &mut Criterion) {
    let store = ToolStore::new(Arc::new(MemoryStore::new()));
    for i in 0..10 {
        store.record_access(&tool(i));
    }

    let mut i = 0usize;
    c.bench_function("record_access", |b| {
        b.iter(|| {
            i = (i + 1) % 20;
            store.record_access(black_box(&tool(i)))
        })
    });
}

fn bench_toggle_favorite(c: &mut Criterion) {
    let sizes: &[usize] = &[0, 10, 100, 1000];

    let mut group = c.benchmark_group("toggle_favorite");
    for &size in sizes {
        let store = ToolStore::new(Arc::new(MemoryStore::new()));
        for i in 0..size {
            store.toggle_favorite(&tool(i));
        }
        let probe = tool(size + 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &probe, |b, p| {
            b.iter(|| store.toggle_favorite(black_box(p)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_record_access, bench_toggle_favorite);
criterion_main!(benches);
