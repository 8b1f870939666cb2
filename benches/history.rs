#![allow(clippy::unwrap_used)]
//! Benchmarks for history serialization and deserialization

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use qrstudio::history::{HistoryEntry, StyleOptions};
use std::hint::black_box;

fn create_full_history() -> Vec<HistoryEntry> {
    // A full history at the cap, with a data-URI logo on every other entry
    // to exercise realistic payload sizes
    (0..10)
        .map(|i| {
            let style = StyleOptions {
                fg_color: "#102030".to_string(),
                bg_color: "#fdfeff".to_string(),
                logo: (i % 2 == 0).then(|| format!("data:image/png;base64,{}", "QUJD".repeat(256))),
            };
            HistoryEntry::new(format!("https://example.com/page/{i}"), &style)
        })
        .collect()
}

fn bench_history_serialization(c: &mut Criterion) {
    let entries = create_full_history();

    c.bench_function("history_serialize", |b| {
        b.iter(|| {
            let json = serde_json::to_string(black_box(&entries)).unwrap();
            black_box(json);
        });
    });
}

fn bench_history_deserialization(c: &mut Criterion) {
    let entries = create_full_history();
    let json = serde_json::to_string(&entries).unwrap();

    c.bench_function("history_deserialize", |b| {
        b.iter(|| {
            let deserialized: Vec<HistoryEntry> = serde_json::from_str(black_box(&json)).unwrap();
            black_box(deserialized);
        });
    });
}

fn bench_history_round_trip(c: &mut Criterion) {
    let entries = create_full_history();

    c.bench_function("history_round_trip", |b| {
        b.iter(|| {
            let json = serde_json::to_string(black_box(&entries)).unwrap();
            let deserialized: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
            black_box(deserialized);
        });
    });
}

criterion_group!(
    benches,
    bench_history_serialization,
    bench_history_deserialization,
    bench_history_round_trip
);
criterion_main!(benches);
