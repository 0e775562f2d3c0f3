//! Performance benchmarks for vendstock-engine

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vendstock_engine::{
    Counters, FixedClock, InventoryRecord, MemoryStore, Reconciler, RecordFilter, StockReport,
    TodaySummary,
};

fn fleet(size: usize) -> Vec<InventoryRecord> {
    (0..size)
        .map(|i| {
            let stamp = format!("2024-03-{:02} {:02}:{:02}:00", 1 + i % 28, i % 24, i % 60);
            InventoryRecord::new(
                format!("VM-{}", i),
                Counters::new((i % 97) as i64, (i % 13) as i64, (i % 7) as i64),
                stamp,
            )
        })
        .collect()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    for size in [100, 1_000, 10_000] {
        let records = fleet(size);

        group.bench_with_input(BenchmarkId::new("updated_on", size), &records, |b, records| {
            let filter = RecordFilter::UpdatedOn("2024-03-10".to_string());
            b.iter(|| records.iter().filter(|r| filter.matches(black_box(r))).count())
        });

        group.bench_with_input(
            BenchmarkId::new("updated_between", size),
            &records,
            |b, records| {
                let filter = RecordFilter::UpdatedBetween {
                    from: Some("2024-03-05 00:00:00".to_string()),
                    to: Some("2024-03-12 23:59:59".to_string()),
                };
                b.iter(|| records.iter().filter(|r| filter.matches(black_box(r))).count())
            },
        );
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("today_summary");

    for size in [100, 1_000, 10_000] {
        let records = fleet(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| TodaySummary::from_records(black_box(records.clone())))
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("reconcile");

    group.bench_function("report_new_machine", |b| {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::at_civil("2024-03-10 10:00:00").unwrap());
        let reconciler = &Reconciler::new(store, clock);
        let mut id = 0u64;

        b.to_async(&runtime).iter(|| {
            id += 1;
            let report = StockReport::new(format!("VM-{}", id), 10, 1, 1);
            async move { reconciler.report_stock(black_box(report)).await }
        })
    });

    group.bench_function("report_existing_machine", |b| {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::at_civil("2024-03-10 10:00:00").unwrap());
        let reconciler = &Reconciler::new(store, clock);
        let mut stock = 0i64;

        b.to_async(&runtime).iter(|| {
            stock += 1;
            let report = StockReport::new("VM-1", stock, 1, 1);
            async move { reconciler.report_stock(black_box(report)).await }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_filters, bench_summary, bench_reconcile);
criterion_main!(benches);
