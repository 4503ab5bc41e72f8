use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tablebase_store::prelude::*;

fn sample_record(i: usize) -> Record {
    Record::new("id")
        .with("id", format!("E{i:05}"))
        .with("name", format!("Employee {i}"))
        .with("department", if i % 3 == 0 { "Engineering" } else { "Sales" })
        .with("salary", (40_000 + i * 10) as u64)
}

fn sample_records(n: usize) -> Vec<Record> {
    (0..n).map(sample_record).collect()
}

fn loaded_store(n: usize) -> RecordStore {
    let mut store = RecordStore::new();
    store.load(sample_records(n));
    store
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("add", size), &size, |b, &size| {
            b.iter_batched(
                || loaded_store(size),
                |mut store| {
                    store.add(sample_record(size)).ok();
                    black_box(store)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("update_last", size), &size, |b, &size| {
            let key = format!("E{:05}", size - 1);
            b.iter_batched(
                || loaded_store(size),
                |mut store| {
                    store
                        .update(&key, RecordPatch::new().with("salary", 99_000_u64))
                        .ok();
                    black_box(store)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("remove_first", size), &size, |b, &size| {
            b.iter_batched(
                || loaded_store(size),
                |mut store| black_box(store.remove("E00000").ok()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");

    for size in [100, 1_000, 10_000] {
        let store = loaded_store(size);
        let key = format!("E{:05}", size / 2);

        group.bench_with_input(BenchmarkId::new("find", size), &size, |b, _| {
            b.iter(|| black_box(store.find(&key)));
        });

        let search = QueryConfig::all().with_filter(FieldFilter::contains("department", "eng"));
        group.bench_with_input(BenchmarkId::new("search", size), &size, |b, _| {
            b.iter(|| black_box(store.query(&search).len()));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let columns = vec![
        Column::text("id"),
        Column::text("name"),
        Column::text("department"),
        Column::number("salary"),
    ];
    let store = loaded_store(1_000);

    c.bench_function("render_1000_rows", |b| {
        let mut view = TextTableRenderer::new(columns.clone());
        b.iter(|| {
            view.render(store.all());
            black_box(view.output().len())
        });
    });
}

criterion_group!(benches, bench_mutations, bench_reads, bench_render);
criterion_main!(benches);
