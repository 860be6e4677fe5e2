//! Benchmarks for Sleuthline timelines
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sleuthline::chronology::Chronology;
use sleuthline::graph::{build_graph, GraphOptions};
use sleuthline::query::RecordQuery;
use sleuthline::storage::{Field, Record, RecordStore, Schema};

const PEOPLE: [&str; 8] = [
    "Alice", "Bob", "Carol", "Dmitri", "Eve", "Farah", "Gustav", "Hana",
];

fn create_test_store(count: usize) -> RecordStore {
    let mut store = RecordStore::new("bench", Schema::Extended);

    for i in 0..count {
        // Shuffle instants so sorting has work to do
        let minutes = (i * 7919) % (count.max(1) * 10);
        let day = 1 + (minutes / 1440) % 28;
        let hour = (minutes / 60) % 24;
        let minute = minutes % 60;

        store.append(
            Record::new()
                .with(Field::Date, format!("2024-03-{:02}", day))
                .with(Field::Time, format!("{:02}:{:02}", hour, minute))
                .with(Field::Location, if i % 3 == 0 { "Berlin" } else { "Lisbon" })
                .with(Field::PersonEntity, PEOPLE[i % PEOPLE.len()])
                .with(Field::Description, format!("Observed event {}", i))
                .with(Field::Source, if i % 2 == 0 { "Twitter" } else { "Telegram" })
                .with(
                    Field::RelatedEntities,
                    format!(
                        "{}; {}",
                        PEOPLE[(i + 1) % PEOPLE.len()],
                        PEOPLE[(i + 3) % PEOPLE.len()]
                    ),
                )
                .with(Field::RelationshipType, "contact"),
        );
    }

    store
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in [100, 1000, 10000] {
        let store = create_test_store(size);
        let query = RecordQuery::new()
            .contains(Field::Location, "BERLIN")
            .contains(Field::Source, "twit");

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("substring_{}", size), |b| {
            b.iter(|| store.query(black_box(&query)).len())
        });
    }

    group.finish();
}

fn bench_chronology(c: &mut Criterion) {
    let mut group = c.benchmark_group("chronology");

    for size in [100, 1000, 10000] {
        let store = create_test_store(size);
        let set = store.as_set();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| Chronology::build(black_box(&set)).unwrap().len())
        });
    }

    group.finish();
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");

    // Edge count grows quadratically with the size of each entity group
    for size in [100, 500] {
        let store = create_test_store(size);
        let set = store.as_set();
        let chronology = Chronology::build(&set).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| {
                build_graph(black_box(&chronology), &GraphOptions::default())
                    .unwrap()
                    .edges
                    .len()
            })
        });

        let dedup = GraphOptions {
            dedup_edges: true,
            ..GraphOptions::default()
        };
        group.bench_function(format!("build_dedup_{}", size), |b| {
            b.iter(|| build_graph(black_box(&chronology), &dedup).unwrap().edges.len())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query, bench_chronology, bench_graph);
criterion_main!(benches);
