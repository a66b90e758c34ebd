//! Benchmarks for the taxonomy rollup.
//!
//! Run with: cargo bench -p impact-graph

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use impact_graph::{AggregationOrder, Aggregator, ProcessGraph};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn seeded_with_values() -> ProcessGraph {
    let mut graph = ProcessGraph::sdlc_seed().unwrap();
    let leaves: Vec<String> = graph.leaves().map(|n| n.id.clone()).collect();
    for (i, leaf) in leaves.iter().enumerate() {
        graph.set_leaf_value(leaf, (i * 37 % 101) as f64).unwrap();
    }
    graph
}

/// Complete tree with the given fan-out down to the leaf level.
fn wide_tree(fan_out: usize) -> ProcessGraph {
    let mut graph = ProcessGraph::new();
    graph.add_root("0").unwrap();
    let mut frontier = vec!["0".to_string()];
    for _ in 0..5 {
        let mut next = Vec::with_capacity(frontier.len() * fan_out);
        for parent in &frontier {
            for k in 0..fan_out {
                let id = format!("{parent}.{k}");
                graph.add_node(id.clone(), parent).unwrap();
                next.push(id);
            }
        }
        frontier = next;
    }
    for (i, leaf) in frontier.iter().enumerate() {
        graph.set_leaf_value(leaf, (i % 100) as f64).unwrap();
    }
    graph
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_seed_rollup(c: &mut Criterion) {
    let graph = seeded_with_values();

    let mut group = c.benchmark_group("seed_rollup");
    for order in [AggregationOrder::Topological, AggregationOrder::LevelDescending] {
        let aggregator = Aggregator::new(order);
        group.bench_with_input(BenchmarkId::from_parameter(order), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut g| black_box(aggregator.recompute_all(&mut g).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_wide_tree_rollup(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_tree_rollup");
    for fan_out in [2usize, 4, 6] {
        let graph = wide_tree(fan_out);
        group.throughput(Throughput::Elements(graph.node_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fan_out), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut g| black_box(impact_graph::recompute_all(&mut g).unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let graph = seeded_with_values();
    let json = graph.to_json().unwrap();

    c.bench_function("snapshot_export", |b| {
        b.iter(|| black_box(graph.to_json().unwrap()))
    });
    c.bench_function("snapshot_import", |b| {
        b.iter(|| black_box(ProcessGraph::from_json(black_box(&json)).unwrap()))
    });
}

criterion_group!(rollup, bench_seed_rollup, bench_wide_tree_rollup);
criterion_group!(snapshot, bench_snapshot);

criterion_main!(rollup, snapshot);
