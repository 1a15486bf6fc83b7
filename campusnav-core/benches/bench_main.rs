use std::hint::black_box;

use campusnav_core::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use geo::LineString;

/// Square lattice of `size` x `size` corridors, 10 m apart
fn lattice_lines(size: i32) -> Vec<LineString<f64>> {
    let step = 0.00009;
    let mut lines = Vec::new();
    for i in 0..size {
        let fixed = f64::from(i) * step;
        let row: Vec<(f64, f64)> = (0..size).map(|j| (f64::from(j) * step, fixed)).collect();
        let column: Vec<(f64, f64)> = (0..size).map(|j| (fixed, f64::from(j) * step)).collect();
        lines.push(row.into());
        lines.push(column.into());
    }
    lines
}

fn bench_build(c: &mut Criterion) {
    let lines = lattice_lines(60);
    let config = GraphConfig::default();

    c.bench_function("build_graph 60x60", |b| {
        b.iter(|| build_graph_from_lines(black_box(&lines), &config));
    });
}

fn bench_route(c: &mut Criterion) {
    let graph = build_graph_from_lines(&lattice_lines(60), &GraphConfig::default());
    let start = nearest_node(&graph, 0.0, 0.0).unwrap();
    let goal = nearest_node(&graph, 0.0053, 0.0053).unwrap();
    let limits = SearchLimits::unlimited();

    c.bench_function("a_star heap 60x60", |b| {
        b.iter(|| {
            find_path_with::<HeapFrontier>(&graph, black_box(start), black_box(goal), &limits)
        });
    });
    c.bench_function("a_star sorted 60x60", |b| {
        b.iter(|| {
            find_path_with::<SortedFrontier>(&graph, black_box(start), black_box(goal), &limits)
        });
    });
    c.bench_function("nearest_node 60x60", |b| {
        b.iter(|| nearest_node(&graph, black_box(0.0027), black_box(0.0031)));
    });
}

criterion_group!(benches, bench_build, bench_route);
criterion_main!(benches);
