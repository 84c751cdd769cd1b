//! Grid throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nori_core::{Cell, Grid};

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(200);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("put_stream", |b| {
        b.iter(|| {
            let mut grid = Grid::new(80, 25);
            for ch in black_box(&text).chars() {
                grid.put(Cell::new(ch));
            }
            black_box(grid)
        })
    });
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    group.bench_function("scroll_1000_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(80, 25);
            for _ in 0..1000 {
                grid.put(Cell::new('x'));
                grid.carriage_return();
                grid.line_feed();
            }
            black_box(grid)
        })
    });
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    group.bench_function("resize_cycle", |b| {
        b.iter(|| {
            let mut grid = Grid::new(80, 25);
            for ch in "some content on the screen".chars() {
                grid.put(Cell::new(ch));
            }
            for _ in 0..100 {
                grid.resize(120, 40);
                grid.resize(80, 25);
            }
            black_box(grid)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_put, bench_scroll, bench_resize);
criterion_main!(benches);
