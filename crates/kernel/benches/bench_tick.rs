use std::hint::black_box;
use std::time::Instant;

use lifegrid_kernel::{GridStore, LifeEngine};

fn bench_step(size: usize, iterations: usize) {
    let grid = GridStore::initialize(size, 0.5, Some(42)).unwrap();
    let mut engine = LifeEngine::new(grid);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(engine.step());
        engine.drain_events();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  step ({size}x{size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_paint(size: usize, iterations: usize) {
    let grid = GridStore::new(size).unwrap();
    let mut engine = LifeEngine::new(grid);
    let n = size as i32;

    let start = Instant::now();
    for i in 0..iterations as i32 {
        let _ = black_box(engine.paint(i % n, (i / n) % n, i % 2 == 0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  paint ({size}x{size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Tick Benchmarks ===\n");

    println!("Generation step:");
    bench_step(25, 10000);
    bench_step(100, 1000);
    bench_step(500, 50);

    println!("\nPaint:");
    bench_paint(25, 100000);
    bench_paint(500, 100000);

    println!("\n=== Done ===");
}
