use std::hint::black_box;
use std::io;

use criterion::{criterion_group, criterion_main, Criterion};
use tinyhouse::config::Config;
use tinyhouse::search::engine;

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    let config = Config {
        board: "   k,    ,P   ,KR  ".to_string(),
        print_depth: false,
        ..Config::default()
    };

    // Sanity before timing: the scenario must solve to a definite value.
    let reference = engine::run(&config, io::sink()).unwrap();
    assert!((-1..=1).contains(&reference.value));

    group.bench_function("krp_vs_k", |b| {
        b.iter(|| {
            let solution = engine::run(black_box(&config), io::sink()).unwrap();
            black_box(solution.value)
        });
    });

    group.finish();
}

criterion_group!(benches, solve_benchmark);
criterion_main!(benches);
