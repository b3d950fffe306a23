#[macro_use]
extern crate criterion;
extern crate mandelmovie;

use criterion::Criterion;
use mandelmovie::{render, RenderConfig};

fn job(threads: usize) -> mandelmovie::RenderJob {
    RenderConfig {
        width: 200,
        height: 200,
        max_iterations: 256,
        threads,
        ..RenderConfig::default()
    }
    .job()
}

fn one_thread(c: &mut Criterion) {
    let job = job(1);
    c.bench_function("render 200x200, 1 thread", move |b| b.iter(|| render(&job)));
}

fn four_threads(c: &mut Criterion) {
    let job = job(4);
    c.bench_function("render 200x200, 4 threads", move |b| b.iter(|| render(&job)));
}

fn twenty_threads(c: &mut Criterion) {
    let job = job(20);
    c.bench_function("render 200x200, 20 threads", move |b| {
        b.iter(|| render(&job))
    });
}

criterion_group!(benches, one_thread, four_threads, twenty_threads);
criterion_main!(benches);
