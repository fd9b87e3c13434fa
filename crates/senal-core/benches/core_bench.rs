//! Criterion benchmarks for senal-core synthesis and combination
//!
//! Run with: cargo bench -p senal-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use senal_core::{NoiseSource, Signal, build_time_array_by_count, gaussian_noise, sinewave, sum_signals};

const SAMPLING_RATES: &[f64] = &[48000.0, 96000.0, 320000.0];

fn bench_sinewave(c: &mut Criterion) {
    let mut group = c.benchmark_group("sinewave");

    for &fs in SAMPLING_RATES {
        let time = build_time_array_by_count(100.0, fs, false).unwrap();
        group.bench_with_input(BenchmarkId::new("one_period_100hz", fs as u64), &time, |b, t| {
            b.iter(|| black_box(sinewave(black_box(t), 100.0, 1.0, 0.0)));
        });
    }

    group.finish();
}

fn bench_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_signals");

    for &fs in SAMPLING_RATES {
        let inputs = [
            Signal::sinewave(100.0, 1.0, 0.0, fs, None).unwrap(),
            Signal::sinewave(200.0, 0.5, 0.0, fs, None).unwrap(),
            Signal::sinewave(500.0, 0.25, 0.0, fs, None).unwrap(),
        ];
        group.bench_with_input(BenchmarkId::new("three_sines", fs as u64), &inputs, |b, s| {
            b.iter(|| black_box(sum_signals(black_box(s)).unwrap()));
        });
    }

    group.finish();
}

fn bench_noise(c: &mut Criterion) {
    let domain = vec![0.0; 48000];
    c.bench_function("gaussian_noise_48k", |b| {
        let mut source = NoiseSource::from_seed(1);
        b.iter(|| black_box(gaussian_noise(&domain, 0.0, 1.0, &mut source).unwrap()));
    });
}

criterion_group!(benches, bench_sinewave, bench_sum, bench_noise);
criterion_main!(benches);
