//! Criterion benchmarks for senal-analysis
//!
//! Run with: cargo bench -p senal-analysis
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use senal_analysis::{
    FilterBankOptions, SosFilter, fft_spectrum, filter_bank, impulse_response, SineSweep,
};
use senal_core::{Signal, sum_signals};
use std::f64::consts::PI;

const SAMPLE_RATE: f64 = 48000.0;

fn generate_sine(size: usize, frequency: f64) -> Vec<f64> {
    (0..size)
        .map(|i| (2.0 * PI * frequency * i as f64 / SAMPLE_RATE).sin())
        .collect()
}

fn bench_fft_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_spectrum");

    for size in [1024, 4800, 16384, 48000] {
        let signal = generate_sine(size, 1000.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, s| {
            b.iter(|| black_box(fft_spectrum(black_box(s), SAMPLE_RATE).unwrap()));
        });
    }

    group.finish();
}

fn bench_filter_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_bank");
    let signal = generate_sine(4800, 1000.0);

    for b in [1, 3] {
        let options = FilterBankOptions {
            bandwidth_fraction: b,
            ..FilterBankOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("fraction", b), &options, |bench, o| {
            bench.iter(|| black_box(filter_bank(black_box(&signal), SAMPLE_RATE, o).unwrap()));
        });
    }

    let filter = SosFilter::butterworth_bandpass(3, 707.1 / 24000.0, 1414.2 / 24000.0).unwrap();
    group.bench_function("single_band_apply", |b| {
        b.iter(|| black_box(filter.apply(black_box(&signal))));
    });

    group.finish();
}

fn bench_summation(c: &mut Criterion) {
    let mut group = c.benchmark_group("summation");

    let inputs = [
        Signal::sinewave(100.0, 1.0, 0.0, SAMPLE_RATE, None).unwrap(),
        Signal::sinewave(150.0, 1.0, 0.0, SAMPLE_RATE, None).unwrap(),
        Signal::sinewave(400.0, 1.0, 0.0, SAMPLE_RATE, None).unwrap(),
    ];
    group.bench_function("sum_then_spectrum", |b| {
        b.iter(|| {
            let sum = sum_signals(black_box(&inputs)).unwrap();
            black_box(fft_spectrum(&sum.amplitude_array, SAMPLE_RATE).unwrap())
        });
    });

    group.finish();
}

fn bench_impulse_response(c: &mut Criterion) {
    let sweep = SineSweep::new(SAMPLE_RATE, 20.0, 20000.0, 1.0).unwrap();
    let x = sweep.generate();
    let y = sweep.inverse_filter().unwrap();

    c.bench_function("impulse_response_1s", |b| {
        b.iter(|| black_box(impulse_response(black_box(&x), black_box(&y), SAMPLE_RATE).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_fft_spectrum,
    bench_filter_bank,
    bench_summation,
    bench_impulse_response
);
criterion_main!(benches);
