//! Criterion benchmarks for placa-core primitives
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use placa_core::{CutoffLowpass, DampedLowpass, DelayLine, Diffuser, ModulatedDiffuser};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZE: usize = 512;

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_delay_line(c: &mut Criterion) {
    let mut line = DelayLine::new(SAMPLE_RATE as usize);
    line.set_delay(4453);
    let input = generate_test_signal(BLOCK_SIZE);

    c.bench_function("DelayLine/512", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += line.process(black_box(x));
            }
            black_box(acc)
        })
    });
}

fn bench_diffuser(c: &mut Criterion) {
    let mut diffuser = Diffuser::new(SAMPLE_RATE as usize);
    diffuser.set_delay(1800);
    diffuser.set_gain(0.5);
    let input = generate_test_signal(BLOCK_SIZE);

    c.bench_function("Diffuser/512", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += diffuser.process(black_box(x));
            }
            black_box(acc)
        })
    });
}

fn bench_modulated_diffuser(c: &mut Criterion) {
    let mut diffuser = ModulatedDiffuser::new(SAMPLE_RATE as usize);
    diffuser.set_delay(672);
    diffuser.set_excursion(SAMPLE_RATE);
    diffuser.set_gain(0.5);
    let input = generate_test_signal(BLOCK_SIZE);

    c.bench_function("ModulatedDiffuser/512", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += diffuser.process(black_box(x));
            }
            black_box(acc)
        })
    });
}

fn bench_lowpass(c: &mut Criterion) {
    let mut cutoff = CutoffLowpass::new(SAMPLE_RATE as usize, 2000.0);
    let mut damped = DampedLowpass::new(0.5);
    let input = generate_test_signal(BLOCK_SIZE);

    c.bench_function("CutoffLowpass/512", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += cutoff.process(black_box(x));
            }
            black_box(acc)
        })
    });

    c.bench_function("DampedLowpass/512", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += damped.process(black_box(x));
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    bench_delay_line,
    bench_diffuser,
    bench_modulated_diffuser,
    bench_lowpass
);
criterion_main!(benches);
