use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interferometer::filters::{self, FilterKind};
use interferometer::{demodulate, find_peaks, spectrum, PeakPolicy, SpectrumConfig};

const RATE: f64 = 1000.0;

fn beat_signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / RATE;
            (1.0 + 0.4 * (2.0 * PI * 3.0 * t).cos()) * (2.0 * PI * 120.0 * t).cos()
        })
        .collect()
}

fn bench_spectrum(c: &mut Criterion) {
    let signal = beat_signal(4096);
    let padded = SpectrumConfig::default().with_zero_padding(4096).unwrap_or_default();

    c.bench_function("spectrum_4096", |b| {
        b.iter(|| spectrum(black_box(&signal), RATE, &SpectrumConfig::default()))
    });
    c.bench_function("spectrum_4096_padded", |b| {
        b.iter(|| spectrum(black_box(&signal), RATE, &padded))
    });
}

fn bench_demodulate(c: &mut Criterion) {
    let signal = beat_signal(4096);
    c.bench_function("demodulate_4096", |b| b.iter(|| demodulate(black_box(&signal), RATE)));
}

fn bench_filters_and_peaks(c: &mut Criterion) {
    let signal = beat_signal(4096);
    c.bench_function("gaussian_sigma_50", |b| {
        b.iter(|| filters::apply(black_box(&signal), FilterKind::Gaussian, 50))
    });
    c.bench_function("savgol_31", |b| {
        b.iter(|| filters::apply(black_box(&signal), FilterKind::SavitzkyGolay, 31))
    });
    c.bench_function("find_peaks_prominence", |b| {
        b.iter(|| find_peaks(black_box(&signal), &PeakPolicy::default()))
    });
}

criterion_group!(benches, bench_spectrum, bench_demodulate, bench_filters_and_peaks);
criterion_main!(benches);
