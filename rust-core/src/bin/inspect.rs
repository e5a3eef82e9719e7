//! Interferometer inspection CLI
//!
//! Loads a channel table, optionally smooths one channel, and prints its
//! spectrum peak, envelope beat and detected peaks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use interferometer::{
    AnalysisConfig, ChannelAnalysis, ChannelStore, FilterKind, PeakPolicy, SamplingDescriptor,
    SpectrumConfig, WavelengthSweep, load_table,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PeakMethod {
    Prominence,
    Derivative,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisKind {
    /// Seconds from the sampling rate
    Time,
    /// Optical frequency over the 1410-1490 nm sweep
    Sweep,
}

#[derive(Parser)]
#[command(name = "interferometer-inspect")]
#[command(author, version, about = "Inspect an interferometer channel table", long_about = None)]
struct Cli {
    /// Table file (.csv, .tsv, .txt, .dat, .xlsx, .ods)
    path: PathBuf,

    /// Channel index to analyse
    #[arg(short, long, default_value = "0")]
    channel: usize,

    /// Sampling rate in Hz
    #[arg(short, long, default_value = "1000")]
    rate: f64,

    /// Zeros appended before the FFT
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    zero_padding: i64,

    /// Subtract the mean before the FFT
    #[arg(long)]
    remove_dc: bool,

    /// Keep the 0 Hz bin
    #[arg(long)]
    keep_first_bin: bool,

    /// Smoothing filter (ma, gauss, savgol)
    #[arg(short, long)]
    filter: Option<String>,

    /// Filter window (sigma for gauss)
    #[arg(short, long, default_value = "5")]
    window: usize,

    /// Peak detection method
    #[arg(long, value_enum, default_value = "prominence")]
    peaks: PeakMethod,

    /// Minimum prominence for the prominence method
    #[arg(long, default_value = "1.0")]
    min_prominence: f64,

    /// Axis the peak positions are reported on
    #[arg(long, value_enum, default_value = "time")]
    axis: AxisKind,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let table = load_table(&cli.path)
        .with_context(|| format!("Failed to load {}", cli.path.display()))?;

    let mut store = ChannelStore::new();
    store.load(table);
    if let Some(summary) = store.summary() {
        println!(
            "{}: {} channels x {} samples",
            cli.path.display(),
            summary.channels,
            summary.samples
        );
        for (name, mean) in summary.channel_names.iter().zip(&summary.channel_means) {
            println!("  {:<16} mean {:.6}", name, mean);
        }
    }

    store
        .select_channel(cli.channel)
        .with_context(|| format!("Cannot select channel {}", cli.channel))?;

    if let Some(name) = &cli.filter {
        let kind = FilterKind::from_name(name)
            .with_context(|| format!("Unknown filter '{}'", name))?;
        store
            .apply_filter(kind, cli.window)
            .with_context(|| format!("{} filter with window {} failed", kind.label(), cli.window))?;
        println!("Applied {} (window {})", kind.label(), cli.window);
    }

    let spectrum = SpectrumConfig {
        remove_dc: cli.remove_dc,
        drop_first_bin: !cli.keep_first_bin,
        ..SpectrumConfig::default()
    }
    .with_zero_padding(cli.zero_padding)?;

    let peak_policy = match cli.peaks {
        PeakMethod::Prominence => PeakPolicy::Prominence {
            min_prominence: cli.min_prominence,
        },
        PeakMethod::Derivative => PeakPolicy::derivative(),
    };

    let axis = match cli.axis {
        AxisKind::Time => SamplingDescriptor::Rate(cli.rate),
        AxisKind::Sweep => SamplingDescriptor::WavelengthSweep(WavelengthSweep::default()),
    };

    let config = AnalysisConfig {
        sampling_rate: cli.rate,
        spectrum,
        peak_policy,
        axis,
    };

    let analysis = ChannelAnalysis::compute(store.active_signal(), &config)
        .context("Analysis failed")?;

    println!("\nChannel {} ({} samples)", cli.channel, store.active_signal().len());
    match analysis.spectrum.peak() {
        Some(p) => println!(
            "  Spectrum peak:  {:.4} Hz, amplitude {:.6} (resolution {:.4} Hz)",
            p.frequency,
            p.amplitude,
            analysis.spectrum.bin_width()
        ),
        None => println!("  Spectrum peak:  n/a"),
    }
    match analysis.envelope_spectrum.peak() {
        Some(p) => println!("  Envelope beat:  {:.4} Hz, amplitude {:.6}", p.frequency, p.amplitude),
        None => println!("  Envelope beat:  n/a"),
    }
    if let (Some(first), Some(last)) = (
        analysis.demodulation.phase.first(),
        analysis.demodulation.phase.last(),
    ) {
        println!("  Phase excursion: {:.4} rad", last - first);
    }

    let coordinates = analysis.peak_coordinates();
    println!("\n{} peaks ({}):", coordinates.len(), config.axis.unit_label());
    for (peak, (x, y)) in analysis.peaks.peaks().iter().zip(&coordinates) {
        println!("  [{:>6}] {:>14.6} {:>14.6}", peak.index, x, y);
    }

    Ok(())
}
