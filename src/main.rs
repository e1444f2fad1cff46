use std::path::PathBuf;
use std::time::Instant;

use bytesize::ByteSize;
use colored::Colorize;
use rayon::prelude::*;
use structopt::StructOpt;

use gnss_acq_core::acquisition::{acquire, AcquisitionParams};
use gnss_acq_core::buffer::{Iq, SampleBuffer};
use gnss_acq_core::code::{code_fft, read_code_file};
use gnss_acq_core::engine::Engine;
use gnss_acq_core::ingest::read_raw_if_file;
use gnss_acq_core::util::pretty_print;
use gnss_acq_core::wisdom::import_wisdom;

#[derive(StructOpt)]
#[structopt(name = "gnss-acq-core", about = "GNSS acquisition demo: one worker thread per PRN")]
struct Options {
    /// Raw IF recording to acquire against.
    #[structopt(short = "f", long, default_value = "resources/nov_3_time_18_48_st_ives")]
    file: PathBuf,

    /// Local code references to search for, one flat {-1,0,+1} file per PRN.
    #[structopt(short = "c", long, required = true)]
    code_files: Vec<PathBuf>,

    /// Sampling type of the raw file: 1 (real) or 2 (interleaved I/Q).
    #[structopt(long, default_value = "2")]
    iq: u8,

    /// Sample rate, in Hz.
    #[structopt(long, default_value = "2046000")]
    sample_rate: f64,

    /// Intermediate frequency to mix down from, in Hz.
    #[structopt(long, default_value = "0")]
    if_hz: f64,

    /// Offset into the file to start acquiring at, in seconds.
    #[structopt(long, default_value = "0")]
    toff: f64,

    /// Code period, in seconds (1ms for GPS L1 C/A).
    #[structopt(long, default_value = "0.001")]
    code_period: f64,

    /// Number of code periods to non-coherently integrate.
    #[structopt(long, default_value = "1")]
    num_periods: usize,

    /// Doppler search center, in Hz.
    #[structopt(long, default_value = "0")]
    dop_center: f64,

    /// Doppler search half-width, in Hz.
    #[structopt(long, default_value = "5000")]
    max_dop: f64,

    /// Minimum C/N0, in dB-Hz, to accept the acquisition.
    #[structopt(long, default_value = "30")]
    cn0_threshold: f64,

    /// Optional file listing FFT transform sizes to pre-warm the plan cache with.
    #[structopt(long, default_value = "")]
    wisdom_file: PathBuf,

    /// Enable ANSI escapes on terminals that don't default to them (Windows consoles).
    #[structopt(long)]
    console_vt_escape: bool,
}

/// One PRN's outcome, carried back from its worker so the main thread can
/// print results in a stable, PRN-ordered sequence regardless of which
/// worker finished first.
struct PrnOutcome {
    code_file: PathBuf,
    result: Result<gnss_acq_core::types::AcquisitionResult, gnss_acq_core::error::CoreError>,
}

fn acquire_one(
    engine: &Engine,
    buff: &SampleBuffer,
    code_file: &PathBuf,
    n: usize,
    params: &AcquisitionParams,
) -> PrnOutcome {
    let result = read_code_file(code_file)
        .and_then(|code| code_fft(engine, &code, n))
        .and_then(|fft| acquire(engine, buff, &fft, params));
    PrnOutcome {
        code_file: code_file.clone(),
        result,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opt = Options::from_args();

    if opt.console_vt_escape {
        colored::control::set_override(true);
    }

    let iq = match opt.iq {
        1 => Iq::Real,
        2 => Iq::Complex,
        other => return Err(format!("unsupported --iq value {other}, expected 1 or 2").into()),
    };

    let engine = Engine::new();
    import_wisdom(&engine, &opt.wisdom_file);

    println!(
        "gnss-acq-core: {} ({}) sample_rate={} prns={}",
        opt.file.to_string_lossy().green(),
        ByteSize::b(opt.file.metadata()?.len()).to_string_as(false).bold(),
        format!("{} KHz", opt.sample_rate / 1000.0).bold(),
        opt.code_files.len(),
    );

    let n = (opt.sample_rate * opt.code_period).round() as usize;
    let duration_sec = opt.code_period * opt.num_periods as f64;
    let buff = read_raw_if_file(&opt.file, opt.sample_rate, iq, opt.toff, duration_sec)?;

    let fds_len = (2.0 * opt.max_dop / (0.5 / opt.code_period)).floor() as usize + 1;
    log::debug!(
        "power grid: {fds_len} Doppler bins x {n} code offsets ({}) per PRN",
        pretty_print((fds_len * n * std::mem::size_of::<f64>()) as u64),
    );

    let params = AcquisitionParams {
        ix: 0,
        n,
        fs: opt.sample_rate,
        fi: opt.if_hz,
        dop_center: opt.dop_center,
        max_dop: opt.max_dop,
        t: opt.code_period,
        num_periods: opt.num_periods,
        cn0_threshold_db: opt.cn0_threshold,
    };

    // One `search_code` worker per PRN (§5): each pulls the shared sample
    // buffer and engine read-only and owns its own scratch and power grid,
    // so rayon can run them across the default thread pool with no
    // synchronization beyond what `Engine` already provides.
    let ts = Instant::now();
    let mut outcomes: Vec<PrnOutcome> = opt
        .code_files
        .par_iter()
        .map(|code_file| acquire_one(&engine, &buff, code_file, n, &params))
        .collect();
    outcomes.sort_by(|a, b| a.code_file.cmp(&b.code_file));

    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => println!(
                "{} {}: doppler={} Hz code_offset={} cn0={}",
                "acquired".green().bold(),
                outcome.code_file.display(),
                format!("{:.1}", result.doppler_hz).bold(),
                result.code_offset,
                format!("{:.1} dB-Hz", result.cn0_db).bold(),
            ),
            Err(e) => println!(
                "{} {}: {e}",
                "not acquired".yellow(),
                outcome.code_file.display()
            ),
        }
    }
    println!("duration: {} msec", ts.elapsed().as_millis());
    Ok(())
}
