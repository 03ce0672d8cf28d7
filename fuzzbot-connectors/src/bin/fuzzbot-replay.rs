//! fuzzbot-replay
//!
//! Runs the avoidance controller over a recorded sensor trace and prints one
//! status line per tick.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fuzzbot_connectors::{load_config, replay, ConsoleSink, ControllerFile, JsonLinesSink, TraceRobot};
use fuzzbot_core::{TickReport, TickSink};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "fuzzbot-replay")]
#[command(version)]
#[command(about = "Replay a proximity sensor trace through the fuzzy avoidance controller", long_about = None)]
struct Cli {
    /// JSON Lines trace, one object of sensor readings per timestep
    #[arg(value_name = "TRACE")]
    trace: PathBuf,

    /// Controller configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write every tick as JSON Lines to this file
    #[arg(short, long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Basic simulation timestep in milliseconds
    #[arg(long, value_name = "MS", default_value_t = fuzzbot_connectors::DEFAULT_TIME_STEP_MS)]
    time_step: u32,

    /// More diagnostics on stderr (repeat for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => ControllerFile::default(),
    };

    let trace = File::open(&cli.trace).with_context(|| format!("opening trace {}", cli.trace.display()))?;
    let mut robot = TraceRobot::from_reader(BufReader::new(trace))
        .with_context(|| format!("reading trace {}", cli.trace.display()))?
        .with_time_step(cli.time_step);

    let mut console = ConsoleSink::new(io::stdout().lock());
    let mut recorder = match &cli.record {
        Some(path) => {
            let out = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Some(JsonLinesSink::new(BufWriter::new(out)))
        }
        None => None,
    };

    let mut sink = |report: &TickReport| {
        console.record(report);
        if let Some(recorder) = recorder.as_mut() {
            recorder.record(report);
        }
    };
    let summary = replay(&mut robot, &file, &mut sink)?;

    let _stdout = console.finish().context("writing tick lines")?;
    if let Some(recorder) = recorder {
        let records = recorder.records();
        let _file = recorder.finish().context("writing tick records")?;
        log::info!("Recorded {records} ticks");
    }

    log::info!(
        "Replayed {} ticks ({} fallback) over {} ms of simulated time",
        summary.ticks,
        summary.fallback_ticks,
        summary.elapsed_ms
    );
    Ok(())
}
