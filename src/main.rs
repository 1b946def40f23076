use std::{
    fs::File,
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::{info, warn};

use cpu_scheduling_simulator::{
    config::{ProcessSpec, Workload, DEFAULT_QUANTUM},
    report,
    scheduler::{timeline, Algorithm, ProcessRunner, SchedulerEngine, TickResult},
};

/// Discrete-time CPU scheduling simulator (FCFS, SJF, SRTF, Round-Robin).
#[derive(Debug, Parser)]
struct Opts {
    /// Scheduling algorithm. Overrides the workload's own setting.
    #[clap(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Process as NAME:CPU:ARRIVAL[:QUANTUM]. May be repeated.
    #[clap(short, long = "process")]
    processes: Vec<ProcessSpec>,

    /// Workload as inline JSON, or f:PATH / file:PATH to read it from a file.
    #[clap(short, long)]
    workload: Option<String>,

    /// Quantum for processes that do not set one.
    #[clap(short, long, default_value_t = DEFAULT_QUANTUM)]
    quantum: i64,

    /// Milliseconds between ticks. Defaults to 1000 in the terminal UI and
    /// 0 (as fast as possible) with --headless.
    #[clap(short, long)]
    tick_ms: Option<u64>,

    /// Run without the terminal UI and print the timeline and statistics.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    headless: bool,

    /// Write logs to this file. The terminal UI logs nowhere otherwise.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(opts: &Opts) -> Result<()> {
    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);

    match (&opts.log_file, opts.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            simplelog::WriteLogger::init(llv, lcfg.build(), file)?;
        }
        (None, true) => simplelog::TermLogger::init(
            llv,
            lcfg.build(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        )?,
        (None, false) => {}
    }
    Ok(())
}

fn build_engine(opts: &Opts) -> Result<(SchedulerEngine, Algorithm)> {
    let mut engine = SchedulerEngine::new();

    let mut workload = match &opts.workload {
        Some(input) => Workload::parse(input)?,
        None => Workload::default(),
    };
    workload.processes.extend(opts.processes.iter().cloned());
    if workload.processes.is_empty() {
        bail!("No processes given; use --process or --workload");
    }
    workload.load_into(&mut engine, opts.quantum)?;

    let algorithm = opts.algorithm.or(workload.algorithm).unwrap_or_default();
    Ok((engine, algorithm))
}

fn print_report(engine: &SchedulerEngine, trace: &[TickResult]) {
    if !trace.is_empty() {
        println!("{}", report::format_timeline(&timeline::segments(trace)));
    }
    let stats = if engine.is_complete() {
        engine.statistics()
    } else {
        warn!("Run did not complete; statistics cover finished processes only");
        engine.partial_statistics()
    };
    match stats {
        Ok(stats) => println!("{}", report::format_statistics(&stats)),
        Err(e) => warn!("No statistics: {}", e),
    }
}

fn run_headless(mut engine: SchedulerEngine, tick: Duration) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::Relaxed);
    })
    .context("Error setting Ctrl-C handler")?;

    let mut trace = Vec::new();
    while !shutdown.load(Ordering::Relaxed) {
        let result = engine.tick()?;
        for line in result.history() {
            info!("{}", line);
        }
        let complete = result.complete;
        trace.push(result);
        if complete {
            break;
        }
        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }
    engine.stop();

    print_report(&engine, &trace);
    Ok(())
}

fn run_interactive(engine: SchedulerEngine, tick: Duration) -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All))?;

    let mut runner = ProcessRunner::new(engine, tick)?;
    while runner.run()? {}
    let engine = runner.into_engine();

    execute!(io::stdout(), Clear(ClearType::All))?;
    print_report(&engine, &[]);
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(&opts)?;

    let (mut engine, algorithm) = build_engine(&opts)?;
    engine.start_run(algorithm)?;

    if opts.headless {
        run_headless(engine, Duration::from_millis(opts.tick_ms.unwrap_or(0)))
    } else {
        run_interactive(engine, Duration::from_millis(opts.tick_ms.unwrap_or(1000)))
    }
}
