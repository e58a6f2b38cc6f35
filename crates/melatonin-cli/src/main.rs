use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use melatonin_lib::{
    dose::BaseDoseModel,
    io::series::read_series,
    metrics::baseline::Baseline,
    processor::{ProcessorConfig, WindowProcessor},
    signal::Series,
    timing::{parse_wall_clock, ClockZone, Timing},
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "melatonin",
    version,
    about = "Biometric baseline deviations and dose windows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ClockArg {
    Local,
    Utc,
    #[value(name = "as-written")]
    AsWritten,
}

impl From<ClockArg> for ClockZone {
    fn from(arg: ClockArg) -> Self {
        match arg {
            ClockArg::Local => ClockZone::Local,
            ClockArg::Utc => ClockZone::Utc,
            ClockArg::AsWritten => ClockZone::AsWritten,
        }
    }
}

#[derive(clap::Args)]
struct SeriesArgs {
    /// HRV series (.csv with value,timestamp[,quality] or .json array)
    #[arg(long)]
    hrv: PathBuf,
    /// Resting heart rate series
    #[arg(long)]
    rhr: PathBuf,
    /// Respiratory rate series
    #[arg(long)]
    resp_rate: PathBuf,
}

impl SeriesArgs {
    fn load(&self) -> Result<(Series, Series, Series)> {
        Ok((
            read_series(&self.hrv)?,
            read_series(&self.rhr)?,
            read_series(&self.resp_rate)?,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Per-sample deviations from baseline and dose for the most recent window
    Process {
        #[command(flatten)]
        series: SeriesArgs,
        #[arg(long)]
        base_dose: f64,
        /// Target administration time (ISO-8601)
        #[arg(long)]
        target_time: String,
        /// Number of most recent samples to process (default 24)
        #[arg(long)]
        window: Option<usize>,
        /// Zone for reading timestamps that carry an offset
        #[arg(long)]
        clock: Option<ClockArg>,
        /// Fixed UTC offset in minutes; overrides --clock
        #[arg(long, allow_hyphen_values = true)]
        offset_minutes: Option<i32>,
        /// TOML file with processor settings; flags take precedence
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Historical means of the three series
    Baseline {
        #[command(flatten)]
        series: SeriesArgs,
    },
    /// Remaining hours and target hour for a single sample time
    Timing {
        #[arg(long)]
        sample_time: String,
        #[arg(long)]
        target_time: String,
        #[arg(long, default_value = "local")]
        clock: ClockArg,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            series,
            base_dose,
            target_time,
            window,
            clock,
            offset_minutes,
            config,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(window) = window {
                cfg.window = window;
            }
            if let Some(clock) = clock {
                cfg.clock = clock.into();
            }
            if let Some(offset_minutes) = offset_minutes {
                cfg.clock = ClockZone::Fixed { offset_minutes };
            }
            cmd_process(&series, base_dose, &target_time, cfg)?
        }
        Commands::Baseline { series } => cmd_baseline(&series)?,
        Commands::Timing {
            sample_time,
            target_time,
            clock,
        } => cmd_timing(&sample_time, &target_time, clock.into())?,
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ProcessorConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(ProcessorConfig::default()),
    }
}

fn cmd_process(
    series: &SeriesArgs,
    base_dose: f64,
    target_time: &str,
    cfg: ProcessorConfig,
) -> Result<()> {
    let (hrv, rhr, resp_rate) = series.load()?;
    let processor = WindowProcessor::new(cfg)?;
    info!(
        "window={} clock={:?}",
        processor.config().window,
        processor.config().clock
    );
    let records = processor
        .process(&hrv, &rhr, &resp_rate, base_dose, target_time, &BaseDoseModel)
        .context("processing biometric window")?;
    info!("processed {} records", records.len());
    println!("{}", serde_json::to_string(&records)?);
    Ok(())
}

fn cmd_baseline(series: &SeriesArgs) -> Result<()> {
    let (hrv, rhr, resp_rate) = series.load()?;
    let baseline = Baseline::from_series(&hrv, &rhr, &resp_rate)?;
    println!("{}", serde_json::to_string(&baseline)?);
    Ok(())
}

fn cmd_timing(sample_time: &str, target_time: &str, clock: ClockZone) -> Result<()> {
    let current = parse_wall_clock(sample_time, clock)?;
    let target = parse_wall_clock(target_time, clock)?;
    let timing = Timing::between(current, target);
    println!("{}", serde_json::to_string(&timing)?);
    Ok(())
}
