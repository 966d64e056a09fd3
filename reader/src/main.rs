use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Parser;
use geolifecore::HeaderMode;
use report::model::ReportFormat;
use report::writer::{append_to_file, render};
use std::path::PathBuf;
use workflow::config::{RegionSpec, ScanConfig};
use workflow::runner::Runner;

mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Scan GeoLife trajectories and report their bounds")]
struct Args {
    /// GeoLife data root, or any directory above its `Data` folder
    data_root: Option<PathBuf>,
    /// Load scan settings from YAML; flags given here take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Scan only this user (repeatable)
    #[arg(short, long = "user")]
    users: Vec<String>,
    /// Maximum number of users to scan
    #[arg(short = 'n', long)]
    limit: Option<usize>,
    /// Sample the limited users at random instead of taking the first ones
    #[arg(long, default_value_t = false)]
    randomize: bool,
    #[arg(long)]
    seed: Option<u64>,
    /// Fail on PLT headers that deviate from the GeoLife format
    #[arg(long, default_value_t = false)]
    strict_header: bool,
    /// Only count fixes recorded on this day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Only count fixes inside a named region (all-china, beijing)
    #[arg(long)]
    region: Option<String>,
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
    /// Also append the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Stop at the first user that fails
    #[arg(long, default_value_t = false)]
    fail_fast: bool,
    /// Include per-file bounds in the text report
    #[arg(long, default_value_t = false)]
    per_file: bool,
}

fn build_config(args: Args) -> anyhow::Result<ScanConfig> {
    let mut config = match (&args.config, args.data_root.clone()) {
        (Some(path), _) => ScanConfig::load(path)?,
        (None, Some(root)) => ScanConfig::from_root(root),
        (None, None) => bail!("either a data root or --config is required"),
    };

    if let Some(root) = args.data_root {
        config.data_root = root;
    }
    if !args.users.is_empty() {
        config.users = args.users;
    }
    if args.limit.is_some() {
        config.limit = args.limit;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.date.is_some() {
        config.date = args.date;
    }
    if let Some(region) = args.region {
        config.region = Some(RegionSpec::Named(region));
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.output.is_some() {
        config.output = args.output;
    }
    if args.strict_header {
        config.header = HeaderMode::Strict;
    }
    config.randomize |= args.randomize;
    config.fail_fast |= args.fail_fast;
    config.per_file |= args.per_file;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = build_config(Args::parse())?;

    let runner = Runner::new(config.clone());
    let report = runner.execute()?;

    let rendered = render(&report, config.format, config.per_file)?;
    print!("{}", rendered);
    if let Some(path) = config.output.as_ref() {
        append_to_file(&rendered, path)
            .with_context(|| format!("saving report to {}", path.display()))?;
    }

    if !report.failures.is_empty() {
        bail!(
            "{} of {} users failed",
            report.failures.len(),
            report.failures.len() + report.users.len()
        );
    }
    Ok(())
}
