use anyhow::Context;
use chainscope::config::MiningConfig;
use chainscope::ignore::IgnoreList;
use chainscope::report::{self, ReportFormat};
use chainscope::{logging, miner, record};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

#[derive(Parser, Debug)]
#[command(name = "chainscope", version, about = "Mine a voice-command action log for reusable command chains")]
struct Cli {
    /// Action log, one JSON record per line (`-` for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// TOML configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Action sequences to leave out of the analysis
    #[arg(long = "ignore")]
    ignore: Option<PathBuf>,

    /// Most consecutive utterances folded into one candidate command
    #[arg(long = "max-chain-length")]
    max_chain_length: Option<usize>,

    /// Exclusive bound on dictated phrase length tried inside inserted text
    #[arg(long = "max-prose-size")]
    max_prose_size: Option<usize>,

    /// Output format: text | json
    #[arg(long = "format", default_value = "text")]
    format: String,

    /// Write a timestamped report into this directory instead of stdout
    #[arg(long = "output", short = 'o')]
    output: Option<PathBuf>,

    /// Keep only the N most used recommendations
    #[arg(long = "top")]
    top: Option<usize>,

    /// Log filter when RUST_LOG is unset (e.g. info, debug, chainscope=trace)
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<MiningConfig> {
    let mut config = match &cli.config {
        Some(path) => MiningConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => MiningConfig::default(),
    };
    if let Some(n) = cli.max_chain_length {
        config.max_chain_length = n;
    }
    if let Some(n) = cli.max_prose_size {
        config.max_prose_size_to_consider = n;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_parallelism();

    let config = load_config(&cli)?;
    logging::init(&config.logging.level)?;
    let format: ReportFormat = cli.format.parse()?;

    let log = if cli.input == "-" {
        record::read_entries(io::stdin().lock()).context("reading stdin")?
    } else {
        record::read_log(Path::new(&cli.input)).with_context(|| format!("reading {}", cli.input))?
    };

    let log = match &cli.ignore {
        Some(path) => {
            let ignore = IgnoreList::load(path).with_context(|| format!("loading ignore list {}", path.display()))?;
            tracing::info!(sequences = ignore.len(), "ignore list loaded");
            ignore.filter(log)
        }
        None => log,
    };

    let mut recommendations = miner::recommend(&log, &config);
    if let Some(top) = cli.top {
        recommendations.truncate(top);
    }

    match &cli.output {
        Some(dir) => {
            let path = report::write_report(dir, &recommendations, format)
                .with_context(|| format!("writing report into {}", dir.display()))?;
            eprintln!("wrote {} recommendations to {}", recommendations.len(), path.display());
        }
        None => {
            let rendered = report::render(&recommendations, format)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if format == ReportFormat::Json {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
