//! irmatch CLI
//!
//! Matches the IR rules of one test class against a C2 compilation log.
//!
//! # Usage
//!
//! ```bash
//! irmatch --log hotspot_pid1234.log --rules rules.yaml
//! irmatch --log hotspot_pid1234.log --rules rules.yaml --config irmatch.yaml --format json -v
//! ```
//!
//! Exit codes: 0 all rules passed (or bailed out), 1 IR violation, 2 error.

use clap::Parser;
use irmatch::{IrMatcher, MatchVerdict, MatcherConfig, NodeMappingTable, ReportFormat, RuleFile};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "irmatch")]
#[command(about = "Match @IR rules against a C2 compilation log", long_about = None)]
struct Cli {
    /// Compilation log written by the VM (hotspot_pid<pid>.log)
    #[arg(short, long)]
    log: PathBuf,

    /// YAML rule file with the test class and its IR rules
    #[arg(short, long)]
    rules: PathBuf,

    /// YAML matcher configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format, overrides the configuration
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("irmatch=debug")
    } else {
        EnvFilter::new("irmatch=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> irmatch::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => MatcherConfig::from_yaml(path)?,
        None => MatcherConfig::default(),
    };
    if let Some(format) = cli.format {
        config = config.report_format(format);
    }
    let rules = RuleFile::from_yaml(&cli.rules)?;
    debug!(
        test_class = %rules.test_class,
        methods = rules.methods.len(),
        "Loaded rule file"
    );

    let table = NodeMappingTable::new();
    let matcher = IrMatcher::new(&table, config);

    match matcher.run_rule_file(&cli.log, &rules)? {
        MatchVerdict::Passed => Ok(ExitCode::SUCCESS),
        MatchVerdict::Bailout { .. } => Ok(ExitCode::SUCCESS),
        MatchVerdict::Failed(violation) => {
            match matcher.config().report_format {
                ReportFormat::Text => {
                    if let Some(output) = &violation.compilation_output {
                        println!("{}", output);
                    }
                    eprint!("{}", violation.report);
                }
                ReportFormat::Json => println!("{}", violation.report),
            }
            Ok(ExitCode::from(1))
        }
    }
}
