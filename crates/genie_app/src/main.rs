use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use genie_core::{ParseSettings, DEFAULT_ENDPOINT, DEFAULT_MIN_CHAT_CHARS};
use genie_engine::GatewaySettings;
use genie_logging::LogDestination;
use log::LevelFilter;

mod platform;

#[derive(Parser)]
#[command(name = "pagegenie")]
#[command(about = "Chat with a page-generating agent and keep a live HTML preview")]
struct Cli {
    /// Base URL of the agent service
    #[arg(long, env = "PAGEGENIE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Directory for preview.html and downloads
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,
    /// Chat text shorter than this is replaced by a stock reply when a document was sent
    #[arg(long, default_value_t = DEFAULT_MIN_CHAT_CHARS)]
    min_chat_chars: usize,
    /// Whole-request timeout for agent calls
    #[arg(long, default_value_t = 120)]
    request_timeout_secs: u64,
    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    genie_logging::initialize(
        cli.log.into(),
        cli.log_level.into(),
        &genie_logging::log_file_in(Path::new(".")),
    );

    let config = platform::AppConfig {
        endpoint: cli.endpoint,
        output_dir: cli.output_dir,
        parse: ParseSettings {
            min_chat_chars: cli.min_chat_chars,
        },
        gateway: GatewaySettings {
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            ..GatewaySettings::default()
        },
    };
    platform::run_app(config)
}
