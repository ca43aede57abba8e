// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use youtube_ass::app_config::{self, Config};
use youtube_ass::app_controller::Controller;
use youtube_ass::fetcher::{FileAnnotationSource, normalize_video_id};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for youtube-ass
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// youtube-ass - Youtube annotations to SubStation Alpha subtitles
///
/// Downloads the annotations of a Youtube video and writes them as an
/// ASS subtitle file named after the video id.
#[derive(Parser, Debug)]
#[command(name = "youtube-ass")]
#[command(version)]
#[command(about = "Convert Youtube annotations to ASS subtitles")]
#[command(long_about = "youtube-ass downloads the annotations of a Youtube video and converts the text annotations into an ASS subtitle file.

EXAMPLES:
    youtube-ass dQw4w9WgXcQ                               # Writes dQw4w9WgXcQ.ass
    youtube-ass https://www.youtube.com/watch?v=dQw4w9WgXcQ
    youtube-ass -o subs/ --save-xml dQw4w9WgXcQ          # Also keep the downloaded XML
    youtube-ass -i annotations.xml dQw4w9WgXcQ           # Convert a local annotation file
    youtube-ass completions bash > youtube-ass.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Youtube video id or video URL
    #[arg(value_name = "VIDEO_ID")]
    video_id: Option<String>,

    /// Convert a local annotation XML file instead of downloading
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory the .ass file is written to
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Also save the downloaded annotation XML
    #[arg(long)]
    save_xml: bool,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "youtube-ass", &mut std::io::stdout());
        return Ok(());
    }

    // Without a video id or an input file there is nothing to do
    if cli.video_id.is_none() && cli.input.is_none() {
        CommandLineOptions::command().print_help()?;
        println!();
        return Ok(());
    }

    run_convert(cli).await
}

async fn run_convert(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let video_id = match (&options.video_id, &options.input) {
        (Some(id), _) => normalize_video_id(id),
        (None, Some(input)) => input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Cannot derive an output name from {:?}", input))?,
        (None, None) => return Err(anyhow!("VIDEO_ID is required")),
    };

    let controller = Controller::with_config(config)?;

    let summary = match &options.input {
        Some(input) => {
            controller
                .run_with_source(&video_id, &FileAnnotationSource::new(input))
                .await?
        }
        None => controller.run(&video_id).await?,
    };

    println!("{}", summary.output_path.display());
    Ok(())
}

/// Load the config file (creating a default one if missing) and apply CLI overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if options.save_xml {
        config.save_source_xml = true;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
