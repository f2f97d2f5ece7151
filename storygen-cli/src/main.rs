//! # storygen
//!
//! Generate Storybook story modules for every Vue component under a views
//! directory.
//!
//! ## Usage
//!
//! ```bash
//! # Generate Vue 3 stories into ./stories
//! storygen --views-dir ./src/views
//!
//! # Options API stories into a custom directory
//! storygen -v ./src/views -o ./storybook/stories -f vue2
//!
//! # Preview without writing
//! storygen -v ./src/views --dry-run
//!
//! # Fail (exit 2) when committed stories are out of date
//! storygen -v ./src/views --check
//! ```

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use storygen::{Framework, StoryGenerator};
use tracing_subscriber::EnvFilter;

use storygen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    walker::{absolutize, TreeWalker, WalkSummary},
    writer::{FileWriter, WriteMode, WriteResult},
};

#[derive(Parser)]
#[command(name = "storygen")]
#[command(author, version, about = "Generate Storybook stories from a Vue component tree", long_about = None)]
struct Cli {
    /// Root of the component tree
    #[arg(short = 'v', long)]
    views_dir: PathBuf,

    /// Root of the generated story tree
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Template variant (vue2 or vue3)
    #[arg(short, long)]
    framework: Option<Framework>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only process components whose relative path matches this glob
    #[arg(long)]
    filter: Option<String>,

    /// Print generated stories without writing files
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Exit with status 2 when a story file is missing or out of date
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn write_mode(&self) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else if self.check {
            WriteMode::Check
        } else {
            WriteMode::Write
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mode = cli.write_mode();

    let config = ConfigManager::load(cli.config.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output: cli.output_dir.clone(),
            framework: cli.framework,
        },
    );
    config.validate()?;

    let views_dir = absolutize(&cli.views_dir)?;
    let output_dir = absolutize(&config.output.dir)?;

    let mut walker = build_walker(views_dir, output_dir, &config, mode);
    if let Some(ref pattern) = cli.filter {
        walker = walker.with_filter(pattern)?;
    }

    println!(
        "{} {} ({})",
        "Generating stories from".cyan(),
        walker.source_root().display(),
        config.template.framework
    );

    let summary = walker.walk()?;
    report(&summary, mode);

    if mode == WriteMode::Check {
        let stale = summary.out_of_date().count();
        if stale > 0 {
            return Err(CliError::Validation(format!(
                "{} story file(s) missing or out of date. Run storygen to regenerate.",
                stale
            )));
        }
    }

    Ok(())
}

fn build_walker(
    views_dir: PathBuf,
    output_dir: PathBuf,
    config: &Config,
    mode: WriteMode,
) -> TreeWalker {
    TreeWalker::new(
        views_dir,
        output_dir,
        StoryGenerator::new(config.generator_options()),
    )
    .with_extensions(
        &config.input.component_extension,
        &config.input.spec_extension,
        &config.output.extension,
    )
    .with_writer(FileWriter::new(mode))
}

/// Print the per-file outcome and totals.
fn report(summary: &WalkSummary, mode: WriteMode) {
    for story in &summary.generated {
        match &story.result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "  {} {} ({} bytes, {} stories)",
                    "✓".green(),
                    path.display(),
                    bytes,
                    story.stories.len()
                );
            }
            WriteResult::DryRun { content, path } => {
                println!("{}", format!("--- {} ---", path.display()).dimmed());
                println!("{}", content);
            }
            WriteResult::UpToDate { path } => {
                println!("  {} {}", "✓".green(), path.display());
            }
            WriteResult::Stale { path } => {
                println!("  {} {} is out of date", "✗".red(), path.display());
            }
            WriteResult::Missing { path } => {
                println!("  {} {} is missing", "✗".red(), path.display());
            }
        }
    }

    for skipped in &summary.skipped {
        println!(
            "  {} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }

    let verb = match mode {
        WriteMode::Write => "Generated",
        WriteMode::DryRun => "Rendered",
        WriteMode::Check => "Checked",
    };
    println!(
        "{} {} story file(s), {} skipped",
        verb.green().bold(),
        summary.generated.len().to_string().green(),
        summary.skipped.len()
    );
}

fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
