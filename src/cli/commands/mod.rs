use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

use super::Output;
use crate::config::{ActConfig, ActContext, Action};

pub mod build;
pub mod clean;
pub mod guideline;
pub mod show;

#[derive(Parser)]
#[command(
    name = "act",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build orchestrator and source guideline checker for aGrUM/pyAgrum",
    long_about = "act drives the CMake configure and make/MSBuild compile steps of aGrUM \
                  and pyAgrum, runs the test executables, and checks the source tree \
                  against the project guidelines."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and install the target
    Install(build::BuildArgs),
    /// Remove an installed target
    Uninstall(build::BuildArgs),
    /// Build the target
    Lib(build::BuildArgs),
    /// Build and run the tests
    Test(build::BuildArgs),
    /// Build the documentation
    Doc(build::BuildArgs),
    /// Show the command lines of an action without running them
    Show(show::ShowArgs),
    /// Check the sources against the project guidelines
    Guideline(guideline::GuidelineArgs),
    /// Remove the build directory
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything a command needs, loaded once per invocation
pub struct Session {
    pub config: ActConfig,
    pub ctx: ActContext,
    pub output: Output,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir).with_context(|| format!("Cannot enter directory {dir}"))?;
        }

        setup_logging(self.verbose, self.quiet);

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let config = ActConfig::load(self.config.as_deref())?;
        let ctx = ActContext::from_config(&config);
        tracing::debug!("Context: {:?}", ctx);

        let session = Session {
            config,
            ctx,
            output: Output::new(self.verbose > 0, self.quiet),
            dry_run: self.dry_run,
            verbose: self.verbose > 0,
        };

        match command {
            Commands::Install(args) => build::execute(Action::Install, args, &session),
            Commands::Uninstall(args) => build::execute(Action::Uninstall, args, &session),
            Commands::Lib(args) => build::execute(Action::Lib, args, &session),
            Commands::Test(args) => build::execute(Action::Test, args, &session),
            Commands::Doc(args) => build::execute(Action::Doc, args, &session),
            Commands::Show(args) => show::execute(args, &session),
            Commands::Guideline(args) => guideline::execute(args, &session),
            Commands::Clean => clean::execute(&session),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
