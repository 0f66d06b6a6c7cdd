use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::{ShellExecutor, pipeline};
use crate::config::{Action, BuildConfig, BuildOptions};
use crate::error::ActResult;

/// Options shared by every build action. Anything left out keeps the value
/// from the configuration files. Switches take an optional value, so
/// `--static-lib=false` turns off what a project file turned on.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// What to build: aGrUM or pyAgrum
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Build mode: release or debug
    #[arg(long)]
    pub mode: Option<String>,

    /// Modules to build, joined by '+' (e.g. BASE+BN), or ALL
    #[arg(short, long)]
    pub modules: Option<String>,

    /// Parallel jobs: a number, all, except1, half or halfexcept1
    #[arg(short, long)]
    pub jobs: Option<String>,

    /// pyAgrum test scope: quick, quick:<subset> or all
    #[arg(short, long)]
    pub tests: Option<String>,

    /// Compiler family (gcc, clang, mvsc22, mingw64, ...)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Directory prefixed to the compiler executables
    #[arg(long, value_name = "DIR")]
    pub compiler_dir: Option<String>,

    /// Install prefix
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<String>,

    /// Threading backend: omp or std
    #[arg(long)]
    pub threads: Option<String>,

    /// Python library to link pyAgrum against
    #[arg(long, value_name = "FILE")]
    pub python3lib: Option<String>,

    /// Python include directory for pyAgrum
    #[arg(long, value_name = "DIR")]
    pub python3include: Option<String>,

    /// Build with SQL support (nanodbc)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub with_sql: Option<bool>,

    /// Build static libraries
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub static_lib: Option<bool>,

    /// Instrument for coverage
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub coverage: Option<bool>,

    /// Enable internal profiling
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub profiling: Option<bool>,

    /// Use the configured fixed random seed
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fixed_seed: Option<bool>,
}

impl BuildArgs {
    /// Override `options` with the flags given on the command line
    pub fn apply(&self, options: &mut BuildOptions) {
        let overrides = [
            (&self.target, &mut options.target),
            (&self.mode, &mut options.mode),
            (&self.modules, &mut options.modules),
            (&self.jobs, &mut options.jobs),
            (&self.tests, &mut options.tests),
            (&self.threads, &mut options.threads),
            (&self.destination, &mut options.destination),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }

        let optional = [
            (&self.compiler, &mut options.compiler),
            (&self.compiler_dir, &mut options.compiler_dir),
            (&self.python3lib, &mut options.python3lib),
            (&self.python3include, &mut options.python3include),
        ];
        for (flag, field) in optional {
            if flag.is_some() {
                *field = flag.clone();
            }
        }

        let switches = [
            (self.with_sql, &mut options.with_sql),
            (self.static_lib, &mut options.static_lib),
            (self.coverage, &mut options.coverage),
            (self.profiling, &mut options.profiling),
            (self.fixed_seed, &mut options.fixed_seed),
        ];
        for (flag, field) in switches {
            if let Some(value) = flag {
                *field = value;
            }
        }
    }
}

/// Merge configured defaults, CLI flags and global switches into a
/// validated record
pub fn resolve(action: Action, args: &BuildArgs, session: &Session) -> ActResult<BuildConfig> {
    let mut options = session.config.build.clone();
    options.action = action.as_str().to_string();
    args.apply(&mut options);
    options.verbose |= session.verbose;
    options.dry_run |= session.dry_run;

    BuildConfig::from_options(&options, session.ctx.platform)
}

pub fn execute(action: Action, args: BuildArgs, session: &Session) -> Result<()> {
    let config = resolve(action, &args, session)?;
    tracing::debug!("Build record: {:?}", config);

    let executor = ShellExecutor::new(session.ctx.platform);
    pipeline::run(&config, &session.ctx, &executor, &session.output)?;
    Ok(())
}
