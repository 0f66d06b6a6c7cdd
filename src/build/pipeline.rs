use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::exec::{ProcessExecutor, exec_from_line};
use super::{cmake, make, post};
use crate::cli::Output;
use crate::config::{ActContext, BuildConfig};
use crate::error::ActResult;

/// All lines of one build, computed before anything runs so that a
/// configuration error never leaves a half-executed pipeline behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub directory: PathBuf,
    pub configure: String,
    pub compile: String,
    pub post: post::PostLine,
}

impl BuildPlan {
    pub fn new(config: &BuildConfig, ctx: &ActContext) -> ActResult<Self> {
        Ok(Self {
            directory: build_dir(config, ctx),
            configure: cmake::configure_line(config, ctx)?,
            compile: make::compile_line(config, ctx)?,
            post: post::post_line(config, ctx),
        })
    }
}

/// `build/<mode>` under the project root
pub fn build_dir(config: &BuildConfig, ctx: &ActContext) -> PathBuf {
    ctx.layout.build_dir().join(config.mode.as_str())
}

/// Configure, compile, then verify
pub fn run(
    config: &BuildConfig,
    ctx: &ActContext,
    executor: &dyn ProcessExecutor,
    output: &Output,
) -> ActResult<()> {
    let plan = BuildPlan::new(config, ctx)?;

    output.notif(&format!(
        "[{}] on [{}] in [{}] mode",
        config.action.as_str(),
        config.target.as_str(),
        config.mode.as_str()
    ));

    enter_dir(config, &plan.directory, output)?;

    exec_from_line(config, &plan.configure, true, &plan.directory, executor, output)?;
    exec_from_line(config, &plan.compile, true, &plan.directory, executor, output)?;
    if !plan.post.is_empty() {
        exec_from_line(
            config,
            &plan.post.line,
            plan.post.check_rc,
            &plan.directory,
            executor,
            output,
        )?;
    }

    output.success(&format!(
        "[{}] on [{}] done",
        config.action.as_str(),
        config.target.as_str()
    ));
    Ok(())
}

fn enter_dir(config: &BuildConfig, dir: &Path, output: &Output) -> ActResult<()> {
    if config.dry_run || config.verbose {
        output.trace(&format!("cd {}", dir.display()));
    }
    if !config.dry_run {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Remove the whole build directory
pub fn clean(ctx: &ActContext, dry_run: bool, output: &Output) -> ActResult<()> {
    let dir = ctx.layout.build_dir();
    if !dir.exists() {
        output.notif(&format!("[{}] does not exist, nothing to clean", dir.display()));
        return Ok(());
    }

    if dry_run {
        output.trace(&format!("rm -rf {}", dir.display()));
        return Ok(());
    }

    fs::remove_dir_all(&dir)?;
    output.success(&format!("[{}] removed", dir.display()));
    Ok(())
}
