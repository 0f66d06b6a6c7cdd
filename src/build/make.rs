//! Compile line: the make or MSBuild invocation run inside a configured tree

use super::jobs;
use crate::config::{ActContext, Action, BuildConfig, Target};
use crate::error::{ActError, ActResult};

/// Sub-directory holding the Python binding's build tree
pub const PYAGRUM_BUILD_DIR: &str = "wrappers/pyAgrum";

/// Build the compile line for the host platform: MSBuild on Windows, make
/// everywhere else.
pub fn compile_line(config: &BuildConfig, ctx: &ActContext) -> ActResult<String> {
    if ctx.platform.is_windows() {
        msbuild_line(config, ctx)
    } else {
        make_line(config, ctx)
    }
}

fn unsupported(config: &BuildConfig, ctx: &ActContext) -> ActError {
    ActError::UnsupportedAction {
        action: config.action.as_str().to_string(),
        target: config.target.as_str().to_string(),
        platform: ctx.platform.to_string(),
    }
}

fn resolved_jobs(config: &BuildConfig, ctx: &ActContext) -> usize {
    let nbr_jobs = jobs::resolve(&config.jobs, ctx.cores);
    tracing::info!("Compilation using [{}] jobs.", nbr_jobs);
    nbr_jobs
}

fn msbuild_line(config: &BuildConfig, ctx: &ActContext) -> ActResult<String> {
    let msbuild = ctx
        .tools
        .msbuild
        .as_deref()
        .ok_or_else(|| ActError::ToolNotFound("MsBuild".to_string()))?;

    let project = match (config.action, config.target) {
        (Action::Test, Target::Agrum) => "agrum.sln /t:gumTest",
        (Action::Test, Target::PyAgrum) => "agrum.sln /t:_pyAgrum",
        (Action::Install | Action::Lib, _) => "INSTALL.vcxproj",
        (Action::Uninstall | Action::Doc, _) => return Err(unsupported(config, ctx)),
    };

    let msbuild = if msbuild.contains(' ') {
        format!("\"{msbuild}\"")
    } else {
        msbuild.to_string()
    };

    let nbr_jobs = resolved_jobs(config, ctx);
    Ok(format!(
        "{msbuild} {project} /p:Configuration=\"Release\" /p:BuildInParallel=true /maxcpucount:{nbr_jobs}"
    ))
}

fn make_line(config: &BuildConfig, ctx: &ActContext) -> ActResult<String> {
    let mut line = ctx.tools.make.clone();

    match config.action {
        Action::Test => {
            // pyAgrum tests only need the binding built
            if config.target == Target::Agrum {
                line.push_str(" gumTest");
            }
        }
        Action::Install => line.push_str(" install"),
        Action::Uninstall => line.push_str(" uninstall"),
        Action::Lib => {}
        Action::Doc => line.push_str(" doc"),
    }

    let nbr_jobs = resolved_jobs(config, ctx);
    line.push_str(&format!(" -j {nbr_jobs}"));

    if config.target == Target::PyAgrum {
        line.push_str(&format!(" -C {PYAGRUM_BUILD_DIR}"));
    }

    Ok(line)
}
