//! Configure line: the CMake invocation that generates the build tree

use crate::config::{ActContext, BuildConfig, Mode, Target};
use crate::error::{ActError, ActResult};
use crate::platform::HostPlatform;

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Build the CMake configure line. The line is run from `build/<mode>`,
/// hence the `../..` source directory.
///
/// Every fragment is gated by one field of the record and appended in a
/// fixed order, so the same record always produces the same bytes.
pub fn configure_line(config: &BuildConfig, ctx: &ActContext) -> ActResult<String> {
    let mut parts: Vec<String> = vec![
        ctx.tools.cmake.clone(),
        "../..".to_string(),
        // for clang-tidy and editors
        "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string(),
    ];

    let build_type = match config.mode {
        Mode::Release => "RELEASE",
        Mode::Debug => "DEBUG",
    };
    parts.push(format!("-DCMAKE_BUILD_TYPE={build_type}"));
    parts.push(format!("-DUSE_NANODBC={}", on_off(config.with_sql)));
    parts.push(format!("-DCMAKE_INSTALL_PREFIX=\"{}\"", config.destination));
    parts.push(format!("-DCMAKE_VERBOSE_MAKEFILE={}", on_off(config.verbose)));
    parts.push(format!("-DBUILD_SHARED_LIBS={}", on_off(!config.static_lib)));
    parts.push(format!("-DGUM_COVERAGE={}", on_off(config.coverage)));

    parts.push("-DBUILD_ALL=OFF".to_string());
    for module in config.modules.iter() {
        parts.push(format!("-DBUILD_{module}=ON"));
    }

    let seed = config.fixed_seed.as_deref().unwrap_or("0");
    parts.push(format!("-DGUM_RANDOMSEED={seed}"));

    let python = config.target == Target::PyAgrum;
    parts.push(format!("-DBUILD_PYTHON={}", on_off(python)));
    if python {
        if let Some(lib) = &config.python3lib {
            parts.push(format!("-DPYTHON_LIBRARY={lib}"));
        }
        if let Some(include) = &config.python3include {
            parts.push(format!("-DPYTHON_INCLUDE_DIR={include}"));
        }
    }

    parts.push(toolchain_selector(config, ctx.platform)?);
    parts.push(format!("-DCMAKE_GUM_THREADS={}", config.threads.as_str()));

    if config.profiling {
        parts.push("-DGUM_PROFILING=ON".to_string());
    }

    Ok(parts.join(" "))
}

/// Generator on Windows, compiler executables elsewhere
fn toolchain_selector(config: &BuildConfig, platform: HostPlatform) -> ActResult<String> {
    let compiler = config.compiler;
    if !compiler.permitted_on(platform) {
        return Err(ActError::UnsupportedCompiler {
            compiler: compiler.to_string(),
            platform: platform.to_string(),
        });
    }

    if let Some(generator) = compiler.generator() {
        return Ok(generator.to_string());
    }

    let (cc, cxx) = compiler
        .executables()
        .ok_or_else(|| ActError::UnsupportedCompiler {
            compiler: compiler.to_string(),
            platform: platform.to_string(),
        })?;
    let prefixed = |exe: &str| match &config.compiler_dir {
        Some(dir) => format!("{}/{}", dir.trim_end_matches(['/', '\\']), exe),
        None => exe.to_string(),
    };

    Ok(format!(
        "-DCMAKE_C_COMPILER={} -DCMAKE_CXX_COMPILER={}",
        prefixed(cc),
        prefixed(cxx)
    ))
}
