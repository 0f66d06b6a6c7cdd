//! Command line builder tests

use super::*;
use crate::cli::Output;
use crate::config::{ActContext, BuildConfig, BuildOptions};
use crate::error::ActError;
use crate::platform::HostPlatform;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn record(platform: HostPlatform, f: impl FnOnce(&mut BuildOptions)) -> BuildConfig {
    let mut options = BuildOptions::default();
    f(&mut options);
    BuildConfig::from_options(&options, platform).expect("valid options")
}

fn unix() -> ActContext {
    ActContext::with_defaults(HostPlatform::Unix, 8)
}

fn windows() -> ActContext {
    ActContext::with_defaults(HostPlatform::Windows, 8)
}

/// Records every line instead of running it
struct RecordingExecutor {
    lines: RefCell<Vec<(String, PathBuf)>>,
    status: i32,
}

impl RecordingExecutor {
    fn returning(status: i32) -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            status,
        }
    }

    fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(line, _)| line.clone()).collect()
    }
}

impl ProcessExecutor for RecordingExecutor {
    fn execute(&self, line: &str, cwd: &Path) -> io::Result<i32> {
        self.lines
            .borrow_mut()
            .push((line.to_string(), cwd.to_path_buf()));
        Ok(self.status)
    }
}

fn quiet() -> Output {
    Output::new(false, true)
}

#[test]
fn test_gcc_install_scenario() {
    let config = record(HostPlatform::Unix, |o| {
        o.action = "install".to_string();
        o.mode = "release".to_string();
        o.modules = "BASE+GRAPHS".to_string();
        o.with_sql = false;
        o.static_lib = true;
        o.compiler = Some("gcc".to_string());
    });
    let ctx = unix();

    let configure = configure_line(&config, &ctx).unwrap();
    assert!(configure.contains("-DCMAKE_BUILD_TYPE=RELEASE"));
    assert!(configure.contains("-DUSE_NANODBC=OFF"));
    assert!(configure.contains("-DBUILD_SHARED_LIBS=OFF"));
    assert!(configure.contains("-DBUILD_BASE=ON -DBUILD_GRAPHS=ON"));
    assert!(configure.contains("-DCMAKE_C_COMPILER=gcc -DCMAKE_CXX_COMPILER=g++"));

    let compile = compile_line(&config, &ctx).unwrap();
    let jobs = jobs::resolve(&config.jobs, ctx.cores);
    assert!(compile.ends_with(&format!("install -j {jobs}")), "{compile}");
}

#[test]
fn test_configure_line_full_default_layout() {
    let config = record(HostPlatform::Unix, |o| {
        o.modules = "BASE".to_string();
        o.destination = "/opt/agrum".to_string();
    });
    assert_eq!(
        configure_line(&config, &unix()).unwrap(),
        "cmake ../.. -DCMAKE_EXPORT_COMPILE_COMMANDS=ON -DCMAKE_BUILD_TYPE=RELEASE \
         -DUSE_NANODBC=OFF -DCMAKE_INSTALL_PREFIX=\"/opt/agrum\" -DCMAKE_VERBOSE_MAKEFILE=OFF \
         -DBUILD_SHARED_LIBS=ON -DGUM_COVERAGE=OFF -DBUILD_ALL=OFF -DBUILD_BASE=ON \
         -DGUM_RANDOMSEED=0 -DBUILD_PYTHON=OFF \
         -DCMAKE_C_COMPILER=gcc -DCMAKE_CXX_COMPILER=g++ -DCMAKE_GUM_THREADS=omp"
    );
}

#[test]
fn test_configure_line_is_reproducible() {
    let config = record(HostPlatform::Unix, |o| {
        o.modules = "GRAPHS+BN+BASE+agrum".to_string();
        o.coverage = true;
        o.profiling = true;
    });
    let ctx = unix();
    assert_eq!(
        configure_line(&config, &ctx).unwrap(),
        configure_line(&config.clone(), &ctx).unwrap()
    );
}

#[test]
fn test_install_prefix_keeps_spaces_verbatim() {
    let config = record(HostPlatform::Unix, |o| {
        o.destination = "/home/me/my install dir".to_string();
    });
    let line = configure_line(&config, &unix()).unwrap();
    assert!(line.contains("-DCMAKE_INSTALL_PREFIX=\"/home/me/my install dir\""));
}

#[test]
fn test_python_flag_only_for_pyagrum() {
    for action in ["install", "uninstall", "lib", "test", "doc"] {
        let config = record(HostPlatform::Unix, |o| {
            o.action = action.to_string();
            o.target = "aGrUM".to_string();
            o.python3lib = Some("/usr/lib/libpython3.so".to_string());
        });
        let line = configure_line(&config, &unix()).unwrap();
        assert!(!line.contains("-DBUILD_PYTHON=ON"), "{line}");
        assert!(line.contains("-DBUILD_PYTHON=OFF"));
        assert!(!line.contains("-DPYTHON_LIBRARY"));
    }

    let config = record(HostPlatform::Unix, |o| {
        o.target = "pyAgrum".to_string();
        o.python3lib = Some("/usr/lib/libpython3.so".to_string());
        o.python3include = Some("/usr/include/python3".to_string());
    });
    let line = configure_line(&config, &unix()).unwrap();
    assert!(line.contains(
        "-DBUILD_PYTHON=ON -DPYTHON_LIBRARY=/usr/lib/libpython3.so -DPYTHON_INCLUDE_DIR=/usr/include/python3"
    ));
}

#[test]
fn test_feature_gates() {
    let config = record(HostPlatform::Unix, |o| {
        o.mode = "debug".to_string();
        o.with_sql = true;
        o.verbose = true;
        o.coverage = true;
        o.profiling = true;
        o.threads = "std".to_string();
        o.fixed_seed = true;
        o.fixed_seed_value = "10".to_string();
    });
    let line = configure_line(&config, &unix()).unwrap();
    assert!(line.contains("-DCMAKE_BUILD_TYPE=DEBUG"));
    assert!(line.contains("-DUSE_NANODBC=ON"));
    assert!(line.contains("-DCMAKE_VERBOSE_MAKEFILE=ON"));
    assert!(line.contains("-DGUM_COVERAGE=ON"));
    assert!(line.contains("-DGUM_RANDOMSEED=10"));
    assert!(line.contains("-DCMAKE_GUM_THREADS=std"));
    assert!(line.ends_with("-DGUM_PROFILING=ON"));
}

#[test]
fn test_only_named_modules_are_enabled() {
    let config = record(HostPlatform::Unix, |o| o.modules = "bn+agrum".to_string());
    let line = configure_line(&config, &unix()).unwrap();
    assert!(line.contains("-DBUILD_ALL=OFF -DBUILD_BN=ON -DBUILD_aGrUM=ON"));
}

#[test]
fn test_clang_with_compiler_dir() {
    let config = record(HostPlatform::Unix, |o| {
        o.compiler = Some("clang".to_string());
        o.compiler_dir = Some("/opt/llvm/bin/".to_string());
    });
    let line = configure_line(&config, &unix()).unwrap();
    assert!(line.contains(
        "-DCMAKE_C_COMPILER=/opt/llvm/bin/clang -DCMAKE_CXX_COMPILER=/opt/llvm/bin/clang++"
    ));
}

#[test]
fn test_windows_generators() {
    let cases = [
        ("mvsc22", r#"-G "Visual Studio 17 2022" -A x64"#),
        ("mvsc22_32", r#"-G "Visual Studio 17 2022" -A Win32"#),
        ("mvsc19", r#"-G "Visual Studio 16 2019" -A x64"#),
        ("mvsc17", r#"-G "Visual Studio 15 2017 Win64""#),
        ("mvsc15_32", r#"-G "Visual Studio 14 2015""#),
        ("mingw64", r#"-G "MinGW Makefiles""#),
    ];
    for (compiler, generator) in cases {
        let config = record(HostPlatform::Windows, |o| o.compiler = Some(compiler.to_string()));
        let line = configure_line(&config, &windows()).unwrap();
        assert!(line.contains(generator), "{compiler}: {line}");
        assert!(!line.contains("CMAKE_C_COMPILER"));
    }
}

#[test]
fn test_configure_rejects_compiler_from_other_platform() {
    let config = record(HostPlatform::Unix, |o| o.compiler = Some("gcc".to_string()));
    assert!(matches!(
        configure_line(&config, &windows()),
        Err(ActError::UnsupportedCompiler { .. })
    ));
}

#[test]
fn test_make_lines_per_action() {
    let ctx = unix();
    let cases = [
        ("test", "aGrUM", "make gumTest -j 3"),
        ("test", "pyAgrum", "make -j 3 -C wrappers/pyAgrum"),
        ("install", "aGrUM", "make install -j 3"),
        ("install", "pyAgrum", "make install -j 3 -C wrappers/pyAgrum"),
        ("uninstall", "aGrUM", "make uninstall -j 3"),
        ("lib", "aGrUM", "make -j 3"),
        ("doc", "aGrUM", "make doc -j 3"),
    ];
    for (action, target, expected) in cases {
        let config = record(HostPlatform::Unix, |o| {
            o.action = action.to_string();
            o.target = target.to_string();
            o.jobs = "halfexcept1".to_string();
        });
        assert_eq!(compile_line(&config, &ctx).unwrap(), expected);
    }
}

#[test]
fn test_msbuild_lines() {
    let ctx = windows();
    let config = record(HostPlatform::Windows, |o| {
        o.action = "test".to_string();
        o.jobs = "all".to_string();
    });
    assert_eq!(
        compile_line(&config, &ctx).unwrap(),
        "msbuild agrum.sln /t:gumTest /p:Configuration=\"Release\" /p:BuildInParallel=true /maxcpucount:8"
    );

    let config = record(HostPlatform::Windows, |o| {
        o.action = "test".to_string();
        o.target = "pyAgrum".to_string();
        o.jobs = "2".to_string();
    });
    assert!(compile_line(&config, &ctx)
        .unwrap()
        .starts_with("msbuild agrum.sln /t:_pyAgrum"));

    let config = record(HostPlatform::Windows, |o| o.action = "lib".to_string());
    assert!(compile_line(&config, &ctx).unwrap().contains("INSTALL.vcxproj"));
}

#[test]
fn test_msbuild_unsupported_actions() {
    for action in ["uninstall", "doc"] {
        let config = record(HostPlatform::Windows, |o| o.action = action.to_string());
        assert!(matches!(
            compile_line(&config, &windows()),
            Err(ActError::UnsupportedAction { .. })
        ));
    }
}

#[test]
fn test_missing_msbuild_is_fatal() {
    let mut ctx = windows();
    ctx.tools.msbuild = None;
    let config = record(HostPlatform::Windows, |o| o.action = "install".to_string());
    match compile_line(&config, &ctx) {
        Err(ActError::ToolNotFound(tool)) => assert_eq!(tool, "MsBuild"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_post_line_for_pyagrum_quick() {
    let config = record(HostPlatform::Unix, |o| {
        o.action = "test".to_string();
        o.target = "pyAgrum".to_string();
        o.tests = "quick".to_string();
    });
    let post = post_line(&config, &unix());
    assert_eq!(
        post.line,
        "python3 ../../wrappers/pyAgrum/testunits/gumTest.py quick release"
    );
    assert!(post.check_rc);
}

#[test]
fn test_post_line_for_pyagrum_subset_and_all() {
    let config = record(HostPlatform::Unix, |o| {
        o.action = "test".to_string();
        o.target = "pyAgrum".to_string();
        o.tests = "quick:BNLEARNING".to_string();
        o.mode = "debug".to_string();
    });
    assert!(post_line(&config, &unix()).line.ends_with("gumTest.py quick:BNLEARNING debug"));

    let config = record(HostPlatform::Windows, |o| {
        o.action = "test".to_string();
        o.target = "pyAgrum".to_string();
        o.tests = "all".to_string();
    });
    let post = post_line(&config, &windows());
    assert!(post.line.starts_with(
        r#"copy /Y "wrappers\pyAgrum\Release\_pyAgrum.pyd" "wrappers\pyAgrum\." & python3 "#
    ));
    assert!(post.line.ends_with(r"..\..\wrappers\pyAgrum\testunits\gumTest.py all release"));
}

#[test]
fn test_post_line_for_agrum_binary() {
    let config = record(HostPlatform::Unix, |o| o.action = "test".to_string());
    assert_eq!(
        post_line(&config, &unix()),
        PostLine {
            line: "src/gumTest".to_string(),
            check_rc: true
        }
    );

    let config = record(HostPlatform::Windows, |o| o.action = "test".to_string());
    assert_eq!(post_line(&config, &windows()).line, r"src\Release\gumTest.exe");

    let config = record(HostPlatform::Windows, |o| {
        o.action = "test".to_string();
        o.compiler = Some("mingw64".to_string());
    });
    assert_eq!(post_line(&config, &windows()).line, r"src\gumTest.exe");
}

#[test]
fn test_no_post_line_outside_test() {
    for action in ["install", "uninstall", "lib", "doc"] {
        let config = record(HostPlatform::Unix, |o| o.action = action.to_string());
        let post = post_line(&config, &unix());
        assert!(post.is_empty());
        assert!(!post.check_rc);
    }
}

#[test]
fn test_exec_skips_in_dry_run() {
    let config = record(HostPlatform::Unix, |o| o.dry_run = true);
    let executor = RecordingExecutor::returning(3);
    exec_from_line(&config, "make -j 2", true, Path::new("."), &executor, &quiet()).unwrap();
    assert!(executor.lines().is_empty());
}

#[test]
fn test_exec_propagates_checked_failure() {
    let config = record(HostPlatform::Unix, |_| {});
    let executor = RecordingExecutor::returning(2);
    let err = exec_from_line(&config, "false", true, Path::new("."), &executor, &quiet())
        .unwrap_err();
    assert!(matches!(err, ActError::CommandFailed(2)));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(executor.lines(), vec!["false".to_string()]);
}

#[test]
fn test_exec_ignores_unchecked_failure() {
    let config = record(HostPlatform::Unix, |_| {});
    let executor = RecordingExecutor::returning(1);
    assert!(exec_from_line(&config, "false", false, Path::new("."), &executor, &quiet()).is_ok());
}

#[test]
fn test_pipeline_runs_lines_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = unix();
    ctx.layout = ctx.layout.rooted_at(temp_dir.path());
    let config = record(HostPlatform::Unix, |o| {
        o.action = "test".to_string();
        o.jobs = "2".to_string();
    });

    let executor = RecordingExecutor::returning(0);
    pipeline::run(&config, &ctx, &executor, &quiet()).unwrap();

    let lines = executor.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("cmake ../.."));
    assert_eq!(lines[1], "make gumTest -j 2");
    assert_eq!(lines[2], "src/gumTest");

    let build_dir = temp_dir.path().join("build").join("release");
    assert!(build_dir.is_dir());
    assert!(executor.lines.borrow().iter().all(|(_, cwd)| *cwd == build_dir));
}

#[test]
fn test_pipeline_stops_at_first_failure() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = unix();
    ctx.layout = ctx.layout.rooted_at(temp_dir.path());
    let config = record(HostPlatform::Unix, |o| o.action = "test".to_string());

    let executor = RecordingExecutor::returning(4);
    let err = pipeline::run(&config, &ctx, &executor, &quiet()).unwrap_err();
    assert!(matches!(err, ActError::CommandFailed(4)));
    assert_eq!(executor.lines().len(), 1);
}

#[test]
fn test_pipeline_rejects_before_running_anything() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = windows();
    ctx.layout = ctx.layout.rooted_at(temp_dir.path());
    let config = record(HostPlatform::Windows, |o| o.action = "doc".to_string());

    let executor = RecordingExecutor::returning(0);
    assert!(pipeline::run(&config, &ctx, &executor, &quiet()).is_err());
    assert!(executor.lines().is_empty());
    assert!(!temp_dir.path().join("build").exists());
}

#[test]
fn test_pipeline_dry_run_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = unix();
    ctx.layout = ctx.layout.rooted_at(temp_dir.path());
    let config = record(HostPlatform::Unix, |o| o.dry_run = true);

    let executor = RecordingExecutor::returning(0);
    pipeline::run(&config, &ctx, &executor, &quiet()).unwrap();
    assert!(executor.lines().is_empty());
    assert!(!temp_dir.path().join("build").exists());
}

#[test]
fn test_clean_removes_build_dir() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = unix();
    ctx.layout = ctx.layout.rooted_at(temp_dir.path());
    std::fs::create_dir_all(temp_dir.path().join("build/release")).unwrap();

    pipeline::clean(&ctx, true, &quiet()).unwrap();
    assert!(temp_dir.path().join("build").exists());

    pipeline::clean(&ctx, false, &quiet()).unwrap();
    assert!(!temp_dir.path().join("build").exists());
}
