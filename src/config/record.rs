//! The configuration record consumed by the command line builders
//!
//! [`BuildOptions`] is the loose, string-typed shape coming from config
//! files, environment and CLI flags. [`BuildConfig::from_options`] validates
//! it into the typed record: an unknown enumerant, or a compiler that does not
//! exist on the host platform, is rejected here, before any line is built.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::build::modules::ModuleSet;
use crate::error::{ActError, ActResult};
use crate::platform::HostPlatform;

/// Raw build options, as found in `[build]` and on the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub action: String,
    pub mode: String,
    pub target: String,
    pub modules: String,
    pub jobs: String,
    pub tests: String,
    pub threads: String,
    pub destination: String,
    pub compiler: Option<String>,
    pub compiler_dir: Option<String>,
    pub python3lib: Option<String>,
    pub python3include: Option<String>,
    pub fixed_seed_value: String,
    pub with_sql: bool,
    pub static_lib: bool,
    pub coverage: bool,
    pub profiling: bool,
    pub verbose: bool,
    pub fixed_seed: bool,
    pub dry_run: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            action: "lib".to_string(),
            mode: "release".to_string(),
            target: "aGrUM".to_string(),
            modules: "ALL".to_string(),
            jobs: "halfexcept1".to_string(),
            tests: "quick".to_string(),
            threads: "omp".to_string(),
            destination: "/usr/local".to_string(),
            compiler: None,
            compiler_dir: None,
            python3lib: None,
            python3include: None,
            fixed_seed_value: "10".to_string(),
            with_sql: false,
            static_lib: false,
            coverage: false,
            profiling: false,
            verbose: false,
            fixed_seed: false,
            dry_run: false,
        }
    }
}

/// Look `value` up in a table of accepted names, ignoring case
fn parse_choice<T: Copy>(option: &'static str, value: &str, choices: &[(&str, T)]) -> ActResult<T> {
    let wanted = value.trim();
    choices
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, choice)| *choice)
        .ok_or_else(|| ActError::InvalidOption {
            option,
            value: value.to_string(),
            expected: choices
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Install,
    Uninstall,
    Lib,
    Test,
    Doc,
}

impl Action {
    const CHOICES: &'static [(&'static str, Action)] = &[
        ("install", Action::Install),
        ("uninstall", Action::Uninstall),
        ("lib", Action::Lib),
        ("test", Action::Test),
        ("doc", Action::Doc),
    ];

    pub fn parse(value: &str) -> ActResult<Self> {
        parse_choice("action", value, Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Uninstall => "uninstall",
            Action::Lib => "lib",
            Action::Test => "test",
            Action::Doc => "doc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Release,
    Debug,
}

impl Mode {
    pub fn parse(value: &str) -> ActResult<Self> {
        parse_choice("mode", value, &[("release", Mode::Release), ("debug", Mode::Debug)])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Release => "release",
            Mode::Debug => "debug",
        }
    }
}

/// What gets built: the native library or its Python binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Target {
    #[serde(rename = "aGrUM")]
    Agrum,
    #[serde(rename = "pyAgrum")]
    PyAgrum,
}

impl Target {
    pub fn parse(value: &str) -> ActResult<Self> {
        parse_choice("target", value, &[("aGrUM", Target::Agrum), ("pyAgrum", Target::PyAgrum)])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Agrum => "aGrUM",
            Target::PyAgrum => "pyAgrum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Threads {
    Omp,
    Std,
}

impl Threads {
    pub fn parse(value: &str) -> ActResult<Self> {
        parse_choice("threads", value, &[("omp", Threads::Omp), ("std", Threads::Std)])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Threads::Omp => "omp",
            Threads::Std => "std",
        }
    }
}

/// Compiler family. Visual Studio and MinGW variants select a CMake
/// generator on Windows; gcc and clang select compiler executables elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compiler {
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "clang")]
    Clang,
    #[serde(rename = "mvsc22")]
    Mvsc22,
    #[serde(rename = "mvsc22_32")]
    Mvsc22Win32,
    #[serde(rename = "mvsc19")]
    Mvsc19,
    #[serde(rename = "mvsc19_32")]
    Mvsc19Win32,
    #[serde(rename = "mvsc17")]
    Mvsc17,
    #[serde(rename = "mvsc17_32")]
    Mvsc17Win32,
    #[serde(rename = "mvsc15")]
    Mvsc15,
    #[serde(rename = "mvsc15_32")]
    Mvsc15Win32,
    #[serde(rename = "mingw64")]
    Mingw64,
}

impl Compiler {
    const CHOICES: &'static [(&'static str, Compiler)] = &[
        ("gcc", Compiler::Gcc),
        ("clang", Compiler::Clang),
        ("mvsc22", Compiler::Mvsc22),
        ("mvsc22_32", Compiler::Mvsc22Win32),
        ("mvsc19", Compiler::Mvsc19),
        ("mvsc19_32", Compiler::Mvsc19Win32),
        ("mvsc17", Compiler::Mvsc17),
        ("mvsc17_32", Compiler::Mvsc17Win32),
        ("mvsc15", Compiler::Mvsc15),
        ("mvsc15_32", Compiler::Mvsc15Win32),
        ("mingw64", Compiler::Mingw64),
    ];

    pub fn parse(value: &str) -> ActResult<Self> {
        parse_choice("compiler", value, Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        Self::CHOICES
            .iter()
            .find(|(_, compiler)| *compiler == self)
            .map(|(name, _)| *name)
            .unwrap_or("gcc")
    }

    /// Default compiler family for a platform
    pub fn default_for(platform: HostPlatform) -> Self {
        match platform {
            HostPlatform::Windows => Compiler::Mvsc22,
            HostPlatform::Unix => Compiler::Gcc,
        }
    }

    pub fn permitted_on(self, platform: HostPlatform) -> bool {
        let windows_family = !matches!(self, Compiler::Gcc | Compiler::Clang);
        windows_family == platform.is_windows()
    }

    /// CMake generator arguments, for the Windows families
    pub fn generator(self) -> Option<&'static str> {
        match self {
            Compiler::Mvsc22 => Some(r#"-G "Visual Studio 17 2022" -A x64"#),
            Compiler::Mvsc22Win32 => Some(r#"-G "Visual Studio 17 2022" -A Win32"#),
            Compiler::Mvsc19 => Some(r#"-G "Visual Studio 16 2019" -A x64"#),
            Compiler::Mvsc19Win32 => Some(r#"-G "Visual Studio 16 2019" -A Win32"#),
            Compiler::Mvsc17 => Some(r#"-G "Visual Studio 15 2017 Win64""#),
            Compiler::Mvsc17Win32 => Some(r#"-G "Visual Studio 15 2017""#),
            Compiler::Mvsc15 => Some(r#"-G "Visual Studio 14 2015 Win64""#),
            Compiler::Mvsc15Win32 => Some(r#"-G "Visual Studio 14 2015""#),
            Compiler::Mingw64 => Some(r#"-G "MinGW Makefiles""#),
            Compiler::Gcc | Compiler::Clang => None,
        }
    }

    /// C and C++ compiler executables, for the non-Windows families
    pub fn executables(self) -> Option<(&'static str, &'static str)> {
        match self {
            Compiler::Gcc => Some(("gcc", "g++")),
            Compiler::Clang => Some(("clang", "clang++")),
            _ => None,
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope of the pyAgrum test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestScope {
    /// Quick tests, optionally restricted to a named subset
    Quick(Option<String>),
    /// Everything, notebooks included
    All,
}

impl TestScope {
    pub fn parse(value: &str) -> ActResult<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(TestScope::All);
        }
        match value.split_once(':') {
            None if value.eq_ignore_ascii_case("quick") => Ok(TestScope::Quick(None)),
            Some((head, subset)) if head.eq_ignore_ascii_case("quick") && !subset.is_empty() => {
                Ok(TestScope::Quick(Some(subset.to_string())))
            }
            _ => Err(ActError::InvalidTestScope(value.to_string())),
        }
    }
}

impl fmt::Display for TestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestScope::Quick(None) => write!(f, "quick"),
            TestScope::Quick(Some(subset)) => write!(f, "quick:{subset}"),
            TestScope::All => write!(f, "all"),
        }
    }
}

impl Serialize for TestScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validated configuration record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    pub action: Action,
    pub mode: Mode,
    pub target: Target,
    pub modules: ModuleSet,
    pub compiler: Compiler,
    pub compiler_dir: Option<String>,
    pub threads: Threads,
    /// Symbolic request, resolved against the core count when the compile
    /// line is built
    pub jobs: String,
    pub tests: TestScope,
    pub destination: String,
    pub python3lib: Option<String>,
    pub python3include: Option<String>,
    /// Seed injected when a fixed seed was requested
    pub fixed_seed: Option<String>,
    pub with_sql: bool,
    pub static_lib: bool,
    pub coverage: bool,
    pub profiling: bool,
    pub verbose: bool,
    pub dry_run: bool,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl BuildConfig {
    /// Validate raw options for the given host platform
    pub fn from_options(options: &BuildOptions, platform: HostPlatform) -> ActResult<Self> {
        let compiler = match non_empty(&options.compiler) {
            Some(name) => Compiler::parse(&name)?,
            None => Compiler::default_for(platform),
        };
        if !compiler.permitted_on(platform) {
            return Err(ActError::UnsupportedCompiler {
                compiler: compiler.to_string(),
                platform: platform.to_string(),
            });
        }

        let fixed_seed = if options.fixed_seed {
            let seed = options.fixed_seed_value.trim();
            if seed.parse::<u64>().is_err() {
                return Err(ActError::InvalidOption {
                    option: "fixed_seed_value",
                    value: seed.to_string(),
                    expected: "a non-negative integer".to_string(),
                });
            }
            Some(seed.to_string())
        } else {
            None
        };

        Ok(Self {
            action: Action::parse(&options.action)?,
            mode: Mode::parse(&options.mode)?,
            target: Target::parse(&options.target)?,
            modules: ModuleSet::parse(&options.modules),
            compiler,
            compiler_dir: non_empty(&options.compiler_dir),
            threads: Threads::parse(&options.threads)?,
            jobs: options.jobs.trim().to_string(),
            tests: TestScope::parse(&options.tests)?,
            destination: options.destination.clone(),
            python3lib: non_empty(&options.python3lib),
            python3include: non_empty(&options.python3include),
            fixed_seed,
            with_sql: options.with_sql,
            static_lib: options.static_lib,
            coverage: options.coverage,
            profiling: options.profiling,
            verbose: options.verbose,
            dry_run: options.dry_run,
        })
    }
}
