use serde::Serialize;

use crate::config::{ActContext, Action, BuildConfig, Compiler, Target};

/// Verification step run after a successful build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLine {
    /// Command to run; empty when there is nothing to verify
    pub line: String,
    /// Whether a nonzero status must stop the pipeline
    pub check_rc: bool,
}

impl PostLine {
    pub fn none() -> Self {
        Self {
            line: String::new(),
            check_rc: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

/// Post-build line. Only `test` has one: the produced test binary for
/// aGrUM, the Python test runner for pyAgrum.
pub fn post_line(config: &BuildConfig, ctx: &ActContext) -> PostLine {
    if config.action != Action::Test {
        return PostLine::none();
    }

    let windows = ctx.platform.is_windows();
    let line = match config.target {
        Target::Agrum => {
            if !windows {
                "src/gumTest".to_string()
            } else if config.compiler == Compiler::Mingw64 {
                r"src\gumTest.exe".to_string()
            } else {
                // debug or release, MSBuild writes into Release
                r"src\Release\gumTest.exe".to_string()
            }
        }
        Target::PyAgrum => {
            let runner = format!("gumTest.py {}", config.tests);
            let invocation = if windows {
                format!(
                    r#"copy /Y "wrappers\pyAgrum\Release\_pyAgrum.pyd" "wrappers\pyAgrum\." & {} ..\..\wrappers\pyAgrum\testunits\{}"#,
                    ctx.tools.python, runner
                )
            } else {
                format!(
                    "{} ../../wrappers/pyAgrum/testunits/{}",
                    ctx.tools.python, runner
                )
            };
            format!("{} {}", invocation, config.mode.as_str())
        }
    };

    PostLine {
        line,
        check_rc: true,
    }
}
