use serde::Serialize;

use super::{ActConfig, LayoutConfig};
use crate::build::jobs;
use crate::platform::HostPlatform;

/// Process-wide settings, built once at startup and passed explicitly to
/// every component.
#[derive(Debug, Clone, Serialize)]
pub struct ActContext {
    pub platform: HostPlatform,

    /// Available CPU cores
    pub cores: usize,

    pub tools: ResolvedTools,

    pub layout: LayoutConfig,
}

/// Tool commands after PATH lookup. Optional tools are `None` when they
/// cannot be found; the steps needing them fail or degrade on their own.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTools {
    pub cmake: String,
    pub make: String,
    pub python: String,
    pub msbuild: Option<String>,
    pub clang_format: Option<String>,
    pub doc_linter: Option<String>,
}

impl ActContext {
    pub fn from_config(config: &ActConfig) -> Self {
        let tools = &config.tools;
        let doc_linter = Some(tools.doc_linter.trim())
            .filter(|cmd| !cmd.is_empty())
            .map(str::to_string);

        Self {
            platform: HostPlatform::current(),
            cores: jobs::available_cores(),
            tools: ResolvedTools {
                cmake: tools.cmake.clone(),
                make: tools.make.clone(),
                python: tools.python.clone(),
                msbuild: resolve_tool(&tools.msbuild),
                clang_format: resolve_tool(&tools.clang_format),
                doc_linter,
            },
            layout: config.layout.clone(),
        }
    }

    /// Context with plain tool names, every optional tool assumed present
    pub fn with_defaults(platform: HostPlatform, cores: usize) -> Self {
        Self {
            platform,
            cores,
            tools: ResolvedTools {
                cmake: "cmake".to_string(),
                make: "make".to_string(),
                python: "python3".to_string(),
                msbuild: Some("msbuild".to_string()),
                clang_format: Some("clang-format".to_string()),
                doc_linter: None,
            },
            layout: LayoutConfig::default(),
        }
    }
}

/// Find an executable in PATH
fn resolve_tool(command: &str) -> Option<String> {
    let command = command.trim();
    if command.is_empty() {
        return None;
    }

    match which::which(command) {
        Ok(path) => Some(path.display().to_string()),
        Err(e) => {
            tracing::debug!("{} not resolved: {}", command, e);
            None
        }
    }
}
