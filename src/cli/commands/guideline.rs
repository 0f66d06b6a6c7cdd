use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{OutputFormat, Session};
use crate::cli::Output;
use crate::guideline::{CheckResult, GuidelineEngine};

#[derive(Args, Debug)]
pub struct GuidelineArgs {
    /// Fix what can be fixed (missing .cpp files, license headers, formatting)
    #[arg(long)]
    pub correction: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    correction: bool,
    checks: &'a [CheckResult],
}

/// Run the checks. Violations are reported, never turned into an exit status.
pub fn execute(args: GuidelineArgs, session: &Session) -> Result<()> {
    // keep stdout clean for the JSON document
    let output = match args.format {
        OutputFormat::Json => Output::new(false, true),
        OutputFormat::Text => session.output,
    };

    let graph_path = session.config.dependency_graph_path();
    let engine = GuidelineEngine::from_context(&session.ctx, &graph_path, output)?;
    let report = engine.run(args.correction)?;
    let total = report.total();

    match args.format {
        OutputFormat::Json => {
            let json = JsonReport {
                total,
                correction: args.correction,
                checks: &report.checks,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if total == 0 {
                output.success("No guideline error");
            } else {
                output.warning(&format!(
                    "[{}] guideline error{} found",
                    total,
                    if total > 1 { "s" } else { "" }
                ));
            }
        }
    }

    Ok(())
}
