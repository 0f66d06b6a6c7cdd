use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::build::{self, BuildArgs};
use super::{OutputFormat, Session};
use crate::build::BuildPlan;
use crate::config::{Action, BuildConfig};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Action whose lines are shown: install, uninstall, lib, test or doc
    pub action: String,

    #[command(flatten)]
    pub build: BuildArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    config: &'a BuildConfig,
    plan: &'a BuildPlan,
}

pub fn execute(args: ShowArgs, session: &Session) -> Result<()> {
    let action = Action::parse(&args.action)?;
    let config = build::resolve(action, &args.build, session)?;
    let plan = BuildPlan::new(&config, &session.ctx)?;

    match args.format {
        OutputFormat::Json => {
            let report = ShowReport {
                config: &config,
                plan: &plan,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            session.output.section_header(&format!(
                "[{}] on [{}] in [{}] mode",
                config.action.as_str(),
                config.target.as_str(),
                config.mode.as_str()
            ));
            println!("directory: {}", plan.directory.display());
            println!("configure: {}", plan.configure);
            println!("compile:   {}", plan.compile);
            if !plan.post.is_empty() {
                println!("post:      {}", plan.post.line);
            }
        }
    }

    Ok(())
}
