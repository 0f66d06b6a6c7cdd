use anyhow::Result;

use super::Session;
use crate::build::pipeline;

pub fn execute(session: &Session) -> Result<()> {
    pipeline::clean(&session.ctx, session.dry_run, &session.output)?;
    Ok(())
}
