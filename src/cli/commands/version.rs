//! Version information command

use anyhow::Result;

use crate::cli::Output;

pub async fn execute(output: &Output) -> Result<()> {
    output.info(&format!("{} {}", crate::PKG_NAME, crate::VERSION));
    output.verbose(crate::PKG_DESCRIPTION);
    Ok(())
}
