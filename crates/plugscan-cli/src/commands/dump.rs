//! Tab-separated plugin dump, one line per plugin.

use std::io::Write;

use clap::Args;

use plugscan_core::config::AppConfig;
use plugscan_core::error::AppError;

/// Arguments for the dump command
#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Do not report load failures
    #[arg(long)]
    pub silent: bool,
}

/// Execute the dump command
pub async fn execute(args: &DumpArgs, config: AppConfig) -> Result<(), AppError> {
    let mode = super::failure_mode(args.silent, &config.plugins);
    let ctx = super::discover(config.plugins, mode).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ctx.dump_all(&mut out)?;
    out.flush()?;
    Ok(())
}
