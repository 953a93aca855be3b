use std::path::PathBuf;

use anyhow::{Result, bail};
use directory_business::{ExportCommand, ExportCompute, ExportInput, ExportStatus};
use directory_states::StateCtx;
use tracing::instrument;

use crate::commands::ensure_logged_in;
use crate::config::Config;
use crate::context::flush_and_await;
use crate::output::Output;

/// Download the export into `output`, or the default download directory.
#[instrument(skip_all, name = "export")]
pub async fn run_export(mut ctx: StateCtx, config: &Config, output: Option<PathBuf>) -> Result<PathBuf> {
    ensure_logged_in(config)?;
    let out = Output::stdout();

    ctx.update::<ExportInput>(|input| {
        *input = output.map(ExportInput::new).unwrap_or_default();
    });
    ctx.enqueue_command::<ExportCommand>();
    flush_and_await(&mut ctx).await;

    let status = ctx.compute::<ExportCompute>().status.clone();
    ctx.shutdown().await;

    match status {
        ExportStatus::Saved(path) => {
            out.success(format!("Saved {}", path.display()));
            Ok(path)
        }
        ExportStatus::Failed(message) => bail!("Export failed: {message}"),
        ExportStatus::Idle | ExportStatus::Exporting => bail!("Export did not complete"),
    }
}
