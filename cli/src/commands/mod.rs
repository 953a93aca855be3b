//! One module per subcommand.

pub mod export;
pub mod list;
pub mod login;
pub mod upload;

use anyhow::{Result, bail};
use directory_business::{DirectoryLoadCompute, LoadStatus, restore_session};
use directory_states::StateCtx;

use crate::config::Config;
use crate::context::flush_and_await;

pub use export::run_export;
pub use list::run_list;
pub use login::{run_login, run_logout};
pub use upload::run_upload_photo;

pub(crate) fn ensure_logged_in(config: &Config) -> Result<()> {
    if !config.is_logged_in() {
        bail!("Not logged in. Run `directory login --user <USER>` first.");
    }
    Ok(())
}

/// Restore the saved session and load the directory into the editor.
pub(crate) async fn load_directory(ctx: &mut StateCtx, config: &Config) -> Result<()> {
    ensure_logged_in(config)?;
    restore_session(ctx, true);
    flush_and_await(ctx).await;

    match &ctx.compute::<DirectoryLoadCompute>().status {
        LoadStatus::Loaded { .. } => Ok(()),
        LoadStatus::Failed(message) => bail!("Loading the directory failed: {message}"),
        LoadStatus::Idle | LoadStatus::Loading => bail!("Loading the directory did not complete"),
    }
}
