use std::path::Path;

use anyhow::{Context as _, Result, bail};
use directory_business::{
    DirectoryEditor, PhotoFile, PhotoUploadCompute, SaveCompute, SaveDirectoryCommand,
    SaveStatus, UploadPhotoCommand, UploadPhotoInput, UploadStatus,
};
use directory_states::StateCtx;
use tracing::{info, instrument};

use crate::commands::{list::render_rows, load_directory};
use crate::config::Config;
use crate::context::flush_and_await;
use crate::output::Output;

/// Upload `file` for `row`, show the updated row and optionally save the table.
///
/// Returns the stored filename.
#[instrument(skip_all, name = "upload_photo", fields(row = row, file = %file.display()))]
pub async fn run_upload_photo(
    mut ctx: StateCtx,
    config: &Config,
    row: usize,
    file: &Path,
    save: bool,
) -> Result<String> {
    let out = Output::stdout();

    load_directory(&mut ctx, config).await?;

    let photo = PhotoFile::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    ctx.update::<UploadPhotoInput>(|input| *input = UploadPhotoInput::new(row, photo));
    ctx.enqueue_command::<UploadPhotoCommand>();
    flush_and_await(&mut ctx).await;

    let filename = match ctx.compute::<PhotoUploadCompute>().status.clone() {
        UploadStatus::Uploaded { filename, .. } => filename,
        UploadStatus::Failed { message, .. } => {
            ctx.shutdown().await;
            bail!("Photo upload failed: {message}");
        }
        UploadStatus::Idle | UploadStatus::Uploading { .. } => {
            ctx.shutdown().await;
            bail!("Photo upload did not complete");
        }
    };

    if filename.is_empty() {
        out.warning("The service stored the photo without returning a filename");
    } else {
        info!("Row {row} now points at {filename}");
        out.success(format!("Stored photo as {filename}"));
    }
    out.print(render_rows(ctx.state::<DirectoryEditor>(), &[row]));

    if save {
        ctx.enqueue_command::<SaveDirectoryCommand>();
        flush_and_await(&mut ctx).await;
        let status = ctx.compute::<SaveCompute>().status.clone();
        ctx.shutdown().await;
        match status {
            SaveStatus::Saved { .. } => out.success("Changes saved"),
            SaveStatus::Failed(message) => bail!("Saving the directory failed: {message}"),
            SaveStatus::Idle | SaveStatus::Saving => bail!("Saving the directory did not complete"),
        }
    } else {
        ctx.shutdown().await;
        out.dim("Run with --save to keep the new filename in the directory.");
    }

    Ok(filename)
}
