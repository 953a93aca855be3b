use std::{
    any::{Any, TypeId},
    path::{Path, PathBuf},
};

use directory_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, State,
    Updater, assign_impl, state_assign_impl,
};
use log::{error, info};

use crate::{BusinessConfig, api, error::DirectoryResult};

/// Name the export is always saved under.
pub const EXPORT_FILE_NAME: &str = "DIRECTORIO.xlsx";

/// Where [`ExportCommand`] writes the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportInput {
    /// Defaults to the user's download directory, then the working directory.
    pub target_dir: Option<PathBuf>,
}

impl ExportInput {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: Some(target_dir.into()),
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.target_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(EXPORT_FILE_NAME)
    }
}

impl SnapshotClone for ExportInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for ExportInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportStatus {
    #[default]
    Idle,
    Exporting,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportCompute {
    pub status: ExportStatus,
}

impl SnapshotClone for ExportCompute {}

impl State for ExportCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl Compute for ExportCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

async fn export_to(config: &BusinessConfig, path: &Path) -> DirectoryResult<()> {
    let bytes = api::download_export(config).await?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Downloads the spreadsheet export and saves it as [`EXPORT_FILE_NAME`].
/// The editor is not touched.
#[derive(Default, Debug)]
pub struct ExportCommand;

impl Command for ExportCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let path = snap.state::<ExportInput>().target_path();

        Box::pin(async move {
            updater.set(ExportCompute {
                status: ExportStatus::Exporting,
            });
            match export_to(&config, &path).await {
                Ok(()) => {
                    info!("Exported directory to {}", path.display());
                    updater.set(ExportCompute {
                        status: ExportStatus::Saved(path),
                    });
                }
                Err(err) => {
                    error!("Export failed: {err}");
                    updater.set(ExportCompute {
                        status: ExportStatus::Failed(err.user_message()),
                    });
                }
            }
        })
    }
}
