use std::any::{Any, TypeId};

use chrono::{DateTime, Utc};
use directory_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, State,
    Updater, assign_impl,
};
use log::{error, info};

use crate::{BusinessConfig, DirectoryEditor, api};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved {
        at: DateTime<Utc>,
    },
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveCompute {
    pub status: SaveStatus,
}

impl SnapshotClone for SaveCompute {}

impl State for SaveCompute {
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

impl Compute for SaveCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

/// Sends the table as it was when the command was enqueued to `POST /save`.
///
/// Failures land in [`SaveStatus::Failed`] so the user always hears about them.
#[derive(Default, Debug)]
pub struct SaveDirectoryCommand;

impl Command for SaveDirectoryCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let table = snap.state::<DirectoryEditor>().table().clone();

        Box::pin(async move {
            updater.set(SaveCompute {
                status: SaveStatus::Saving,
            });
            match api::save_directory(&config, &table).await {
                Ok(()) => {
                    info!("Saved {} rows", table.row_count());
                    updater.set(SaveCompute {
                        status: SaveStatus::Saved { at: Utc::now() },
                    });
                }
                Err(err) => {
                    error!("Saving the directory failed: {err}");
                    updater.set(SaveCompute {
                        status: SaveStatus::Failed(err.user_message()),
                    });
                }
            }
        })
    }
}
