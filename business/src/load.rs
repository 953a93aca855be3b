use std::any::{Any, TypeId};

use chrono::{DateTime, Utc};
use directory_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, State,
    Updater, assign_impl,
};
use log::error;

use crate::{BusinessConfig, DirectoryEditor, api};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded {
        rows: usize,
        at: DateTime<Utc>,
    },
    Failed(String),
}

/// Outcome of the last directory load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryLoadCompute {
    pub status: LoadStatus,
}

impl DirectoryLoadCompute {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl SnapshotClone for DirectoryLoadCompute {}

impl State for DirectoryLoadCompute {
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

impl Compute for DirectoryLoadCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

/// Fetch the directory and hand it to the editor.
///
/// On failure the editor keeps whatever it had.
pub(crate) async fn load_into(config: &BusinessConfig, updater: &Updater) {
    updater.set(DirectoryLoadCompute {
        status: LoadStatus::Loading,
    });

    match api::fetch_directory(config).await {
        Ok(table) => {
            let rows = table.row_count();
            updater.update::<DirectoryEditor>(move |editor| editor.load(table));
            updater.set(DirectoryLoadCompute {
                status: LoadStatus::Loaded {
                    rows,
                    at: Utc::now(),
                },
            });
        }
        Err(err) => {
            error!("Loading the directory failed: {err}");
            updater.set(DirectoryLoadCompute {
                status: LoadStatus::Failed(err.user_message()),
            });
        }
    }
}

/// `GET /data` into [`DirectoryEditor`], resetting its baseline, filters and history.
#[derive(Default, Debug)]
pub struct LoadDirectoryCommand;

impl Command for LoadDirectoryCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        Box::pin(async move { load_into(&config, &updater).await })
    }
}
