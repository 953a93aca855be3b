//! Per-row photo upload.
//!
//! The name fields are read from the row when the command is enqueued. The
//! stored filename comes back later and is written through the editor's normal
//! cell edit, so two uploads racing for the same row end with whichever
//! response arrived last.

use std::{
    any::{Any, TypeId},
    path::Path,
};

use directory_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, State,
    Updater, assign_impl, state_assign_impl,
};
use log::{error, info, warn};

use crate::{
    BusinessConfig, DirectoryEditor,
    api::{self, PhotoUpload},
    error::{DirectoryError, DirectoryResult},
};

/// An image picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub async fn read(path: &Path) -> DirectoryResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DirectoryError::Io(format!("{} is not a file", path.display())))?;
        Ok(Self { name, bytes })
    }

    /// Content type guessed from the file extension.
    pub fn mime(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRequest {
    pub row: usize,
    pub file: PhotoFile,
}

/// Photo waiting to be sent by [`UploadPhotoCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPhotoInput {
    pub request: Option<PhotoRequest>,
}

impl UploadPhotoInput {
    pub fn new(row: usize, file: PhotoFile) -> Self {
        Self {
            request: Some(PhotoRequest { row, file }),
        }
    }
}

impl SnapshotClone for UploadPhotoInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for UploadPhotoInput {
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
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading {
        row: usize,
    },
    Uploaded {
        row: usize,
        filename: String,
    },
    Failed {
        row: usize,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoUploadCompute {
    pub status: UploadStatus,
}

impl SnapshotClone for PhotoUploadCompute {}

impl State for PhotoUploadCompute {
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

impl Compute for PhotoUploadCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

#[derive(Default, Debug)]
pub struct UploadPhotoCommand;

impl Command for UploadPhotoCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let Some(PhotoRequest { row, file }) = snap.state::<UploadPhotoInput>().request.clone()
        else {
            warn!("Photo upload requested without a file");
            return Box::pin(async {});
        };

        let fields = match snap.state::<DirectoryEditor>().photo_fields(row) {
            Ok(fields) => fields,
            Err(err) => {
                warn!("Photo upload skipped: {err}");
                updater.set(PhotoUploadCompute {
                    status: UploadStatus::Failed {
                        row,
                        message: err.to_string(),
                    },
                });
                return Box::pin(async {});
            }
        };

        let upload = PhotoUpload {
            mime: file.mime(),
            file_name: file.name,
            bytes: file.bytes,
            first_name: fields.first_name,
            paterno: fields.paterno,
            materno: fields.materno,
        };

        Box::pin(async move {
            updater.set(PhotoUploadCompute {
                status: UploadStatus::Uploading { row },
            });

            match api::upload_photo(&config, upload).await {
                Ok(filename) => {
                    info!("Stored photo for row {row} as '{filename}'");
                    let stored = filename.clone();
                    updater.update::<DirectoryEditor>(move |editor| {
                        if let Err(err) = editor.apply_uploaded_photo(row, &stored) {
                            warn!("Uploaded photo no longer has a row: {err}");
                        }
                    });
                    updater.set(PhotoUploadCompute {
                        status: UploadStatus::Uploaded { row, filename },
                    });
                }
                Err(err) => {
                    error!("Photo upload for row {row} failed: {err}");
                    updater.set(PhotoUploadCompute {
                        status: UploadStatus::Failed {
                            row,
                            message: err.user_message(),
                        },
                    });
                }
            }
        })
    }
}
