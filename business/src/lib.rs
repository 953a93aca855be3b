//! Directory domain: table model, editor state machine and the commands that
//! talk to the directory service.

pub mod api;
mod config;
mod context;
mod editor;
pub mod error;
mod export;
pub mod filter;
pub mod history;
pub mod http;
mod load;
mod save;
mod session;
pub mod table;
mod upload;
mod view;

#[cfg(test)]
mod test_utils;

pub use api::{Credentials, INVALID_CREDENTIALS};
pub use config::{BusinessConfig, DEFAULT_API_BASE_URL};
pub use context::build_state_ctx;
pub use editor::{
    DirectoryEditor, PendingConfirmation, PhotoFields, delete_column_prompt, delete_row_prompt,
};
pub use error::{DirectoryError, EditError};
pub use export::{EXPORT_FILE_NAME, ExportCommand, ExportCompute, ExportInput, ExportStatus};
pub use filter::FilterState;
pub use load::{DirectoryLoadCompute, LoadDirectoryCommand, LoadStatus};
pub use save::{SaveCompute, SaveDirectoryCommand, SaveStatus};
pub use session::{
    LoginCommand, LoginInput, LogoutCommand, SessionCompute, SessionStatus, restore_session,
};
pub use table::{ACTIVE_NO, ACTIVE_YES, ColumnRole, DirectoryPayload, NEW_COLUMN_NAME, Table};
pub use upload::{
    PhotoFile, PhotoRequest, PhotoUploadCompute, UploadPhotoCommand, UploadPhotoInput,
    UploadStatus,
};
pub use view::DirectoryViewCompute;
