use directory_states::StateCtx;

use crate::{
    BusinessConfig, DirectoryEditor, DirectoryLoadCompute, DirectoryViewCompute, ExportCommand,
    ExportCompute, ExportInput, LoadDirectoryCommand, LoginCommand, LoginInput, LogoutCommand,
    PhotoUploadCompute, SaveCompute, SaveDirectoryCommand, SessionCompute, UploadPhotoCommand,
    UploadPhotoInput,
};

/// A context with every directory state, compute and command registered.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(config);
    ctx.add_state(LoginInput::default());
    ctx.add_state(DirectoryEditor::default());
    ctx.add_state(UploadPhotoInput::default());
    ctx.add_state(ExportInput::default());

    ctx.record_compute(SessionCompute::default());
    ctx.record_compute(DirectoryLoadCompute::default());
    ctx.record_compute(DirectoryViewCompute::default());
    ctx.record_compute(SaveCompute::default());
    ctx.record_compute(PhotoUploadCompute::default());
    ctx.record_compute(ExportCompute::default());

    ctx.record_command(LoginCommand);
    ctx.record_command(LogoutCommand);
    ctx.record_command(LoadDirectoryCommand);
    ctx.record_command(SaveDirectoryCommand);
    ctx.record_command(UploadPhotoCommand);
    ctx.record_command(ExportCommand);

    ctx
}
