//! Outcome of the last load, save, upload and export.

use directory_business::{
    DirectoryLoadCompute, ExportCompute, ExportStatus, LoadStatus, PhotoUploadCompute,
    SaveCompute, SaveStatus, UploadStatus,
};
use directory_states::StateCtx;
use egui::{Response, Ui};

use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

/// One line of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Busy(String),
    Done(String),
    Failed(String),
}

/// Messages for every operation that isn't idle, in a fixed order.
pub fn status_messages(state_ctx: &StateCtx) -> Vec<StatusMessage> {
    let mut messages = Vec::new();

    match &state_ctx.compute::<DirectoryLoadCompute>().status {
        LoadStatus::Idle => {}
        LoadStatus::Loading => messages.push(StatusMessage::Busy("Cargando directorio...".into())),
        LoadStatus::Loaded { rows, at } => messages.push(StatusMessage::Done(format!(
            "{rows} filas cargadas a las {}",
            at.format("%H:%M:%S")
        ))),
        LoadStatus::Failed(message) => messages.push(StatusMessage::Failed(format!(
            "No se pudo cargar el directorio: {message}"
        ))),
    }

    match &state_ctx.compute::<SaveCompute>().status {
        SaveStatus::Idle => {}
        SaveStatus::Saving => messages.push(StatusMessage::Busy("Guardando...".into())),
        SaveStatus::Saved { .. } => {
            messages.push(StatusMessage::Done("Cambios guardados".into()));
        }
        SaveStatus::Failed(message) => messages.push(StatusMessage::Failed(format!(
            "Error al guardar: {message}"
        ))),
    }

    match &state_ctx.compute::<PhotoUploadCompute>().status {
        UploadStatus::Idle => {}
        UploadStatus::Uploading { row } => {
            messages.push(StatusMessage::Busy(format!("Subiendo foto de la fila {row}...")));
        }
        UploadStatus::Uploaded { filename, .. } if filename.is_empty() => {
            messages.push(StatusMessage::Done("Foto subida".into()));
        }
        UploadStatus::Uploaded { filename, .. } => {
            messages.push(StatusMessage::Done(format!("Foto subida: {filename}")));
        }
        UploadStatus::Failed { message, .. } => messages.push(StatusMessage::Failed(format!(
            "Error al subir la foto: {message}"
        ))),
    }

    match &state_ctx.compute::<ExportCompute>().status {
        ExportStatus::Idle => {}
        ExportStatus::Exporting => messages.push(StatusMessage::Busy("Descargando...".into())),
        ExportStatus::Saved(path) => messages.push(StatusMessage::Done(format!(
            "Archivo guardado en {}",
            path.display()
        ))),
        ExportStatus::Failed(message) => messages.push(StatusMessage::Failed(format!(
            "Error al descargar: {message}"
        ))),
    }

    messages
}

pub fn status_line(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    ui.horizontal_wrapped(|ui| {
        for message in status_messages(state_ctx) {
            match message {
                StatusMessage::Busy(text) => {
                    ui.spinner();
                    ui.label(text);
                }
                StatusMessage::Done(text) => {
                    ui.colored_label(COLOR_GREEN, text);
                }
                StatusMessage::Failed(text) => {
                    ui.colored_label(COLOR_RED, text);
                }
            }
            ui.separator();
        }
    })
    .response
}

#[cfg(test)]
mod tests {
    use directory_business::{BusinessConfig, build_state_ctx};

    use super::*;

    #[test]
    fn test_idle_context_has_no_messages() {
        let ctx = build_state_ctx(BusinessConfig::default());
        assert!(status_messages(&ctx).is_empty());
    }

    #[test]
    fn test_failures_are_reported() {
        let mut ctx = build_state_ctx(BusinessConfig::default());
        let updater = ctx.updater();
        updater.set(SaveCompute {
            status: SaveStatus::Failed("Error interno".into()),
        });
        updater.set(PhotoUploadCompute {
            status: UploadStatus::Uploaded {
                row: 0,
                filename: "ana.png".into(),
            },
        });
        ctx.sync_computes();

        assert_eq!(
            status_messages(&ctx),
            vec![
                StatusMessage::Failed("Error al guardar: Error interno".into()),
                StatusMessage::Done("Foto subida: ana.png".into()),
            ]
        );
    }
}
