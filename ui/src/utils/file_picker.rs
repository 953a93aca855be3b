//! Photo selection for the upload buttons.
//!
//! The trait lets tests hand in a file without opening a system dialog.

use std::path::Path;

use directory_business::PhotoFile;

/// Extensions offered by the native dialog.
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

pub trait PhotoPicker {
    /// Ask the user for an image. `None` when the dialog is cancelled or the
    /// file cannot be read.
    fn pick_photo(&self) -> Option<PhotoFile>;
}

/// Native dialog via `rfd`.
#[derive(Default)]
pub struct SystemPhotoPicker;

impl PhotoPicker for SystemPhotoPicker {
    fn pick_photo(&self) -> Option<PhotoFile> {
        let path = rfd::FileDialog::new()
            .add_filter("Imagen", &IMAGE_EXTENSIONS)
            .set_title("Seleccionar foto")
            .pick_file()?;

        log::info!("User selected file: {}", path.display());
        load_photo(&path)
    }
}

fn load_photo(path: &Path) -> Option<PhotoFile> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Failed to read {}: {err}", path.display());
            return None;
        }
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "foto".to_owned());
    Some(PhotoFile::new(name, bytes))
}
