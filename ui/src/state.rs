use directory_business::{BusinessConfig, build_state_ctx};
use directory_states::StateCtx;

use crate::utils::file_picker::{PhotoPicker, SystemPhotoPicker};

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Chooses the file for "Subir foto".
    pub picker: Box<dyn PhotoPicker>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            ctx: build_state_ctx(BusinessConfig::from_env()),
            picker: Box::new(SystemPhotoPicker),
        }
    }
}

impl State {
    pub fn test(base_url: String) -> Self {
        Self {
            ctx: build_state_ctx(BusinessConfig::new(base_url)),
            picker: Box::new(SystemPhotoPicker),
        }
    }

    #[must_use]
    pub fn with_picker(mut self, picker: impl PhotoPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }
}
