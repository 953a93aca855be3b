use directory_business::{SessionCompute, restore_session};

use crate::{pages, state::State, widgets};

/// Storage key of the persisted login flag.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";

pub struct DirectoryApp {
    state: State,
}

impl DirectoryApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Like [`DirectoryApp::new`], rehydrating the session from `storage`.
    pub fn restore(mut state: State, storage: Option<&dyn eframe::Storage>) -> Self {
        let logged_in = storage
            .and_then(|storage| eframe::get_value::<bool>(storage, IS_LOGGED_IN_KEY))
            .unwrap_or(false);
        restore_session(&mut state.ctx, logged_in);
        Self::new(state)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.ctx.compute::<SessionCompute>().is_logged_in()
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync Compute for render
        self.state.ctx.sync_computes();
        self.state.ctx.run_computed();

        let logged_in = self.is_logged_in();

        if logged_in {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                widgets::status_line(&self.state.ctx, ui);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if logged_in {
                pages::directory_page(&mut self.state, ui);
            } else {
                pages::login_page(&mut self.state, ui);
            }
        });

        if logged_in {
            widgets::confirm_modal(&mut self.state.ctx, ctx);
        }

        // Run background jobs
        self.state.ctx.flush_commands();
        self.state.ctx.run_computed();

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, IS_LOGGED_IN_KEY, &self.is_logged_in());
    }
}
