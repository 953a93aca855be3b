use egui::{Response, Ui};

use crate::{state::State, widgets};

const FORM_WIDTH: f32 = 360.0;

/// Shown while logged out: the login form, narrow and a little below the top.
pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.set_max_width(FORM_WIDTH);
        ui.add_space(ui.available_height() * 0.15);
        widgets::login_widget(&mut state.ctx, ui)
    })
    .inner
}
