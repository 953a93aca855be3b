//! The directory editor: header, toolbar, table and save button.

use directory_business::{
    ExportCommand, ExportCompute, ExportStatus, LogoutCommand, SaveCompute, SaveDirectoryCommand,
    SaveStatus,
};
use egui::{Align, Layout, Response, Ui};

use crate::{state::State, widgets};

pub fn directory_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.heading("Directorio en Excel");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Cerrar Sesión").clicked() {
                    state.ctx.dispatch::<LogoutCommand>();
                }
                let exporting = matches!(
                    state.ctx.compute::<ExportCompute>().status,
                    ExportStatus::Exporting
                );
                if ui
                    .add_enabled(!exporting, egui::Button::new("Descargar Excel"))
                    .clicked()
                {
                    state.ctx.dispatch::<ExportCommand>();
                }
            });
        });
        ui.separator();

        widgets::toolbar(&mut state.ctx, ui);
        ui.add_space(8.0);

        widgets::directory_table(&mut state.ctx, state.picker.as_ref(), ui);
        ui.add_space(8.0);

        let saving = matches!(
            state.ctx.compute::<SaveCompute>().status,
            SaveStatus::Saving
        );
        if ui
            .add_enabled(!saving, egui::Button::new("Guardar cambios"))
            .clicked()
        {
            state.ctx.dispatch::<SaveDirectoryCommand>();
        }
    })
    .response
}
