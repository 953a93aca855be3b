use directory_business::DirectoryEditor;
use directory_states::StateCtx;
use egui::{Response, Ui};

/// "+ Fila", "+ Columna", "Revertir", "Cancelar todo" and "Limpiar filtros".
pub fn toolbar(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let can_undo = state_ctx.state::<DirectoryEditor>().can_undo();

    ui.horizontal(|ui| {
        if ui.button("+ Fila").clicked() {
            state_ctx.update::<DirectoryEditor>(DirectoryEditor::add_row);
        }
        if ui.button("+ Columna").clicked() {
            state_ctx.update::<DirectoryEditor>(DirectoryEditor::add_column);
        }
        if ui
            .add_enabled(can_undo, egui::Button::new("Revertir"))
            .clicked()
        {
            state_ctx.update::<DirectoryEditor>(|editor| {
                editor.undo();
            });
        }
        if ui.button("Cancelar todo").clicked() {
            state_ctx.update::<DirectoryEditor>(DirectoryEditor::reset_all);
        }
        if ui.button("Limpiar filtros").clicked() {
            state_ctx.update::<DirectoryEditor>(DirectoryEditor::clear_filters);
        }
    })
    .response
}
