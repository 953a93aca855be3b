use directory_business::DirectoryEditor;
use directory_states::StateCtx;
use egui::{Id, Modal};

/// Asks before a row or column is deleted. Declining changes nothing.
///
/// The page underneath takes no input while the prompt is open.
pub fn confirm_modal(state_ctx: &mut StateCtx, ctx: &egui::Context) {
    let Some(prompt) = state_ctx
        .state::<DirectoryEditor>()
        .pending()
        .map(|pending| pending.prompt())
    else {
        return;
    };

    let answer = Modal::new(Id::new("confirm_delete"))
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.heading("Confirmar");
            ui.label(&prompt);
            ui.add_space(12.0);

            let mut answer = None;
            ui.horizontal(|ui| {
                if ui.button("Aceptar").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancelar").clicked() {
                    answer = Some(false);
                }
            });
            answer
        })
        .inner;

    if let Some(accepted) = answer {
        state_ctx.update::<DirectoryEditor>(|editor| {
            if let Err(err) = editor.resolve_confirmation(accepted) {
                log::warn!("Confirmation no longer applies: {err}");
            }
        });
    }
}
