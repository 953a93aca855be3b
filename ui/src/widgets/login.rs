//! Login form. Shows a spinner while the service checks the credentials and
//! the service's message in red when it refuses them.

use directory_business::{LoginCommand, LoginInput, SessionCompute, SessionStatus};
use directory_states::StateCtx;
use egui::{Align, Layout, Response, Ui};

use crate::utils::colors::COLOR_RED;

pub fn login_widget(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let status = state_ctx.compute::<SessionCompute>().status.clone();

    match status {
        SessionStatus::Authenticating => show_loading(ui),
        SessionStatus::Failed(error) => show_login_form(state_ctx, ui, Some(&error)),
        SessionStatus::LoggedOut | SessionStatus::LoggedIn => {
            show_login_form(state_ctx, ui, None)
        }
    }
}

fn show_loading(ui: &mut Ui) -> Response {
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(20.0);
        ui.heading("Directorio");
        ui.add_space(40.0);

        ui.spinner();
        ui.label("Verificando...");
    })
    .response
}

fn show_login_form(state_ctx: &mut StateCtx, ui: &mut Ui, error: Option<&str>) -> Response {
    let login_input = state_ctx.state::<LoginInput>();
    let mut user = login_input.user.clone();
    let mut password = login_input.password.clone();
    let mut should_login = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Directorio");
            ui.add_space(40.0);

            if let Some(err) = error {
                ui.colored_label(COLOR_RED, err);
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Usuario:");
                ui.text_edit_singleline(&mut user);
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Contraseña:");
                let password_response =
                    ui.add(egui::TextEdit::singleline(&mut password).password(true));
                if password_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    should_login = true;
                }
            });

            ui.add_space(16.0);

            if ui.button("Entrar").clicked() {
                should_login = true;
            }
        })
        .response;

    let login_input = state_ctx.state::<LoginInput>();
    if login_input.user != user || login_input.password != password {
        state_ctx.update::<LoginInput>(|input| {
            input.user = user;
            input.password = password;
        });
    }

    if should_login {
        state_ctx.dispatch::<LoginCommand>();
    }

    response
}
