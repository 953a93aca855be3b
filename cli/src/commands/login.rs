use std::path::Path;

use anyhow::{Context as _, Result, bail};
use directory_business::{LoginCommand, LoginInput, SessionCompute, SessionStatus};
use directory_states::StateCtx;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::context::flush_and_await;
use crate::output::Output;

#[instrument(skip_all, name = "login", fields(user = %user))]
pub async fn run_login(
    mut ctx: StateCtx,
    config_path: &Path,
    user: String,
    password: Option<String>,
) -> Result<()> {
    let out = Output::stdout();

    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Contraseña: ").context("Failed to read password")?,
    };

    ctx.update::<LoginInput>(|input| *input = LoginInput::new(user.clone(), password));
    ctx.enqueue_command::<LoginCommand>();
    flush_and_await(&mut ctx).await;

    let status = ctx.compute::<SessionCompute>().status.clone();
    ctx.shutdown().await;

    match status {
        SessionStatus::LoggedIn => {
            let mut config = Config::load(config_path)?;
            config.set_logged_in(&user);
            config.save(config_path)?;
            info!("Logged in as {user}");
            out.success(format!("Logged in as {user}"));
            Ok(())
        }
        SessionStatus::Failed(message) => {
            error!("Login failed: {message}");
            bail!("Login failed: {message}")
        }
        SessionStatus::LoggedOut | SessionStatus::Authenticating => {
            bail!("Login did not complete")
        }
    }
}

/// Forget the session. Nothing is sent to the service.
#[instrument(skip_all, name = "logout")]
pub fn run_logout(config_path: &Path) -> Result<()> {
    let out = Output::stdout();
    let mut config = Config::load(config_path)?;
    if !config.is_logged_in() {
        out.dim("Not logged in.");
        return Ok(());
    }
    config.clear_session();
    config.save(config_path)?;
    out.success("Logged out");
    Ok(())
}
