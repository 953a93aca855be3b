//! Login gate.
//!
//! The session is a local flag: the service checks the credentials once and
//! hands back no token. Logging out never calls the service, and a persisted
//! flag is trusted on startup without re-checking anything.

use std::any::{Any, TypeId};

use directory_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, State,
    StateCtx, Updater, assign_impl, state_assign_impl,
};
use log::info;

use crate::{
    BusinessConfig, DirectoryEditor,
    api::{self, Credentials},
    load::{LoadDirectoryCommand, load_into},
};

/// Fields of the login form.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub user: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

impl SnapshotClone for LoginInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for LoginInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    LoggedOut,
    Authenticating,
    LoggedIn,
    /// Login was rejected; the message is shown on the form.
    Failed(String),
}

/// Current session, written by [`LoginCommand`] and [`LogoutCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCompute {
    pub status: SessionStatus,
}

impl SessionCompute {
    pub fn logged_in() -> Self {
        Self {
            status: SessionStatus::LoggedIn,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.status == SessionStatus::LoggedIn
    }

    pub fn is_authenticating(&self) -> bool {
        self.status == SessionStatus::Authenticating
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl SnapshotClone for SessionCompute {}

impl State for SessionCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl Compute for SessionCompute {
    fn deps(&self) -> ComputeDeps {
        // Cache updated by a command; no derived dependencies.
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

/// Checks the credentials in [`LoginInput`], then loads the directory.
///
/// A rejected login leaves the session as it was and reports the service's
/// message through [`SessionStatus::Failed`].
#[derive(Default, Debug)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let credentials = snap.state::<LoginInput>().credentials();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            updater.set(SessionCompute {
                status: SessionStatus::Authenticating,
            });

            match api::login(&config, &credentials).await {
                Ok(()) => {
                    updater.set(SessionCompute::logged_in());
                    load_into(&config, &updater).await;
                }
                Err(err) => {
                    info!("Login rejected for '{}': {err}", credentials.user);
                    updater.set(SessionCompute {
                        status: SessionStatus::Failed(err.user_message()),
                    });
                }
            }
        })
    }
}

/// Ends the session locally: clears the form and discards the loaded data.
#[derive(Default, Debug)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        Box::pin(async move {
            info!("Logged out");
            updater.set(SessionCompute::default());
            updater.set(LoginInput::default());
            updater.update::<DirectoryEditor>(DirectoryEditor::clear);
        })
    }
}

/// Rehydrate the session from a persisted flag.
///
/// When the flag is set the session is marked logged in and a load is queued;
/// the caller flushes commands as usual.
pub fn restore_session(ctx: &mut StateCtx, logged_in: bool) {
    if !logged_in {
        return;
    }
    info!("Restoring persisted session");
    ctx.updater().set(SessionCompute::logged_in());
    ctx.sync_computes();
    ctx.enqueue_command::<LoadDirectoryCommand>();
}
