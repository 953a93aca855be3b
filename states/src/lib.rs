//! Reactive state runtime shared by the directory front-ends.
//!
//! - [`State`]: plain values owned by [`StateCtx`]
//! - [`Compute`]: values derived from states, or caches written by commands
//! - [`Command`]: async side effects that read a [`CommandSnapshot`] and report
//!   through an [`Updater`]

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod snapshot;
mod state;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State, state_assign_impl};
pub use updater::Updater;
