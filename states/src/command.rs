use std::{any::Any, future::Future, pin::Pin};

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only side effect, run via [`StateCtx::dispatch`](crate::StateCtx::dispatch)
/// or [`StateCtx::enqueue_command`](crate::StateCtx::enqueue_command).
///
/// Commands never touch live state. They read the snapshot captured when they
/// were enqueued and publish results through the updater.
pub trait Command: Any + Send + Sync {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture;
}
