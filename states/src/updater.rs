use std::any::{Any, TypeId, type_name};

use flume::Sender;
use log::warn;

use crate::State;

type Mutation = Box<dyn FnOnce(&mut dyn Any) + Send>;

pub(crate) enum Update {
    Replace {
        id: TypeId,
        type_name: &'static str,
        value: Box<dyn Any + Send>,
    },
    Mutate {
        id: TypeId,
        type_name: &'static str,
        apply: Mutation,
    },
}

/// Send-safe handle used by commands and computes to publish results.
///
/// Updates are queued and applied by [`StateCtx::sync_computes`](crate::StateCtx::sync_computes)
/// in the order they were sent.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    /// Replace the registered `T` wholesale.
    pub fn set<T: State + Send>(&self, value: T) {
        let update = Update::Replace {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            warn!("Dropped update for {}: context is gone", type_name::<T>());
        }
    }

    /// Mutate the registered `T` in place once the update is applied.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let apply: Mutation = Box::new(move |any: &mut dyn Any| {
            if let Some(target) = any.downcast_mut::<T>() {
                f(target);
            }
        });
        let update = Update::Mutate {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            apply,
        };
        if self.send.send(update).is_err() {
            warn!("Dropped mutation for {}: context is gone", type_name::<T>());
        }
    }
}
