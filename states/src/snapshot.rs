use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::{Compute, Error, State};

/// Cloned states and computes captured when a command is enqueued.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
    computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub(crate) fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.insert(id, value);
    }

    /// Add a state by value. Used by tests that drive a command directly.
    pub fn with_state<T: State + Send>(mut self, state: T) -> Self {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
        self
    }

    /// Add a compute by value. Used by tests that drive a command directly.
    pub fn with_compute<T: Compute + Send>(mut self, compute: T) -> Self {
        self.computes.insert(TypeId::of::<T>(), Box::new(compute));
        self
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(Error::not_in_snapshot::<T>)
    }

    /// # Panics
    /// Panics if `T` does not opt into snapshots through [`SnapshotClone`](crate::SnapshotClone).
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(Error::not_in_snapshot::<T>)
    }

    /// # Panics
    /// Panics if `T` does not opt into snapshots through [`SnapshotClone`](crate::SnapshotClone).
    pub fn compute<T: Compute>(&self) -> &T {
        self.try_compute::<T>().unwrap_or_else(|e| panic!("{e}"))
    }
}
