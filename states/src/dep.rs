use std::{
    any::TypeId,
    collections::BTreeMap,
};

use crate::{Compute, Error, State};

/// Read-only view of registered states and computes handed to [`Compute::compute`].
#[derive(Clone, Copy)]
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state_ref<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`](crate::StateCtx::add_state).
    pub fn get_state_ref<T: State>(&self) -> &'a T {
        self.try_state_ref::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_compute_ref<T: Compute>(&self) -> Result<&'a T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
            .ok_or_else(Error::compute_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::record_compute`](crate::StateCtx::record_compute).
    pub fn get_compute_ref<T: Compute>(&self) -> &'a T {
        self.try_compute_ref::<T>().unwrap_or_else(|e| panic!("{e}"))
    }
}
