use std::any::TypeId;

use crate::{Dep, State, Updater};

/// `(state ids, compute ids)` a compute reads.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// A cached value derived from other states, or written by commands.
///
/// Computes that only cache command results declare no dependencies and keep
/// `compute` as a no-op; they change only through [`Updater::set`].
pub trait Compute: State {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);
}

/// Shared body for a compute's [`State::assign_box`].
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn std::any::Any + Send>) {
    crate::state_assign_impl(target, new_self);
}
