use std::any::{Any, type_name};

use log::error;

/// Opt-in cloning used when a command snapshot is taken.
///
/// States that commands never read keep the default, which leaves them out of
/// the snapshot.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

pub trait State: Any + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a value sent through an [`Updater`](crate::Updater).
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared body for [`State::assign_box`].
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!(
            "Ignoring update for {}: value has a different type",
            type_name::<T>()
        ),
    }
}
