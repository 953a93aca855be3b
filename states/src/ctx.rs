use std::{
    any::{TypeId, type_name},
    collections::{BTreeMap, BTreeSet, VecDeque},
    sync::Arc,
};

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio::task::JoinSet;

use crate::{
    Command, CommandSnapshot, Compute, Dep, Error, State, Updater, updater::Update,
};

/// Owner of every registered state, compute and command.
///
/// The context lives on the UI (or CLI) thread. Commands run on spawned tasks
/// and report back through [`Updater`]; nothing they send is visible until
/// [`StateCtx::sync_computes`] runs.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,

    queue: VecDeque<(TypeId, &'static str, CommandSnapshot)>,
    dirty: BTreeSet<TypeId>,

    send: Sender<Update>,
    recv: Receiver<Update>,

    tasks: JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            dirty: BTreeSet::new(),
            send,
            recv,
            tasks: JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(id, Box::new(state));
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        // Force the first `run_computed` to fill it in.
        let (state_ids, compute_ids) = compute.deps();
        self.dirty.extend(state_ids.iter().chain(compute_ids).copied());
        self.computes.insert(TypeId::of::<T>(), Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    /// Mutable access; marks `T` dirty so dependent computes re-run.
    ///
    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.dirty.insert(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{}", Error::state_not_found::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("{}", Error::compute_not_found::<T>()))
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Queue `T` with a snapshot of the current states and computes.
    ///
    /// The command does not start until [`StateCtx::flush_commands`].
    pub fn enqueue_command<T: Command>(&mut self) {
        let id = TypeId::of::<T>();
        if !self.commands.contains_key(&id) {
            error!("{}", Error::command_not_found::<T>());
            return;
        }
        let snap = self.snapshot();
        debug!("Enqueued {}", type_name::<T>());
        self.queue.push_back((id, type_name::<T>(), snap));
    }

    /// Enqueue and immediately spawn `T`.
    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    /// Spawn every queued command on the task set.
    pub fn flush_commands(&mut self) {
        while let Some((id, name, snap)) = self.queue.pop_front() {
            let Some(command) = self.commands.get(&id).cloned() else {
                continue;
            };
            debug!("Running {name}");
            let future = command.run(snap, self.updater());
            self.tasks.spawn(future);
        }
    }

    /// Apply everything sent through [`Updater`]s, in arrival order.
    pub fn sync_computes(&mut self) {
        while let Some(finished) = self.tasks.try_join_next() {
            if let Err(err) = finished {
                error!("Command task failed: {err}");
            }
        }

        for update in self.recv.try_iter() {
            match update {
                Update::Replace {
                    id,
                    type_name,
                    value,
                } => {
                    if let Some(state) = self.states.get_mut(&id) {
                        state.assign_box(value);
                    } else if let Some(compute) = self.computes.get_mut(&id) {
                        compute.assign_box(value);
                    } else {
                        warn!("Dropped update for unregistered {type_name}");
                        continue;
                    }
                    self.dirty.insert(id);
                }
                Update::Mutate {
                    id,
                    type_name,
                    apply,
                } => {
                    if let Some(state) = self.states.get_mut(&id) {
                        apply(state.as_any_mut());
                    } else if let Some(compute) = self.computes.get_mut(&id) {
                        apply(compute.as_any_mut());
                    } else {
                        warn!("Dropped mutation for unregistered {type_name}");
                        continue;
                    }
                    self.dirty.insert(id);
                }
            }
        }
    }

    /// Re-run computes whose dependencies changed since the last call, then
    /// apply their results.
    pub fn run_computed(&mut self) {
        if self.dirty.is_empty() {
            return;
        }
        let dirty = std::mem::take(&mut self.dirty);
        let updater = self.updater();
        let dep = Dep::new(&self.states, &self.computes);

        for compute in self.computes.values() {
            let (state_ids, compute_ids) = compute.deps();
            if state_ids.iter().chain(compute_ids).any(|id| dirty.contains(id)) {
                compute.compute(dep, updater.clone());
            }
        }

        self.sync_computes();
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Abort every running command and drop queued ones.
    pub async fn shutdown(&mut self) {
        self.queue.clear();
        self.tasks.shutdown().await;
        self.sync_computes();
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.clone_boxed() {
                snap.insert_state(*id, cloned);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(cloned) = compute.clone_boxed() {
                snap.insert_compute(*id, cloned);
            }
        }
        snap
    }
}
