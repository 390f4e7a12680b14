//! Server-synced collections with optimistic mutation.
//!
//! A [`ResourceStore`] owns the in-memory list of one entity type (faculties,
//! schools, certification programs, roles) and applies every mutation with
//! the same protocol:
//!
//! 1. apply the change locally,
//! 2. issue the request,
//! 3. on success reconcile with a fresh read of the collection,
//! 4. on failure roll the local change back and surface the error.
//!
//! Mutations are keyed by the entity's persisted identifier. The positional
//! variants ([`ResourceStore::update_at`], [`ResourceStore::delete_at`]) only
//! translate a position into an identifier at call time.
//!
//! Errors are kept as a display string that clears itself after a delay.
//! Dropping the store cancels its in-flight requests and the clear timer.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};

/// An entity that may or may not have been persisted yet.
pub trait Resource: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + fmt::Display + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;
}

/// Remote CRUD operations backing a [`ResourceStore`].
pub trait ResourceService: Send + Sync {
    type Item: Resource;
    type Dto: Send + Sync;

    /// Singular, lowercase entity name used in messages ("faculty").
    const ENTITY: &'static str;

    fn list(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ConsoleError>> + Send;

    fn create(
        &self,
        dto: &Self::Dto,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Self::Item, ConsoleError>> + Send;

    fn update(
        &self,
        id: <Self::Item as Resource>::Id,
        dto: &Self::Dto,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Self::Item, ConsoleError>> + Send;

    fn delete(
        &self,
        id: <Self::Item as Resource>::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), ConsoleError>> + Send;

    /// Local stand-in for `dto`, shown until the backend answers.
    fn draft(id: Option<<Self::Item as Resource>::Id>, dto: &Self::Dto) -> Self::Item;
}

type IdOf<S> = <<S as ResourceService>::Item as Resource>::Id;

struct Slot<T> {
    item: T,
    /// Set while an optimistic insert waits for the backend.
    pending: Option<u64>,
}

struct StoreState<T> {
    slots: Vec<Slot<T>>,
    in_flight: usize,
    error: Option<String>,
    error_seq: u64,
    next_key: u64,
}

impl<T: Resource> StoreState<T> {
    fn position_of(&self, id: T::Id) -> Option<usize> {
        self.slots.iter().position(|s| s.item.id() == Some(id))
    }

    fn replace(&mut self, id: T::Id, item: T) {
        if let Some(pos) = self.position_of(id) {
            self.slots[pos].item = item;
        }
    }

    /// Swaps a pending placeholder for the persisted entity.
    fn settle(&mut self, key: u64, item: T) {
        let already_listed = item.id().is_some_and(|id| self.position_of(id).is_some());
        let pos = self.slots.iter().position(|s| s.pending == Some(key));
        match (pos, already_listed) {
            (Some(pos), false) => self.slots[pos] = Slot { item, pending: None },
            (Some(pos), true) => {
                self.slots.remove(pos);
            }
            (None, false) => self.slots.push(Slot { item, pending: None }),
            (None, true) => {}
        }
    }

    fn discard(&mut self, key: u64) {
        self.slots.retain(|s| s.pending != Some(key));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the store busy for the lifetime of one operation.
struct Busy<T>(Arc<Mutex<StoreState<T>>>);

impl<T> Drop for Busy<T> {
    fn drop(&mut self) {
        let mut state = lock(&self.0);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

pub struct ResourceStore<S: ResourceService> {
    service: S,
    state: Arc<Mutex<StoreState<S::Item>>>,
    cancel: CancellationToken,
    dismiss_after: Duration,
    dismiss_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ResourceService> ResourceStore<S> {
    pub fn new(service: S, dismiss_after: Duration) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(StoreState {
                slots: Vec::new(),
                in_flight: 0,
                error: None,
                error_seq: 0,
                next_key: 0,
            })),
            cancel: CancellationToken::new(),
            dismiss_after,
            dismiss_task: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of the collection, optimistic entries included.
    pub fn items(&self) -> Vec<S::Item> {
        lock(&self.state)
            .slots
            .iter()
            .map(|s| s.item.clone())
            .collect()
    }

    pub fn get(&self, id: IdOf<S>) -> Option<S::Item> {
        let state = lock(&self.state);
        state.position_of(id).map(|pos| state.slots[pos].item.clone())
    }

    pub fn len(&self) -> usize {
        lock(&self.state).slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loading(&self) -> bool {
        lock(&self.state).in_flight > 0
    }

    /// The current user-facing error, if one has not been dismissed yet.
    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn clear_error(&self) {
        lock(&self.state).error = None;
    }

    /// Aborts every in-flight request. Later calls fail with `Cancelled`.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        if let Some(task) = lock(&self.dismiss_task).take() {
            task.abort();
        }
    }

    /// Replaces the collection with the backend's. Pending inserts are kept
    /// at the end; on failure the previous items stay untouched.
    pub async fn refresh(&self) -> Result<(), ConsoleError> {
        let _busy = self.begin();
        self.reload().await.inspect_err(|err| self.fail(Action::Fetch, err))
    }

    pub async fn create(&self, dto: S::Dto) -> Result<S::Item, ConsoleError> {
        let _busy = self.begin();
        let key = {
            let mut state = lock(&self.state);
            let key = state.next_key;
            state.next_key += 1;
            state.slots.push(Slot {
                item: S::draft(None, &dto),
                pending: Some(key),
            });
            key
        };

        match self.service.create(&dto, &self.cancel).await {
            Ok(item) => {
                lock(&self.state).settle(key, item.clone());
                self.reconcile().await;
                Ok(item)
            }
            Err(err) => {
                lock(&self.state).discard(key);
                self.fail(Action::Create, &err);
                Err(err)
            }
        }
    }

    pub async fn update(&self, id: IdOf<S>, dto: S::Dto) -> Result<S::Item, ConsoleError> {
        let _busy = self.begin();
        let previous = {
            let mut state = lock(&self.state);
            state.position_of(id).map(|pos| {
                let previous = state.slots[pos].item.clone();
                state.slots[pos].item = S::draft(Some(id), &dto);
                previous
            })
        };
        let Some(previous) = previous else {
            return Err(self.invalid_selection(Action::Update));
        };

        match self.service.update(id, &dto, &self.cancel).await {
            Ok(item) => {
                lock(&self.state).replace(id, item.clone());
                self.reconcile().await;
                Ok(item)
            }
            Err(err) => {
                lock(&self.state).replace(id, previous);
                self.fail(Action::Update, &err);
                Err(err)
            }
        }
    }

    /// Updates the entity currently shown at `index`.
    pub async fn update_at(&self, index: usize, dto: S::Dto) -> Result<S::Item, ConsoleError> {
        let id = self.resolve(index, Action::Update)?;
        self.update(id, dto).await
    }

    pub async fn delete(&self, id: IdOf<S>) -> Result<(), ConsoleError> {
        let _busy = self.begin();
        let removed = {
            let mut state = lock(&self.state);
            state
                .position_of(id)
                .map(|pos| (pos, state.slots.remove(pos)))
        };
        let Some((pos, slot)) = removed else {
            return Err(self.invalid_selection(Action::Delete));
        };

        match self.service.delete(id, &self.cancel).await {
            Ok(()) => {
                self.reconcile().await;
                Ok(())
            }
            Err(err) => {
                {
                    let mut state = lock(&self.state);
                    let at = pos.min(state.slots.len());
                    state.slots.insert(at, slot);
                }
                self.fail(Action::Delete, &err);
                Err(err)
            }
        }
    }

    /// Deletes the entity currently shown at `index`.
    pub async fn delete_at(&self, index: usize) -> Result<(), ConsoleError> {
        let id = self.resolve(index, Action::Delete)?;
        self.delete(id).await
    }

    fn begin(&self) -> Busy<S::Item> {
        let mut state = lock(&self.state);
        state.in_flight += 1;
        state.error = None;
        Busy(Arc::clone(&self.state))
    }

    fn resolve(&self, index: usize, action: Action) -> Result<IdOf<S>, ConsoleError> {
        let id = {
            let state = lock(&self.state);
            state.slots.get(index).and_then(|s| s.item.id())
        };
        id.ok_or_else(|| self.invalid_selection(action))
    }

    fn invalid_selection(&self, action: Action) -> ConsoleError {
        let err = ConsoleError::InvalidSelection { entity: S::ENTITY };
        self.fail(action, &err);
        err
    }

    /// Re-reads after a successful mutation. A failure here is only logged;
    /// the mutation itself went through.
    async fn reconcile(&self) {
        if let Err(err) = self.reload().await {
            warn!(entity = S::ENTITY, error = %err, "Reconciling read failed");
        }
    }

    async fn reload(&self) -> Result<(), ConsoleError> {
        let items = self.service.list(&self.cancel).await?;
        let mut state = lock(&self.state);
        let pending: Vec<Slot<S::Item>> = state
            .slots
            .drain(..)
            .filter(|s| s.pending.is_some())
            .collect();
        state.slots = items
            .into_iter()
            .map(|item| Slot { item, pending: None })
            .chain(pending)
            .collect();
        debug!(entity = S::ENTITY, count = state.slots.len(), "Collection refreshed");
        Ok(())
    }

    fn fail(&self, action: Action, err: &ConsoleError) {
        if matches!(err, ConsoleError::Cancelled) {
            return;
        }
        warn!(entity = S::ENTITY, action = %action, error = %err, "Operation failed");

        let seq = {
            let mut state = lock(&self.state);
            state.error = Some(failure_message(action, S::ENTITY, err));
            state.error_seq += 1;
            state.error_seq
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let weak = Arc::downgrade(&self.state);
        let delay = self.dismiss_after;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(state) = weak.upgrade() {
                let mut state = lock(&state);
                if state.error_seq == seq {
                    state.error = None;
                }
            }
        });
        if let Some(previous) = lock(&self.dismiss_task).replace(task) {
            previous.abort();
        }
    }
}

impl<S: ResourceService> Drop for ResourceStore<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
