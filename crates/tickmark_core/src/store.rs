//! Action store
//!
//! A [`Store`] owns a single state value, applies a [`Reducer`] on every
//! dispatch and notifies its subscribers afterwards.
//!
//! - Dispatch is synchronous: the new state is visible to `get_state` before
//!   the first subscriber runs.
//! - Subscribers run in registration order against a snapshot of the
//!   subscriber list taken before notification starts, so a subscriber that
//!   unsubscribes itself (or another subscriber) mid-notification does not
//!   disturb delivery of the current dispatch.
//! - No lock is held while subscribers run, so a subscriber may dispatch.

use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock, Weak};

/// Computes the next state from the current state and an action.
///
/// Implementations must be pure. Returning the *same* `Arc` signals that the
/// action did not change anything; subscribers can detect that with
/// [`Change::is_noop`].
pub trait Reducer: Send + Sync + 'static {
    type State: Send + Sync + 'static;
    type Action: Send + Sync + 'static;

    /// Action used for the priming dispatch performed on construction
    fn init_action(&self) -> Self::Action;

    fn reduce(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State>;
}

/// A state transition delivered to subscribers
pub struct Change<'a, S, A> {
    pub action: &'a A,
    pub previous: &'a Arc<S>,
    pub current: &'a Arc<S>,
}

impl<S, A> Change<'_, S, A> {
    /// True when the reducer handed back the previous state unchanged
    pub fn is_noop(&self) -> bool {
        Arc::ptr_eq(self.previous, self.current)
    }
}

type Listener<S, A> = Arc<dyn Fn(&Change<'_, S, A>) + Send + Sync>;

struct Listeners<S, A> {
    next_id: u64,
    entries: IndexMap<u64, Listener<S, A>>,
}

impl<S, A> Listeners<S, A> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: IndexMap::new(),
        }
    }
}

/// Synchronous reducer-driven state container
pub struct Store<R: Reducer> {
    reducer: R,
    state: RwLock<Arc<R::State>>,
    listeners: Arc<Mutex<Listeners<R::State, R::Action>>>,
}

impl<R: Reducer> Store<R> {
    /// Create a store and prime it with the reducer's init action
    pub fn new(reducer: R, initial: R::State) -> Self {
        let store = Self {
            reducer,
            state: RwLock::new(Arc::new(initial)),
            listeners: Arc::new(Mutex::new(Listeners::new())),
        };
        let init = store.reducer.init_action();
        store.dispatch(init);
        store
    }

    /// Current state snapshot
    pub fn get_state(&self) -> Arc<R::State> {
        self.state.read().unwrap().clone()
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Apply `action`, replace the state and notify subscribers.
    ///
    /// Returns the state produced by this dispatch.
    pub fn dispatch(&self, action: R::Action) -> Arc<R::State> {
        let (previous, current) = {
            let mut state = self.state.write().unwrap();
            let previous = state.clone();
            let current = self.reducer.reduce(&previous, &action);
            *state = Arc::clone(&current);
            (previous, current)
        };

        let snapshot: Vec<Listener<R::State, R::Action>> = self
            .listeners
            .lock()
            .unwrap()
            .entries
            .values()
            .cloned()
            .collect();

        tracing::trace!(
            listeners = snapshot.len(),
            changed = !Arc::ptr_eq(&previous, &current),
            "store dispatch"
        );

        let change = Change {
            action: &action,
            previous: &previous,
            current: &current,
        };
        for listener in &snapshot {
            listener(&change);
        }

        current
    }

    /// Register a listener; it is called once per dispatch until unsubscribed
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Change<'_, R::State, R::Action>) + Send + Sync + 'static,
    {
        let id = {
            let mut listeners = self.listeners.lock().unwrap();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, Arc::new(listener));
            id
        };

        let weak: Weak<Mutex<Listeners<R::State, R::Action>>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.lock().unwrap().entries.shift_remove(&id);
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().entries.len()
    }
}

impl<R: Reducer> fmt::Debug for Store<R>
where
    R::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.get_state())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle does *not* unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    detach: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Mutex::new(Some(Box::new(detach))),
        }
    }

    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        let detach = self.detach.lock().unwrap().take();
        if let Some(detach) = detach {
            detach();
        }
    }

    pub fn is_active(&self) -> bool {
        self.detach.lock().unwrap().is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
