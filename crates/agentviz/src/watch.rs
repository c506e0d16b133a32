#![forbid(unsafe_code)]

//! Change notification for the visualization inputs.
//!
//! The rendering layer upstream of this core recomputes "on change"; here
//! that becomes explicit: connectivity snapshots and the layout mode live
//! in [`Watched`] cells, and scene recomputation is a watcher. No
//! framework lifecycle, just a version-tracked value with callbacks.
//!
//! Single-threaded by design (`Rc<RefCell>`), matching the serialized
//! event-loop model of the whole core. Watchers are invoked in
//! registration order after the mutating borrow is released, so a watcher
//! may read the cell; writing to the same cell from a watcher panics
//! (re-entrant mutation is a bug in the watcher graph, not a supported
//! pattern).
//!
//! # Invariants
//!
//! 1. `version()` increments by exactly 1 per value-changing mutation.
//! 2. `set(v)` where `v == current` notifies nobody.
//! 3. Dropping a [`WatchGuard`] unregisters its watcher.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Inner<T> {
    value: T,
    version: u64,
    next_key: u64,
    watchers: Vec<(u64, Rc<dyn Fn(&T)>)>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning a `Watched` produces another handle to the same cell.
pub struct Watched<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Watched<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Watched<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Watched")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("watchers", &inner.watchers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Watched<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_key: 0,
                watchers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Mutation count since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value; equal values are a no-op.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate in place; notifies only if the value actually changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                false
            } else {
                inner.version += 1;
                true
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Register a watcher, invoked with the new value after every change.
    /// Dropping the returned guard unregisters it.
    #[must_use]
    pub fn watch(&self, watcher: impl Fn(&T) + 'static) -> WatchGuard {
        let key = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_key;
            inner.next_key += 1;
            inner.watchers.push((key, Rc::new(watcher)));
            key
        };
        let weak = Rc::downgrade(&self.inner);
        WatchGuard {
            unregister: Some(Box::new(move || {
                if let Some(cell) = Weak::upgrade(&weak) {
                    cell.borrow_mut().watchers.retain(|(k, _)| *k != key);
                }
            })),
        }
    }

    fn notify(&self) {
        // Snapshot the watcher list so callbacks can read the cell.
        let (value, watchers) = {
            let inner = self.inner.borrow();
            (
                inner.value.clone(),
                inner
                    .watchers
                    .iter()
                    .map(|(_, w)| Rc::clone(w))
                    .collect::<Vec<_>>(),
            )
        };
        for watcher in watchers {
            watcher(&value);
        }
    }
}

/// Unregisters its watcher on drop.
pub struct WatchGuard {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl std::fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchGuard").finish_non_exhaustive()
    }
}
