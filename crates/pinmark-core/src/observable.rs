//! Observable values for transient interaction state.
//!
//! The overlay is single-threaded: a value is shared between the state that
//! writes it and any display adapter that subscribes to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
    /// Set while listeners are detached for a notification.
    notifying: bool,
    /// Ids unsubscribed during a notification.
    removed: Vec<u64>,
}

/// A value with change notification.
///
/// Clones share the same underlying value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.borrow().value)
            .finish()
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
                removed: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify every listener.
    pub fn set(&self, value: T) {
        // Listeners run outside the borrow so they may read the value back.
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.notifying = true;
            std::mem::take(&mut inner.listeners)
        };
        for (id, listener) in listeners.iter_mut() {
            if self.inner.borrow().removed.contains(id) {
                continue;
            }
            listener(&value);
        }
        let mut inner = self.inner.borrow_mut();
        inner.notifying = false;
        // Keep listeners registered during notification.
        listeners.append(&mut inner.listeners);
        let removed = std::mem::take(&mut inner.removed);
        listeners.retain(|(id, _)| !removed.contains(id));
        inner.listeners = listeners;
    }

    /// Register a listener, called on each subsequent [`set`](Self::set).
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.listeners.retain(|(lid, _)| *lid != id);
                    if inner.notifying {
                        inner.removed.push(id);
                    }
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle returned by [`Observable::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
