//! Change listeners for navigation containers.
//!
//! A [`NavigationSplitCoordinator`](super::NavigationSplitCoordinator) keeps its
//! compact projection in sync by listening to the stacks embedded in its
//! sidebar and detail slots. Listeners are registered in insertion order and
//! invoked after the container has released its own state, so a listener may
//! read from (or mutate) the container that notified it.

use super::coordinator::{Id, ID_FEEDER};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// What part of a stack container changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StackChange {
    Root,
    Stack,
    Sheet,
}

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SubscriptionId(Id);

pub(crate) type Listener = Rc<dyn Fn(StackChange)>;

#[derive(Default)]
pub(crate) struct Listeners {
    entries: RefCell<IndexMap<SubscriptionId, Listener>>,
}

impl Listeners {
    pub(crate) fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(ID_FEEDER.next());
        self.entries.borrow_mut().insert(id, listener);
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.entries.borrow_mut().shift_remove(&id).is_some()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Invokes every listener registered at the time of the call.
    ///
    /// The registry is snapshotted first: listeners added or removed while
    /// notifying take effect on the next notification.
    pub(crate) fn notify(&self, change: StackChange) {
        let snapshot: Vec<Listener> = self.entries.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(change);
        }
    }
}
