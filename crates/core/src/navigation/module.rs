use super::coordinator::{Id, SharedCoordinator, ID_FEEDER};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback invoked once a module has been removed from its slot.
///
/// It only reports that the removal already happened; the container state has
/// been updated by the time it runs.
pub type DismissalCallback = Box<dyn FnOnce() + 'static>;

/// A coordinator together with its optional dismissal callback.
///
/// Modules are what containers actually store. Cloning a module is cheap and
/// every clone shares the same teardown state, so the compact projection of a
/// split can hold the very modules owned by an embedded stack without ever
/// dismissing them twice.
#[derive(Clone)]
pub struct NavigationModule {
    id: Id,
    coordinator: SharedCoordinator,
    teardown: Rc<Teardown>,
}

struct Teardown {
    dismissal_callback: RefCell<Option<DismissalCallback>>,
    torn_down: Cell<bool>,
}

impl NavigationModule {
    pub fn new(
        coordinator: SharedCoordinator,
        dismissal_callback: Option<DismissalCallback>,
    ) -> Self {
        NavigationModule {
            id: ID_FEEDER.next(),
            coordinator,
            teardown: Rc::new(Teardown {
                dismissal_callback: RefCell::new(dismissal_callback),
                torn_down: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn coordinator(&self) -> &SharedCoordinator {
        &self.coordinator
    }

    /// Returns true once the module has been removed from its slot.
    pub fn is_torn_down(&self) -> bool {
        self.teardown.torn_down.get()
    }

    /// Stops the coordinator and fires the dismissal callback.
    ///
    /// Subsequent calls, from this handle or any clone, do nothing.
    pub(crate) fn tear_down(&self) {
        if self.teardown.torn_down.replace(true) {
            return;
        }

        self.coordinator.stop();

        let callback = self.teardown.dismissal_callback.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl PartialEq for NavigationModule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NavigationModule {}

impl fmt::Debug for NavigationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationModule")
            .field("id", &self.id)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}
