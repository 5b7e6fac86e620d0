//! A "navigation controller" style container: a root, a push stack and a sheet.
//!
//! # Ownership
//!
//! [`NavigationStackCoordinator`] is a cheap handle (`Rc` inside): clones refer
//! to the same stack. This is what allows a stack to sit inside a split
//! container's sidebar or detail slot while the flow that built it keeps pushing
//! onto it.
//!
//! # Dismissal
//!
//! Every module that leaves the stack is torn down exactly once: its
//! coordinator is stopped and then its dismissal callback runs. Callbacks run
//! after the stack state has been updated and with no borrow held, so they are
//! free to call back into the stack.
//!
//! ```txt
//!   set_root_coordinator(B)
//!
//!   sheet S ─────► dismissed first
//!   pushed [P1, P2] ─► P2, then P1 (tip to root)
//!   root A ──────► dismissed last
//!   root B ──────► started
//! ```

use super::coordinator::{Coordinator, Id, SharedCoordinator};
use super::module::{DismissalCallback, NavigationModule};
use super::observer::{Listener, Listeners, StackChange, SubscriptionId};
use super::split::{NavigationSplitCoordinator, WeakSplitCoordinator};
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Default)]
struct StackState {
    root: Option<NavigationModule>,
    stack: Vec<NavigationModule>,
    sheet: Option<NavigationModule>,
    /// Id of the sheet this stack presented through its split, if any.
    forwarded_sheet: Option<Id>,
}

struct StackInner {
    split: Option<WeakSplitCoordinator>,
    state: RefCell<StackState>,
    listeners: Listeners,
}

/// Displays a root coordinator, an ordered stack of pushed coordinators on top
/// of it, and at most one sheet.
#[derive(Clone)]
pub struct NavigationStackCoordinator {
    inner: Rc<StackInner>,
}

impl Default for NavigationStackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStackCoordinator {
    /// Creates an empty, standalone stack.
    pub fn new() -> Self {
        NavigationStackCoordinator {
            inner: Rc::new(StackInner {
                split: None,
                state: RefCell::new(StackState::default()),
                listeners: Listeners::default(),
            }),
        }
    }

    /// Creates an empty stack meant to be embedded into `split`.
    ///
    /// Sheets presented on such a stack are presented through the split
    /// instead, so that they survive the split switching between its compact
    /// and regular layouts. The split is only weakly referenced.
    pub fn embedded_in(split: &NavigationSplitCoordinator) -> Self {
        NavigationStackCoordinator {
            inner: Rc::new(StackInner {
                split: Some(split.downgrade()),
                state: RefCell::new(StackState::default()),
                listeners: Listeners::default(),
            }),
        }
    }

    /// The stack's current root coordinator.
    pub fn root_coordinator(&self) -> Option<SharedCoordinator> {
        self.inner
            .state
            .borrow()
            .root
            .as_ref()
            .map(|module| module.coordinator().clone())
    }

    /// The root module, sharing its teardown with the stack's own copy.
    pub fn root_module(&self) -> Option<NavigationModule> {
        self.inner.state.borrow().root.clone()
    }

    /// The pushed coordinators, bottom first. Excludes the root.
    pub fn stack_coordinators(&self) -> Vec<SharedCoordinator> {
        self.inner
            .state
            .borrow()
            .stack
            .iter()
            .map(|module| module.coordinator().clone())
            .collect()
    }

    /// The pushed modules, bottom first. Excludes the root.
    pub fn stack_modules(&self) -> Vec<NavigationModule> {
        self.inner.state.borrow().stack.clone()
    }

    /// The currently presented sheet coordinator.
    ///
    /// For a stack embedded into a split this is the split's sheet.
    pub fn sheet_coordinator(&self) -> Option<SharedCoordinator> {
        self.sheet_module().map(|module| module.coordinator().clone())
    }

    /// The currently presented sheet module.
    ///
    /// For a stack embedded into a split this is the split's sheet module.
    pub fn sheet_module(&self) -> Option<NavigationModule> {
        if let Some(split) = self.split() {
            return split.sheet_module();
        }

        self.inner.state.borrow().sheet.clone()
    }

    /// Replaces the root coordinator.
    ///
    /// Everything shown on top of the old root is dismissed first, in this
    /// order: the sheet, the pushed coordinators from the tip down, and then
    /// the old root itself. For an embedded stack the split's sheet is only
    /// dismissed when it was presented through this stack.
    ///
    /// # Arguments
    ///
    /// * `coordinator` - The new root
    /// * `dismissal_callback` - Called when this root is later removed or replaced
    pub fn set_root_coordinator(
        &self,
        coordinator: SharedCoordinator,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_root(Some(NavigationModule::new(coordinator, dismissal_callback)));
    }

    /// Removes everything from the stack: sheet, pushed coordinators and root.
    pub fn clear_root(&self) {
        self.replace_root(None);
    }

    /// Pushes a coordinator on top of the stack.
    ///
    /// The sheet, if any, is left untouched.
    ///
    /// # Arguments
    ///
    /// * `coordinator` - The coordinator to push and start.
    /// * `dismissal_callback` - Called once the coordinator leaves the stack.
    pub fn push(
        &self,
        coordinator: SharedCoordinator,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        let module = NavigationModule::new(coordinator, dismissal_callback);
        self.inner.state.borrow_mut().stack.push(module.clone());

        self.log_presentation_change("Push", &module);
        module.coordinator().start();

        self.inner.listeners.notify(StackChange::Stack);
    }

    /// Removes the top-most pushed coordinator. Does nothing on an empty stack.
    pub fn pop(&self) {
        let popped = self.inner.state.borrow_mut().stack.pop();
        let Some(module) = popped else {
            debug!("{} Pop ignored: nothing pushed", self);
            return;
        };

        self.log_presentation_change("Pop", &module);
        module.tear_down();

        self.inner.listeners.notify(StackChange::Stack);
    }

    /// Pops every pushed coordinator, returning to the root.
    ///
    /// Dismissal callbacks fire from the tip of the stack down, as if `pop`
    /// had been called repeatedly.
    pub fn pop_to_root(&self) {
        let popped = mem::take(&mut self.inner.state.borrow_mut().stack);
        if popped.is_empty() {
            return;
        }

        self.tear_down_popped(popped);
        self.inner.listeners.notify(StackChange::Stack);
    }

    /// Presents `coordinator` as a sheet on top of the stack, or dismisses the
    /// current sheet when `None`.
    ///
    /// A previously presented sheet is dismissed before the new one starts.
    /// Embedded stacks present through their split.
    pub fn set_sheet_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        let module =
            coordinator.map(|coordinator| NavigationModule::new(coordinator, dismissal_callback));

        if let Some(split) = self.split() {
            self.inner.state.borrow_mut().forwarded_sheet =
                module.as_ref().map(NavigationModule::id);
            split.replace_sheet_module(module);
            self.inner.listeners.notify(StackChange::Sheet);
            return;
        }

        let old = mem::replace(&mut self.inner.state.borrow_mut().sheet, module.clone());
        if let Some(old) = old {
            self.log_presentation_change("Remove sheet", &old);
            old.tear_down();
        }

        if let Some(module) = module {
            self.log_presentation_change("Set sheet", &module);
            module.coordinator().start();
        }

        self.inner.listeners.notify(StackChange::Sheet);
    }

    /// Dismisses the current sheet, if any.
    pub fn dismiss_sheet(&self) {
        self.set_sheet_coordinator(None, None);
    }

    pub(crate) fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.inner.listeners.subscribe(listener)
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.unsubscribe(id);
    }

    pub(crate) fn contains_stack_module(&self, id: Id) -> bool {
        self.inner
            .state
            .borrow()
            .stack
            .iter()
            .any(|module| module.id() == id)
    }

    /// Removes a single pushed module, wherever it sits in the stack.
    ///
    /// Used when the compact layout of a split drops an entry that belongs to
    /// this stack.
    pub(crate) fn remove_stack_module(&self, id: Id) {
        let removed = {
            let mut state = self.inner.state.borrow_mut();
            let Some(index) = state.stack.iter().position(|module| module.id() == id) else {
                return;
            };
            state.stack.remove(index)
        };

        self.log_presentation_change("Pop", &removed);
        removed.tear_down();

        self.inner.listeners.notify(StackChange::Stack);
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    fn split(&self) -> Option<NavigationSplitCoordinator> {
        self.inner.split.as_ref().and_then(WeakSplitCoordinator::upgrade)
    }

    fn replace_root(&self, root: Option<NavigationModule>) {
        self.dismiss_forwarded_sheet();

        let (sheet, popped, old_root) = {
            let mut state = self.inner.state.borrow_mut();
            let sheet = state.sheet.take();
            let popped = mem::take(&mut state.stack);
            let old_root = mem::replace(&mut state.root, root.clone());
            (sheet, popped, old_root)
        };

        if let Some(sheet) = sheet {
            self.log_presentation_change("Remove sheet", &sheet);
            sheet.tear_down();
        }

        self.tear_down_popped(popped);

        if let Some(old_root) = old_root {
            self.log_presentation_change("Remove root", &old_root);
            old_root.tear_down();
        }

        if let Some(root) = root {
            self.log_presentation_change("Set root", &root);
            root.coordinator().start();
        }

        self.inner.listeners.notify(StackChange::Root);
    }

    fn dismiss_forwarded_sheet(&self) {
        let Some(forwarded) = self.inner.state.borrow_mut().forwarded_sheet.take() else {
            return;
        };

        if let Some(split) = self.split() {
            if split.sheet_module().is_some_and(|sheet| sheet.id() == forwarded) {
                split.replace_sheet_module(None);
            }
        }
    }

    fn tear_down_popped(&self, popped: Vec<NavigationModule>) {
        for module in popped.into_iter().rev() {
            self.log_presentation_change("Pop", &module);
            module.tear_down();
        }
    }

    fn log_presentation_change(&self, change: &str, module: &NavigationModule) {
        info!(
            container = "stack",
            change,
            module = module.id(),
            "{} {}: {:?}",
            self,
            change,
            module.coordinator()
        );
    }
}

impl Coordinator for NavigationStackCoordinator {}

impl fmt::Display for NavigationStackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self
            .inner
            .state
            .try_borrow()
            .ok()
            .and_then(|state| state.root.as_ref().map(|module| module.coordinator().clone()));

        match root {
            Some(root) => write!(f, "NavigationStackCoordinator({:?})", root),
            None => write!(f, "NavigationStackCoordinator(Empty)"),
        }
    }
}

impl fmt::Debug for NavigationStackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
