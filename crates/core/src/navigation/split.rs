//! Two coordinators side by side, collapsing into a single stack when space is
//! short.
//!
//! # Compact projection
//!
//! In compact layouts the sidebar and detail panes are linearised into one
//! navigation stack:
//!
//! ```txt
//!   sidebar stack: root R1, pushed [R1a]
//!   detail stack:  root R2, pushed [R2a, R2b]
//!
//!   compact root:  R1
//!   compact stack: [R1a, R2, R2a, R2b]
//! ```
//!
//! A slot holding a plain coordinator (not a stack) contributes itself: the
//! sidebar becomes the compact root and the detail a single stack entry. A
//! detail root that is already shown by the sidebar is not repeated.
//!
//! The split listens to every stack embedded in its sidebar or detail slots and
//! recomputes the projection whenever one of them changes, so the projection is
//! up to date by the time the caller reads it. Listeners are dropped and
//! re-registered on every recompute, so a stack that has been replaced stops
//! driving the split immediately.
//!
//! The projection is a view over the embedded stacks, never separate storage:
//! [`NavigationSplitCoordinator::set_compact_layout_stack`] translates removals
//! back into pops on the stack that owns the removed entry.

use super::coordinator::{same_coordinator, Coordinator, SharedCoordinator};
use super::layout::HorizontalSizeClass;
use super::module::{DismissalCallback, NavigationModule};
use super::observer::{StackChange, SubscriptionId};
use super::stack::NavigationStackCoordinator;
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Sidebar,
    Detail,
    Sheet,
    FullScreenCover,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Slot::Sidebar => "sidebar",
            Slot::Detail => "detail",
            Slot::Sheet => "sheet",
            Slot::FullScreenCover => "fullscreen cover",
        }
    }

    fn affects_compact_layout(self) -> bool {
        matches!(self, Slot::Sidebar | Slot::Detail)
    }
}

#[derive(Default)]
struct SplitState {
    sidebar: Option<NavigationModule>,
    detail: Option<NavigationModule>,
    sheet: Option<NavigationModule>,
    full_screen_cover: Option<NavigationModule>,
}

impl SplitState {
    fn slot(&self, slot: Slot) -> &Option<NavigationModule> {
        match slot {
            Slot::Sidebar => &self.sidebar,
            Slot::Detail => &self.detail,
            Slot::Sheet => &self.sheet,
            Slot::FullScreenCover => &self.full_screen_cover,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<NavigationModule> {
        match slot {
            Slot::Sidebar => &mut self.sidebar,
            Slot::Detail => &mut self.detail,
            Slot::Sheet => &mut self.sheet,
            Slot::FullScreenCover => &mut self.full_screen_cover,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct CompactLayout {
    root: Option<NavigationModule>,
    stack: Vec<NavigationModule>,
}

impl CompactLayout {
    fn shows(&self, coordinator: &SharedCoordinator) -> bool {
        self.root
            .iter()
            .chain(&self.stack)
            .any(|module| same_coordinator(module.coordinator(), coordinator))
    }
}

pub(crate) struct SplitInner {
    placeholder: NavigationModule,
    state: RefCell<SplitState>,
    compact: RefCell<CompactLayout>,
    observed: RefCell<Vec<(NavigationStackCoordinator, SubscriptionId)>>,
}

impl Drop for SplitInner {
    fn drop(&mut self) {
        for (stack, id) in self.observed.get_mut().drain(..) {
            stack.unsubscribe(id);
        }
    }
}

/// Weak reference to a split, held by the stacks and tabs that point at it.
#[derive(Clone)]
pub(crate) struct WeakSplitCoordinator(Weak<SplitInner>);

impl WeakSplitCoordinator {
    pub(crate) fn upgrade(&self) -> Option<NavigationSplitCoordinator> {
        self.0
            .upgrade()
            .map(|inner| NavigationSplitCoordinator { inner })
    }
}

impl fmt::Debug for WeakSplitCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(split) => write!(f, "Weak({})", split),
            None => write!(f, "Weak(Dropped)"),
        }
    }
}

/// What the render layer should show for a split in a given size class.
#[derive(Debug, Clone)]
pub enum SplitPresentation {
    /// A single navigation stack.
    Compact {
        root: Option<NavigationModule>,
        stack: Vec<NavigationModule>,
    },
    /// Both panes, with the placeholder standing in for an empty one.
    Regular {
        sidebar: NavigationModule,
        detail: NavigationModule,
    },
}

/// Displays a sidebar and a detail coordinator side by side, plus a sheet and a
/// fullscreen cover presented over both.
#[derive(Clone)]
pub struct NavigationSplitCoordinator {
    inner: Rc<SplitInner>,
}

impl NavigationSplitCoordinator {
    /// Creates an empty split.
    ///
    /// # Arguments
    ///
    /// * `placeholder` - Shown in whichever pane is empty in regular layouts
    pub fn new(placeholder: SharedCoordinator) -> Self {
        NavigationSplitCoordinator {
            inner: Rc::new(SplitInner {
                placeholder: NavigationModule::new(placeholder, None),
                state: RefCell::new(SplitState::default()),
                compact: RefCell::new(CompactLayout::default()),
                observed: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The coordinator standing in for an empty pane in regular layouts.
    ///
    /// The split never starts or stops it.
    pub fn placeholder_coordinator(&self) -> SharedCoordinator {
        self.inner.placeholder.coordinator().clone()
    }

    /// The coordinator currently shown in the sidebar.
    pub fn sidebar_coordinator(&self) -> Option<SharedCoordinator> {
        self.coordinator(Slot::Sidebar)
    }

    /// The coordinator currently shown in the detail pane.
    pub fn detail_coordinator(&self) -> Option<SharedCoordinator> {
        self.coordinator(Slot::Detail)
    }

    /// The sheet presented over the split, including sheets presented by
    /// embedded stacks.
    pub fn sheet_coordinator(&self) -> Option<SharedCoordinator> {
        self.coordinator(Slot::Sheet)
    }

    /// The fullscreen cover presented over the split.
    pub fn full_screen_cover_coordinator(&self) -> Option<SharedCoordinator> {
        self.coordinator(Slot::FullScreenCover)
    }

    /// The module behind [`sheet_coordinator`](Self::sheet_coordinator).
    pub fn sheet_module(&self) -> Option<NavigationModule> {
        self.inner.state.borrow().sheet.clone()
    }

    /// The module behind
    /// [`full_screen_cover_coordinator`](Self::full_screen_cover_coordinator).
    pub fn full_screen_cover_module(&self) -> Option<NavigationModule> {
        self.inner.state.borrow().full_screen_cover.clone()
    }

    /// Sets the coordinator shown in the sidebar, or clears it when `None`.
    ///
    /// # Arguments
    ///
    /// * `coordinator` - The sidebar coordinator
    /// * `dismissal_callback` - Called when this sidebar is later removed or replaced
    pub fn set_sidebar_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::Sidebar, module_for(coordinator, dismissal_callback));
    }

    /// Sets the coordinator shown in the detail pane, or clears it when `None`.
    ///
    /// # Arguments
    ///
    /// * `coordinator` - The detail coordinator
    /// * `dismissal_callback` - Called when this detail is later removed or replaced
    pub fn set_detail_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::Detail, module_for(coordinator, dismissal_callback));
    }

    /// Presents a sheet over the split, or dismisses it when `None`.
    pub fn set_sheet_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::Sheet, module_for(coordinator, dismissal_callback));
    }

    /// Presents a fullscreen cover over the split, or dismisses it when `None`.
    pub fn set_full_screen_cover_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::FullScreenCover, module_for(coordinator, dismissal_callback));
    }

    /// The root of the compact projection.
    pub fn compact_layout_root_coordinator(&self) -> Option<SharedCoordinator> {
        self.compact_layout_root_module().map(|module| module.coordinator().clone())
    }

    /// The sidebar module, or the sidebar stack's root module.
    pub fn compact_layout_root_module(&self) -> Option<NavigationModule> {
        self.inner.compact.borrow().root.clone()
    }

    /// The stack of the compact projection, bottom first. Excludes the root.
    pub fn compact_layout_stack_coordinators(&self) -> Vec<SharedCoordinator> {
        self.inner
            .compact
            .borrow()
            .stack
            .iter()
            .map(|module| module.coordinator().clone())
            .collect()
    }

    /// The modules of the compact stack, shared with the stacks that own them.
    pub fn compact_layout_stack_modules(&self) -> Vec<NavigationModule> {
        self.inner.compact.borrow().stack.clone()
    }

    /// Applies an externally edited compact stack, e.g. after the user swiped
    /// back in a compact layout.
    ///
    /// Every entry missing from `modules` is removed from whatever owns it,
    /// tip first: pushed entries are popped from their stack, and removing the
    /// detail (or the detail stack's root) clears the detail pane. Entries that
    /// are not already part of the projection are ignored.
    pub fn set_compact_layout_stack(&self, modules: Vec<NavigationModule>) {
        let removed: Vec<NavigationModule> = self
            .compact_layout_stack_modules()
            .into_iter()
            .filter(|module| !modules.contains(module))
            .collect();

        for module in removed.iter().rev() {
            self.process_compact_layout_removal(module);
        }

        self.update_compact_layout();
    }

    /// Keeps only the first `len` entries of the compact stack.
    pub fn truncate_compact_layout_stack(&self, len: usize) {
        let mut modules = self.compact_layout_stack_modules();
        modules.truncate(len);
        self.set_compact_layout_stack(modules);
    }

    /// Resolves what to display for `size_class`.
    ///
    /// Sheets and fullscreen covers sit above both layouts and are read with
    /// [`sheet_module`](Self::sheet_module) and
    /// [`full_screen_cover_module`](Self::full_screen_cover_module).
    pub fn presentation(&self, size_class: HorizontalSizeClass) -> SplitPresentation {
        match size_class {
            HorizontalSizeClass::Compact => {
                let compact = self.inner.compact.borrow().clone();
                SplitPresentation::Compact {
                    root: compact.root,
                    stack: compact.stack,
                }
            }
            HorizontalSizeClass::Regular => {
                let state = self.inner.state.borrow();
                let placeholder = || self.inner.placeholder.clone();
                SplitPresentation::Regular {
                    sidebar: state.sidebar.clone().unwrap_or_else(placeholder),
                    detail: state.detail.clone().unwrap_or_else(placeholder),
                }
            }
        }
    }

    pub(crate) fn downgrade(&self) -> WeakSplitCoordinator {
        WeakSplitCoordinator(Rc::downgrade(&self.inner))
    }

    pub(crate) fn replace_sheet_module(&self, module: Option<NavigationModule>) {
        self.replace_module(Slot::Sheet, module);
    }

    fn coordinator(&self, slot: Slot) -> Option<SharedCoordinator> {
        self.inner
            .state
            .borrow()
            .slot(slot)
            .as_ref()
            .map(|module| module.coordinator().clone())
    }

    /// Installs `module` into `slot`.
    ///
    /// The compact projection is refreshed before the old occupant is torn
    /// down, so dismissal callbacks already observe the new layout.
    fn replace_module(&self, slot: Slot, module: Option<NavigationModule>) {
        let old = mem::replace(self.inner.state.borrow_mut().slot_mut(slot), module.clone());

        if slot.affects_compact_layout() {
            self.update_compact_layout();
        }

        if let Some(old) = old {
            self.log_presentation_change(&format!("Remove {}", slot.name()), &old);
            old.tear_down();
        }

        if let Some(module) = module {
            self.log_presentation_change(&format!("Set {}", slot.name()), &module);
            module.coordinator().start();
        }
    }

    /// Rebuilds the compact projection from the sidebar and detail slots and
    /// re-registers the listeners on embedded stacks.
    fn update_compact_layout(&self) {
        self.stop_observing();

        let (sidebar, detail) = {
            let state = self.inner.state.borrow();
            (state.sidebar.clone(), state.detail.clone())
        };

        let mut layout = CompactLayout::default();

        if let Some(sidebar) = &sidebar {
            match embedded_stack(sidebar) {
                Some(stack) => {
                    self.observe(&stack);
                    layout.root = stack.root_module();
                    layout.stack.extend(stack.stack_modules());
                }
                None => layout.root = Some(sidebar.clone()),
            }
        }

        if let Some(detail) = &detail {
            match embedded_stack(detail) {
                Some(stack) => {
                    self.observe(&stack);
                    if let Some(root) = stack.root_module() {
                        if !layout.shows(root.coordinator()) {
                            layout.stack.push(root);
                        }
                    }
                    layout.stack.extend(stack.stack_modules());
                }
                None => {
                    if !layout.shows(detail.coordinator()) {
                        layout.stack.push(detail.clone());
                    }
                }
            }
        }

        debug!(
            "{} Compact layout: root {:?}, {} stacked",
            self,
            layout.root.as_ref().map(|module| module.coordinator()),
            layout.stack.len()
        );

        *self.inner.compact.borrow_mut() = layout;
    }

    fn process_compact_layout_removal(&self, module: &NavigationModule) {
        let (sidebar, detail) = {
            let state = self.inner.state.borrow();
            (state.sidebar.clone(), state.detail.clone())
        };

        if let Some(stack) = sidebar.as_ref().and_then(embedded_stack) {
            if stack.contains_stack_module(module.id()) {
                stack.remove_stack_module(module.id());
                return;
            }
        }

        let Some(detail) = detail else {
            return;
        };

        if detail == *module {
            self.replace_module(Slot::Detail, None);
            return;
        }

        if let Some(stack) = embedded_stack(&detail) {
            if stack.contains_stack_module(module.id()) {
                stack.remove_stack_module(module.id());
            } else if stack.root_module().is_some_and(|root| root == *module) {
                self.replace_module(Slot::Detail, None);
            }
        }
    }

    fn observe(&self, stack: &NavigationStackCoordinator) {
        let split = Rc::downgrade(&self.inner);
        let id = stack.subscribe(Rc::new(move |_: StackChange| {
            if let Some(inner) = split.upgrade() {
                NavigationSplitCoordinator { inner }.update_compact_layout();
            }
        }));

        self.inner.observed.borrow_mut().push((stack.clone(), id));
    }

    fn stop_observing(&self) {
        let observed = mem::take(&mut *self.inner.observed.borrow_mut());
        for (stack, id) in observed {
            stack.unsubscribe(id);
        }
    }

    fn log_presentation_change(&self, change: &str, module: &NavigationModule) {
        info!(
            container = "split",
            change,
            module = module.id(),
            "{} {}: {:?}",
            self,
            change,
            module.coordinator()
        );
    }
}

fn module_for(
    coordinator: Option<SharedCoordinator>,
    dismissal_callback: Option<DismissalCallback>,
) -> Option<NavigationModule> {
    coordinator.map(|coordinator| NavigationModule::new(coordinator, dismissal_callback))
}

fn embedded_stack(module: &NavigationModule) -> Option<NavigationStackCoordinator> {
    let coordinator: &dyn Coordinator = module.coordinator().as_ref();
    coordinator
        .downcast_ref::<NavigationStackCoordinator>()
        .cloned()
}

impl Coordinator for NavigationSplitCoordinator {}

impl fmt::Display for NavigationSplitCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(state) = self.inner.state.try_borrow() else {
            return write!(f, "NavigationSplitCoordinator(Busy)");
        };

        match (&state.sidebar, &state.detail) {
            (Some(sidebar), Some(detail)) => write!(
                f,
                "NavigationSplitCoordinator({:?} | {:?})",
                sidebar.coordinator(),
                detail.coordinator()
            ),
            (Some(sidebar), None) => {
                write!(f, "NavigationSplitCoordinator({:?} | Empty)", sidebar.coordinator())
            }
            (None, Some(detail)) => {
                write!(f, "NavigationSplitCoordinator(Empty | {:?})", detail.coordinator())
            }
            (None, None) => write!(f, "NavigationSplitCoordinator(Empty | Empty)"),
        }
    }
}

impl fmt::Debug for NavigationSplitCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
