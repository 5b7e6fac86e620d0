//! Navigation containers.
//!
//! Three containers keep track of what is currently shown:
//!
//! - [`NavigationStackCoordinator`]: a root, pushed coordinators and a sheet.
//! - [`NavigationSplitCoordinator`]: a sidebar and a detail pane side by side,
//!   collapsing into a single stack in compact layouts.
//! - [`NavigationTabCoordinator`]: parallel tabs plus an overlay.
//!
//! Each container owns [`NavigationModule`]s, a coordinator paired with an
//! optional dismissal callback. Whenever a module leaves its slot, by pop,
//! replacement or clearing, its coordinator is stopped and the callback fires
//! exactly once. Containers are coordinators too, so they nest:
//!
//! ```txt
//!   NavigationTabCoordinator
//!   └── NavigationSplitCoordinator
//!       ├── sidebar: NavigationStackCoordinator (room list)
//!       └── detail:  NavigationStackCoordinator (room, member details, ...)
//! ```
//!
//! Containers are single-threaded handles. Dismissal callbacks always run with
//! no container state borrowed, so they may call back into any container.

mod coordinator;
mod layout;
mod module;
mod observer;
mod split;
mod stack;
mod tab;

pub use self::coordinator::{same_coordinator, Coordinator, Id, SharedCoordinator};
pub use self::layout::{BarVisibility, HorizontalSizeClass};
pub use self::module::{DismissalCallback, NavigationModule};
pub use self::split::{NavigationSplitCoordinator, SplitPresentation};
pub use self::stack::NavigationStackCoordinator;
pub use self::tab::{NavigationTabCoordinator, OverlayPresentationMode, Tab, TabDetails};

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::coordinator::{same_coordinator, Coordinator, SharedCoordinator};
    use super::module::DismissalCallback;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// A leaf coordinator that only records its lifecycle.
    #[derive(Debug, Default)]
    pub struct TestCoordinator {
        start_count: Cell<usize>,
        stop_count: Cell<usize>,
    }

    impl TestCoordinator {
        pub fn start_count(&self) -> usize {
            self.start_count.get()
        }

        pub fn stop_count(&self) -> usize {
            self.stop_count.get()
        }
    }

    impl Coordinator for TestCoordinator {
        fn start(&self) {
            self.start_count.set(self.start_count.get() + 1);
        }

        fn stop(&self) {
            self.stop_count.set(self.stop_count.get() + 1);
        }
    }

    pub fn test_coordinator() -> SharedCoordinator {
        Rc::new(TestCoordinator::default())
    }

    #[derive(Clone, Default)]
    pub struct DismissalCounter(Rc<Cell<usize>>);

    impl DismissalCounter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn increment(&self) {
            self.0.set(self.0.get() + 1);
        }

        pub fn callback(&self) -> Option<DismissalCallback> {
            let counter = self.clone();
            Some(Box::new(move || counter.increment()))
        }

        pub fn count(&self) -> usize {
            self.0.get()
        }
    }

    /// Records the order in which dismissal callbacks fire.
    #[derive(Clone, Default)]
    pub struct EventLog(Rc<RefCell<Vec<&'static str>>>);

    impl EventLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn callback(&self, name: &'static str) -> Option<DismissalCallback> {
            let entries = self.0.clone();
            Some(Box::new(move || entries.borrow_mut().push(name)))
        }

        pub fn entries(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    #[track_caller]
    pub fn assert_coordinators_equal(
        expected: Option<&SharedCoordinator>,
        actual: Option<&SharedCoordinator>,
    ) {
        match (expected, actual) {
            (Some(expected), Some(actual)) => assert!(
                same_coordinator(expected, actual),
                "expected {:?}, got {:?}",
                expected,
                actual
            ),
            (None, None) => {}
            (expected, actual) => panic!("expected {:?}, got {:?}", expected, actual),
        }
    }

    #[track_caller]
    pub fn assert_coordinator_lists_equal(
        expected: &[SharedCoordinator],
        actual: &[SharedCoordinator],
    ) {
        assert_eq!(
            expected.len(),
            actual.len(),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
        for (expected, actual) in expected.iter().zip(actual) {
            assert_coordinators_equal(Some(expected), Some(actual));
        }
    }
}
