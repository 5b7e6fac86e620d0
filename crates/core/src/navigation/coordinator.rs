use downcast_rs::{impl_downcast, Downcast};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Something that can be shown by a navigation container.
///
/// Containers treat coordinators as opaque: they only compare them by identity
/// and drive the two lifecycle hooks below. A coordinator is started when it is
/// installed into a slot and stopped when it leaves it, whether it was popped,
/// replaced or cleared.
///
/// The containers themselves implement this trait so they can be nested (a
/// stack inside a split, a split inside a tab).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use switchyard_core::navigation::{Coordinator, NavigationStackCoordinator, SharedCoordinator};
///
/// #[derive(Debug)]
/// struct RoomScreen;
///
/// impl Coordinator for RoomScreen {}
///
/// let stack = NavigationStackCoordinator::new();
/// let room: SharedCoordinator = Rc::new(RoomScreen);
/// stack.set_root_coordinator(room.clone(), None);
///
/// assert!(stack
///     .root_coordinator()
///     .is_some_and(|root| switchyard_core::navigation::same_coordinator(&root, &room)));
/// ```
pub trait Coordinator: Downcast + fmt::Debug {
    /// Called once the coordinator has been installed into a container slot.
    fn start(&self) {}

    /// Called once the coordinator has been removed from its container slot.
    fn stop(&self) {}
}

impl_downcast!(Coordinator);

/// Shared handle to a coordinator, the unit every container API accepts.
pub type SharedCoordinator = Rc<dyn Coordinator>;

/// Returns true if both handles point at the same coordinator instance.
///
/// Only the data pointer is compared: two `Rc<dyn Coordinator>` built from the
/// same allocation may carry different vtable pointers.
pub fn same_coordinator(lhs: &SharedCoordinator, rhs: &SharedCoordinator) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(lhs), Rc::as_ptr(rhs))
}

pub type Id = u64;

/// Hands out process-unique ids for modules and listener subscriptions.
#[derive(Debug)]
pub struct IdFeeder(AtomicU64);

impl IdFeeder {
    pub const fn new(start: Id) -> Self {
        IdFeeder(AtomicU64::new(start))
    }

    pub fn next(&self) -> Id {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

pub static ID_FEEDER: IdFeeder = IdFeeder::new(1);
