//! Navigation state containers for coordinator-driven UIs.
//!
//! The crate tracks *what is currently shown* (a stack of screens, a
//! sidebar/detail split, a set of tabs) and guarantees that every screen that
//! leaves the hierarchy is torn down exactly once. Rendering is left to the
//! caller, which reads the containers' state and the split's
//! [`presentation`](navigation::NavigationSplitCoordinator::presentation) for
//! the current size class.
//!
//! - [`navigation`]: the containers and the [`Coordinator`](navigation::Coordinator) trait.
//! - [`settings`]: TOML settings for logging and layout.
//! - [`logging`]: JSON log output for container changes.

pub mod logging;
pub mod navigation;
pub mod settings;
