//! A tab bar container: any number of parallel tabs plus modal presentations
//! shared by all of them.

use super::coordinator::{Coordinator, SharedCoordinator};
use super::layout::{BarVisibility, HorizontalSizeClass};
use super::module::{DismissalCallback, NavigationModule};
use super::split::{NavigationSplitCoordinator, WeakSplitCoordinator};
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;
use tracing::{debug, info};

/// How an overlay is shown on top of the tabs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPresentationMode {
    FullScreen,
    #[default]
    Minimized,
}

/// Describes how a tab is labelled in the tab bar.
#[derive(Debug, Clone)]
pub struct TabDetails<Tag> {
    /// Identifies the tab for selection.
    pub tag: Tag,
    pub title: String,
    pub icon: String,
    pub selected_icon: String,
    badge_count: usize,
    bar_visibility_override: Option<BarVisibility>,
    split: Option<WeakSplitCoordinator>,
}

impl<Tag> TabDetails<Tag> {
    pub fn new(
        tag: Tag,
        title: impl Into<String>,
        icon: impl Into<String>,
        selected_icon: impl Into<String>,
    ) -> Self {
        TabDetails {
            tag,
            title: title.into(),
            icon: icon.into(),
            selected_icon: selected_icon.into(),
            badge_count: 0,
            bar_visibility_override: None,
            split: None,
        }
    }

    /// Associates the tab with the split it displays, so the tab bar hides
    /// itself while that split shows a detail in compact layouts.
    pub fn with_split(mut self, split: &NavigationSplitCoordinator) -> Self {
        self.split = Some(split.downgrade());
        self
    }

    pub fn badge_count(&self) -> usize {
        self.badge_count
    }

    pub fn bar_visibility_override(&self) -> Option<BarVisibility> {
        self.bar_visibility_override
    }

    /// Resolves the tab bar visibility for this tab. An override always wins.
    pub fn bar_visibility(&self, size_class: HorizontalSizeClass) -> BarVisibility {
        if let Some(visibility) = self.bar_visibility_override {
            return visibility;
        }

        let shows_detail = self
            .split
            .as_ref()
            .and_then(WeakSplitCoordinator::upgrade)
            .is_some_and(|split| split.detail_coordinator().is_some());

        if size_class == HorizontalSizeClass::Compact && shows_detail {
            BarVisibility::Hidden
        } else {
            BarVisibility::Automatic
        }
    }
}

/// A tab to install with [`NavigationTabCoordinator::set_tabs`].
pub struct Tab<Tag> {
    pub coordinator: SharedCoordinator,
    pub details: TabDetails<Tag>,
    pub dismissal_callback: Option<DismissalCallback>,
}

impl<Tag> Tab<Tag> {
    pub fn new(coordinator: SharedCoordinator, details: TabDetails<Tag>) -> Self {
        Tab {
            coordinator,
            details,
            dismissal_callback: None,
        }
    }

    pub fn on_dismiss(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.dismissal_callback = Some(Box::new(callback));
        self
    }
}

struct TabModule<Tag> {
    module: NavigationModule,
    details: TabDetails<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Sheet,
    FullScreenCover,
    Overlay,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Slot::Sheet => "sheet",
            Slot::FullScreenCover => "fullscreen cover",
            Slot::Overlay => "overlay",
        }
    }
}

struct TabState<Tag> {
    tabs: Vec<TabModule<Tag>>,
    selected_tab: Option<Tag>,
    sheet: Option<NavigationModule>,
    full_screen_cover: Option<NavigationModule>,
    overlay: Option<NavigationModule>,
    overlay_presentation_mode: OverlayPresentationMode,
}

impl<Tag> TabState<Tag> {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<NavigationModule> {
        match slot {
            Slot::Sheet => &mut self.sheet,
            Slot::FullScreenCover => &mut self.full_screen_cover,
            Slot::Overlay => &mut self.overlay,
        }
    }
}

/// Displays an arbitrary number of coordinators within a tab bar.
pub struct NavigationTabCoordinator<Tag> {
    state: Rc<RefCell<TabState<Tag>>>,
}

impl<Tag> Clone for NavigationTabCoordinator<Tag> {
    fn clone(&self) -> Self {
        NavigationTabCoordinator {
            state: self.state.clone(),
        }
    }
}

impl<Tag> Default for NavigationTabCoordinator<Tag>
where
    Tag: Clone + PartialEq + fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Tag> NavigationTabCoordinator<Tag>
where
    Tag: Clone + PartialEq + fmt::Debug + 'static,
{
    pub fn new() -> Self {
        NavigationTabCoordinator {
            state: Rc::new(RefCell::new(TabState {
                tabs: Vec::new(),
                selected_tab: None,
                sheet: None,
                full_screen_cover: None,
                overlay: None,
                overlay_presentation_mode: OverlayPresentationMode::default(),
            })),
        }
    }

    /// The coordinators displayed by the tabs, in tab bar order.
    pub fn tab_coordinators(&self) -> Vec<SharedCoordinator> {
        self.state
            .borrow()
            .tabs
            .iter()
            .map(|tab| tab.module.coordinator().clone())
            .collect()
    }

    /// The tabs' modules, in tab bar order.
    pub fn tab_modules(&self) -> Vec<NavigationModule> {
        self.state
            .borrow()
            .tabs
            .iter()
            .map(|tab| tab.module.clone())
            .collect()
    }

    /// The tabs' details, in tab bar order.
    pub fn tab_details(&self) -> Vec<TabDetails<Tag>> {
        self.state
            .borrow()
            .tabs
            .iter()
            .map(|tab| tab.details.clone())
            .collect()
    }

    /// Replaces every tab and selects the first new one.
    ///
    /// All previous tabs are dismissed before the new ones are started.
    pub fn set_tabs(&self, tabs: Vec<Tab<Tag>>) {
        let tabs: Vec<TabModule<Tag>> = tabs
            .into_iter()
            .map(|tab| TabModule {
                module: NavigationModule::new(tab.coordinator, tab.dismissal_callback),
                details: tab.details,
            })
            .collect();
        let installed: Vec<NavigationModule> = tabs.iter().map(|tab| tab.module.clone()).collect();

        let old = {
            let mut state = self.state.borrow_mut();
            state.selected_tab = tabs.first().map(|tab| tab.details.tag.clone());
            mem::replace(&mut state.tabs, tabs)
        };

        for tab in old {
            self.log_presentation_change("Remove tab", &tab.module);
            tab.module.tear_down();
        }

        for module in installed {
            self.log_presentation_change("Set tab", &module);
            module.coordinator().start();
        }
    }

    /// The currently selected tab's tag.
    pub fn selected_tab(&self) -> Option<Tag> {
        self.state.borrow().selected_tab.clone()
    }

    /// Selects the tab tagged `tag`. Unknown tags are ignored.
    pub fn set_selected_tab(&self, tag: Tag) {
        let mut state = self.state.borrow_mut();
        if !state.tabs.iter().any(|tab| tab.details.tag == tag) {
            debug!("Ignoring selection of unknown tab {:?}", tag);
            return;
        }

        state.selected_tab = Some(tag);
    }

    /// Sets the badge shown on a tab.
    ///
    /// # Arguments
    ///
    /// * `tag` - The tab to update. Unknown tags are ignored.
    /// * `badge_count` - The new count, `0` hides the badge.
    pub fn set_badge_count(&self, tag: &Tag, badge_count: usize) {
        self.update_details(tag, |details| details.badge_count = badge_count);
    }

    /// Forces the tab bar visibility while a tab is shown.
    ///
    /// # Arguments
    ///
    /// * `tag` - The tab to update. Unknown tags are ignored.
    /// * `visibility` - The forced visibility, or `None` to derive it from
    ///   the layout again.
    pub fn set_bar_visibility_override(&self, tag: &Tag, visibility: Option<BarVisibility>) {
        self.update_details(tag, |details| details.bar_visibility_override = visibility);
    }

    /// Resolves the tab bar visibility while `tag` is shown, if such a tab
    /// exists.
    pub fn bar_visibility(
        &self,
        tag: &Tag,
        size_class: HorizontalSizeClass,
    ) -> Option<BarVisibility> {
        let details = self
            .state
            .borrow()
            .tabs
            .iter()
            .find(|tab| tab.details.tag == *tag)
            .map(|tab| tab.details.clone())?;

        Some(details.bar_visibility(size_class))
    }

    pub fn sheet_coordinator(&self) -> Option<SharedCoordinator> {
        self.state
            .borrow()
            .sheet
            .as_ref()
            .map(|module| module.coordinator().clone())
    }

    pub fn full_screen_cover_coordinator(&self) -> Option<SharedCoordinator> {
        self.state
            .borrow()
            .full_screen_cover
            .as_ref()
            .map(|module| module.coordinator().clone())
    }

    pub fn overlay_coordinator(&self) -> Option<SharedCoordinator> {
        self.state
            .borrow()
            .overlay
            .as_ref()
            .map(|module| module.coordinator().clone())
    }

    pub fn overlay_presentation_mode(&self) -> OverlayPresentationMode {
        self.state.borrow().overlay_presentation_mode
    }

    /// Presents a sheet on top of the tabs, or dismisses it when `None`.
    pub fn set_sheet_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::Sheet, coordinator, dismissal_callback);
    }

    /// Presents a fullscreen cover on top of the tabs, or dismisses it when
    /// `None`.
    pub fn set_full_screen_cover_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        self.replace_module(Slot::FullScreenCover, coordinator, dismissal_callback);
    }

    /// Shows an overlay on top of the tabs, or removes it when `None`.
    ///
    /// `presentation_mode` is only applied when an overlay is installed.
    pub fn set_overlay_coordinator(
        &self,
        coordinator: Option<SharedCoordinator>,
        presentation_mode: OverlayPresentationMode,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        if coordinator.is_some() {
            self.state.borrow_mut().overlay_presentation_mode = presentation_mode;
        }

        self.replace_module(Slot::Overlay, coordinator, dismissal_callback);
    }

    /// Removes the overlay, keeping the current presentation mode.
    pub fn dismiss_overlay(&self) {
        self.replace_module(Slot::Overlay, None, None);
    }

    /// Switches how the current overlay is shown. The overlay itself is
    /// neither dismissed nor restarted.
    pub fn set_overlay_presentation_mode(&self, presentation_mode: OverlayPresentationMode) {
        self.state.borrow_mut().overlay_presentation_mode = presentation_mode;
    }

    fn update_details(&self, tag: &Tag, update: impl FnOnce(&mut TabDetails<Tag>)) {
        let mut state = self.state.borrow_mut();
        match state.tabs.iter_mut().find(|tab| tab.details.tag == *tag) {
            Some(tab) => update(&mut tab.details),
            None => debug!("Ignoring update of unknown tab {:?}", tag),
        }
    }

    fn replace_module(
        &self,
        slot: Slot,
        coordinator: Option<SharedCoordinator>,
        dismissal_callback: Option<DismissalCallback>,
    ) {
        let module =
            coordinator.map(|coordinator| NavigationModule::new(coordinator, dismissal_callback));
        let old = mem::replace(self.state.borrow_mut().slot_mut(slot), module.clone());

        if let Some(old) = old {
            self.log_presentation_change(&format!("Remove {}", slot.name()), &old);
            old.tear_down();
        }

        if let Some(module) = module {
            self.log_presentation_change(&format!("Set {}", slot.name()), &module);
            module.coordinator().start();
        }
    }

    fn log_presentation_change(&self, change: &str, module: &NavigationModule) {
        info!(
            container = "tab",
            change,
            module = module.id(),
            "{} {}: {:?}",
            self,
            change,
            module.coordinator()
        );
    }
}

impl<Tag> Coordinator for NavigationTabCoordinator<Tag>
where
    Tag: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Tears down every tab.
    fn stop(&self) {
        let modules = self.tab_modules();
        for module in modules {
            module.tear_down();
        }
    }
}

impl<Tag> fmt::Display for NavigationTabCoordinator<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(state) = self.state.try_borrow() else {
            return write!(f, "NavigationTabCoordinator(Busy)");
        };

        if state.tabs.is_empty() {
            return write!(f, "NavigationTabCoordinator(Empty)");
        }

        let coordinators: Vec<&SharedCoordinator> =
            state.tabs.iter().map(|tab| tab.module.coordinator()).collect();
        write!(f, "NavigationTabCoordinator({:?})", coordinators)
    }
}

impl<Tag> fmt::Debug for NavigationTabCoordinator<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::test_helpers::{
        assert_coordinator_lists_equal, assert_coordinators_equal, test_coordinator,
        DismissalCounter, TestCoordinator,
    };
    use crate::navigation::NavigationStackCoordinator;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestTab {
        Tab,
        Chats,
        Spaces,
    }

    fn details(tag: TestTab) -> TabDetails<TestTab> {
        let name = format!("{:?}", tag);
        let icon = name.to_lowercase();
        let selected_icon = format!("{}-solid", icon);
        TabDetails::new(tag, name, icon, selected_icon)
    }

    fn single_tab(coordinator: SharedCoordinator) -> NavigationTabCoordinator<TestTab> {
        let tabs = NavigationTabCoordinator::new();
        tabs.set_tabs(vec![Tab::new(coordinator, details(TestTab::Tab))]);
        tabs
    }

    #[test]
    fn tabs() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        assert!(tabs.tab_coordinators().is_empty());

        let some = test_coordinator();
        tabs.set_tabs(vec![Tab::new(some.clone(), details(TestTab::Tab))]);
        assert_coordinator_lists_equal(&[some], &tabs.tab_coordinators());

        let chats = test_coordinator();
        let spaces = test_coordinator();
        tabs.set_tabs(vec![
            Tab::new(chats.clone(), details(TestTab::Chats)),
            Tab::new(spaces.clone(), details(TestTab::Spaces)),
        ]);
        assert_coordinator_lists_equal(&[chats, spaces], &tabs.tab_coordinators());
    }

    #[test]
    fn set_tabs_selects_the_first_tab() {
        let tabs = NavigationTabCoordinator::new();
        assert_eq!(tabs.selected_tab(), None);

        tabs.set_tabs(vec![
            Tab::new(test_coordinator(), details(TestTab::Chats)),
            Tab::new(test_coordinator(), details(TestTab::Spaces)),
        ]);
        assert_eq!(tabs.selected_tab(), Some(TestTab::Chats));

        tabs.set_selected_tab(TestTab::Spaces);
        assert_eq!(tabs.selected_tab(), Some(TestTab::Spaces));

        tabs.set_selected_tab(TestTab::Tab);
        assert_eq!(tabs.selected_tab(), Some(TestTab::Spaces));
    }

    #[test]
    fn single_sheet() {
        let tab = test_coordinator();
        let tabs = single_tab(tab.clone());

        let sheet = test_coordinator();
        tabs.set_sheet_coordinator(Some(sheet.clone()), None);

        assert_coordinator_lists_equal(&[tab.clone()], &tabs.tab_coordinators());
        assert_coordinators_equal(Some(&sheet), tabs.sheet_coordinator().as_ref());

        tabs.set_sheet_coordinator(None, None);

        assert_coordinator_lists_equal(&[tab], &tabs.tab_coordinators());
        assert!(tabs.sheet_coordinator().is_none());
    }

    #[test]
    fn multiple_sheets() {
        let tab = test_coordinator();
        let tabs = single_tab(tab.clone());
        let counter = DismissalCounter::new();
        tabs.set_sheet_coordinator(Some(test_coordinator()), counter.callback());

        let other_sheet = test_coordinator();
        tabs.set_sheet_coordinator(Some(other_sheet.clone()), None);

        assert_coordinator_lists_equal(&[tab], &tabs.tab_coordinators());
        assert_coordinators_equal(Some(&other_sheet), tabs.sheet_coordinator().as_ref());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn full_screen_cover() {
        let tab = test_coordinator();
        let tabs = single_tab(tab.clone());

        let cover = test_coordinator();
        tabs.set_full_screen_cover_coordinator(Some(cover.clone()), None);

        assert_coordinator_lists_equal(&[tab.clone()], &tabs.tab_coordinators());
        assert_coordinators_equal(Some(&cover), tabs.full_screen_cover_coordinator().as_ref());

        tabs.set_full_screen_cover_coordinator(None, None);

        assert_coordinator_lists_equal(&[tab], &tabs.tab_coordinators());
        assert!(tabs.full_screen_cover_coordinator().is_none());
    }

    #[test]
    fn tab_dismissal_callbacks() {
        let tabs = NavigationTabCoordinator::new();
        let old_tabs = DismissalCounter::new();
        let new_tab = DismissalCounter::new();
        let on_old = old_tabs.clone();
        let on_old_too = old_tabs.clone();
        let on_new = new_tab.clone();

        tabs.set_tabs(vec![
            Tab::new(test_coordinator(), details(TestTab::Chats))
                .on_dismiss(move || on_old.increment()),
            Tab::new(test_coordinator(), details(TestTab::Spaces))
                .on_dismiss(move || on_old_too.increment()),
        ]);
        tabs.set_tabs(vec![Tab::new(test_coordinator(), details(TestTab::Tab))
            .on_dismiss(move || on_new.increment())]);

        assert_eq!(old_tabs.count(), 2);
        assert_eq!(new_tab.count(), 0);
    }

    #[test]
    fn sheet_dismissal_callback() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        tabs.set_sheet_coordinator(Some(test_coordinator()), counter.callback());

        tabs.set_sheet_coordinator(None, None);

        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn full_screen_cover_dismissal_callback() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        tabs.set_full_screen_cover_coordinator(Some(test_coordinator()), counter.callback());

        tabs.set_full_screen_cover_coordinator(None, None);

        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn overlay_mode_changes_keep_the_overlay() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        let overlay = Rc::new(TestCoordinator::default());
        tabs.set_overlay_coordinator(
            Some(overlay.clone()),
            OverlayPresentationMode::FullScreen,
            counter.callback(),
        );
        assert_eq!(tabs.overlay_presentation_mode(), OverlayPresentationMode::FullScreen);

        tabs.set_overlay_presentation_mode(OverlayPresentationMode::Minimized);
        tabs.set_overlay_presentation_mode(OverlayPresentationMode::FullScreen);

        assert!(tabs.overlay_coordinator().is_some());
        assert_eq!(counter.count(), 0);
        assert_eq!((overlay.start_count(), overlay.stop_count()), (1, 0));

        tabs.set_overlay_coordinator(None, OverlayPresentationMode::Minimized, None);

        assert!(tabs.overlay_coordinator().is_none());
        assert_eq!(tabs.overlay_presentation_mode(), OverlayPresentationMode::FullScreen);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn dismiss_overlay_keeps_the_presentation_mode() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        let overlay = Rc::new(TestCoordinator::default());
        tabs.set_overlay_coordinator(
            Some(overlay.clone()),
            OverlayPresentationMode::FullScreen,
            counter.callback(),
        );

        tabs.dismiss_overlay();

        assert!(tabs.overlay_coordinator().is_none());
        assert_eq!(tabs.overlay_presentation_mode(), OverlayPresentationMode::FullScreen);
        assert_eq!(counter.count(), 1);
        assert_eq!(overlay.stop_count(), 1);

        tabs.dismiss_overlay();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn dismissing_an_absent_cover_or_overlay_is_a_no_op() {
        let tabs = single_tab(test_coordinator());
        let sheet = DismissalCounter::new();
        tabs.set_sheet_coordinator(Some(test_coordinator()), sheet.callback());

        tabs.set_full_screen_cover_coordinator(None, None);
        tabs.set_overlay_coordinator(None, OverlayPresentationMode::FullScreen, None);
        tabs.dismiss_overlay();

        assert!(tabs.full_screen_cover_coordinator().is_none());
        assert!(tabs.overlay_coordinator().is_none());
        assert_eq!(tabs.overlay_presentation_mode(), OverlayPresentationMode::Minimized);
        assert!(tabs.sheet_coordinator().is_some());
        assert_eq!(sheet.count(), 0);
    }

    #[test]
    fn reinstalling_the_sheet_dismisses_the_old_module_once() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        let sheet = Rc::new(TestCoordinator::default());
        tabs.set_sheet_coordinator(Some(sheet.clone()), counter.callback());

        tabs.set_sheet_coordinator(Some(sheet.clone()), None);

        assert_eq!(counter.count(), 1);
        assert_eq!((sheet.start_count(), sheet.stop_count()), (2, 1));
        let sheet: SharedCoordinator = sheet;
        assert_coordinators_equal(Some(&sheet), tabs.sheet_coordinator().as_ref());
    }

    #[test]
    fn reinstalling_the_full_screen_cover_dismisses_the_old_module_once() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        let cover = Rc::new(TestCoordinator::default());
        tabs.set_full_screen_cover_coordinator(Some(cover.clone()), counter.callback());

        tabs.set_full_screen_cover_coordinator(Some(cover.clone()), None);

        assert_eq!(counter.count(), 1);
        assert_eq!((cover.start_count(), cover.stop_count()), (2, 1));
        let cover: SharedCoordinator = cover;
        assert_coordinators_equal(Some(&cover), tabs.full_screen_cover_coordinator().as_ref());
    }

    #[test]
    fn reinstalling_the_overlay_dismisses_the_old_module_once() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        let counter = DismissalCounter::new();
        let overlay = Rc::new(TestCoordinator::default());
        tabs.set_overlay_coordinator(
            Some(overlay.clone()),
            OverlayPresentationMode::Minimized,
            counter.callback(),
        );

        tabs.set_overlay_coordinator(
            Some(overlay.clone()),
            OverlayPresentationMode::FullScreen,
            None,
        );

        assert_eq!(counter.count(), 1);
        assert_eq!((overlay.start_count(), overlay.stop_count()), (2, 1));
        assert_eq!(tabs.overlay_presentation_mode(), OverlayPresentationMode::FullScreen);
        let overlay: SharedCoordinator = overlay;
        assert_coordinators_equal(Some(&overlay), tabs.overlay_coordinator().as_ref());
    }

    #[test]
    fn badge_counts_and_overrides_apply_to_the_tagged_tab() {
        let tabs = NavigationTabCoordinator::new();
        tabs.set_tabs(vec![
            Tab::new(test_coordinator(), details(TestTab::Chats)),
            Tab::new(test_coordinator(), details(TestTab::Spaces)),
        ]);

        tabs.set_badge_count(&TestTab::Spaces, 3);
        tabs.set_badge_count(&TestTab::Tab, 7);
        tabs.set_bar_visibility_override(&TestTab::Chats, Some(BarVisibility::Visible));

        let details = tabs.tab_details();
        assert_eq!(details[0].badge_count(), 0);
        assert_eq!(details[1].badge_count(), 3);
        assert_eq!(details[0].bar_visibility_override(), Some(BarVisibility::Visible));
        assert_eq!(
            tabs.bar_visibility(&TestTab::Chats, HorizontalSizeClass::Compact),
            Some(BarVisibility::Visible)
        );
        assert_eq!(tabs.bar_visibility(&TestTab::Tab, HorizontalSizeClass::Compact), None);
    }

    #[test]
    fn bar_hides_while_split_shows_detail_in_compact_layouts() {
        let split = NavigationSplitCoordinator::new(test_coordinator());
        let sidebar = NavigationStackCoordinator::embedded_in(&split);
        sidebar.set_root_coordinator(test_coordinator(), None);
        split.set_sidebar_coordinator(Some(Rc::new(sidebar)), None);

        let tabs = NavigationTabCoordinator::new();
        tabs.set_tabs(vec![Tab::new(
            Rc::new(split.clone()),
            details(TestTab::Chats).with_split(&split),
        )]);

        let visibility = |size_class| tabs.bar_visibility(&TestTab::Chats, size_class);
        assert_eq!(visibility(HorizontalSizeClass::Compact), Some(BarVisibility::Automatic));

        split.set_detail_coordinator(Some(test_coordinator()), None);
        assert_eq!(visibility(HorizontalSizeClass::Compact), Some(BarVisibility::Hidden));
        assert_eq!(visibility(HorizontalSizeClass::Regular), Some(BarVisibility::Automatic));

        tabs.set_bar_visibility_override(&TestTab::Chats, Some(BarVisibility::Visible));
        assert_eq!(visibility(HorizontalSizeClass::Compact), Some(BarVisibility::Visible));
    }

    #[test]
    fn stop_tears_down_every_tab() {
        let tabs = NavigationTabCoordinator::new();
        let counter = DismissalCounter::new();
        let on_dismiss = counter.clone();
        let coordinator = Rc::new(TestCoordinator::default());
        tabs.set_tabs(vec![Tab::new(coordinator.clone(), details(TestTab::Tab))
            .on_dismiss(move || on_dismiss.increment())]);

        tabs.stop();
        tabs.stop();

        assert_eq!(counter.count(), 1);
        assert_eq!(coordinator.stop_count(), 1);
    }

    #[test]
    fn display_lists_the_tabs() {
        let tabs = NavigationTabCoordinator::<TestTab>::new();
        assert_eq!(tabs.to_string(), "NavigationTabCoordinator(Empty)");

        tabs.set_tabs(vec![Tab::new(test_coordinator(), details(TestTab::Tab))]);
        assert!(tabs.to_string().starts_with("NavigationTabCoordinator([TestCoordinator"));
    }
}
