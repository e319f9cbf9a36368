// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay open/close bookkeeping.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::focus::FocusTrap;
use super::host::{OverlayHost, PointerTarget};
use super::id::{OverlayId, OverlayKind};
use super::origin::Origin;

#[derive(Clone, Debug)]
struct OverlaySlot {
    kind: OverlayKind,
    name: String,
    open: bool,
    origin: Option<Origin>,
}

/// Owns every overlay surface on the page and their open-time records.
///
/// Two side tables are keyed by [`OverlayId`]: the installed focus-trap
/// handle and the element to refocus on close. Both are inserted by
/// [`open`](Self::open) and removed exactly once by [`close`](Self::close),
/// so an overlay has a trap registration iff it is open.
///
/// Open and close are idempotent: opening an open overlay or closing a
/// closed one does nothing and returns `false`.
pub struct OverlayManager<H: OverlayHost> {
    host: H,
    slots: Vec<OverlaySlot>,
    traps: BTreeMap<OverlayId, H::TrapHandle>,
    return_focus: BTreeMap<OverlayId, Option<H::Element>>,
    menu: Option<OverlayId>,
    menu_toggle: Option<H::Element>,
}

impl<H: OverlayHost> fmt::Debug for OverlayManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayManager")
            .field("overlays", &self.slots.len())
            .field("open", &self.open_count())
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> OverlayManager<H> {
    /// Creates a manager with no registered overlays.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            slots: Vec::new(),
            traps: BTreeMap::new(),
            return_focus: BTreeMap::new(),
            menu: None,
            menu_toggle: None,
        }
    }

    /// Returns the backing host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the backing host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Registers an overlay surface, initially closed.
    ///
    /// Registering a second [`OverlayKind::Menu`] makes it the menu that
    /// [`toggle_menu`](Self::toggle_menu) drives.
    pub fn register(&mut self, kind: OverlayKind, name: impl Into<String>) -> OverlayId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page never holds 2^32 overlays"
        )]
        let id = OverlayId(self.slots.len() as u32);
        self.slots.push(OverlaySlot {
            kind,
            name: name.into(),
            open: false,
            origin: None,
        });
        if kind == OverlayKind::Menu {
            self.menu = Some(id);
        }
        id
    }

    /// Looks up an overlay by the DOM id it was registered under.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<OverlayId> {
        self.slots
            .iter()
            .position(|slot| slot.name == name)
            .and_then(|idx| u32::try_from(idx).ok())
            .map(OverlayId)
    }

    /// Returns the kind of a registered overlay.
    #[must_use]
    pub fn kind(&self, id: OverlayId) -> Option<OverlayKind> {
        self.slot(id).map(|slot| slot.kind)
    }

    /// Returns the navigation menu overlay, if one is registered.
    #[must_use]
    pub fn menu(&self) -> Option<OverlayId> {
        self.menu
    }

    /// Sets the control whose expanded indicator mirrors the menu.
    ///
    /// The indicator is synchronized immediately.
    pub fn set_menu_toggle(&mut self, toggle: H::Element) {
        let expanded = self.menu.is_some_and(|menu| self.is_open(menu));
        self.host.set_expanded(&toggle, expanded);
        self.menu_toggle = Some(toggle);
    }

    /// Returns `true` if the overlay is open.
    #[must_use]
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.slot(id).is_some_and(|slot| slot.open)
    }

    /// Returns the overlay's `aria-hidden` state, the inverse of
    /// [`is_open`](Self::is_open).
    #[must_use]
    pub fn is_aria_hidden(&self, id: OverlayId) -> bool {
        !self.is_open(id)
    }

    /// Returns the origin computed the last time the overlay opened from a
    /// trigger.
    #[must_use]
    pub fn origin(&self, id: OverlayId) -> Option<Origin> {
        self.slot(id).and_then(|slot| slot.origin)
    }

    /// Returns `true` if any overlay is open.
    #[must_use]
    pub fn any_open(&self) -> bool {
        self.slots.iter().any(|slot| slot.open)
    }

    /// Returns the number of open overlays.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.open).count()
    }

    /// Returns `true` if a focus-trap registration exists for the overlay.
    #[must_use]
    pub fn has_trap(&self, id: OverlayId) -> bool {
        self.traps.contains_key(&id)
    }

    /// Returns the recorded return-focus target, if the overlay is open.
    ///
    /// The outer `Option` is `None` when no record exists; the inner one is
    /// `None` when nothing held focus at open time.
    #[must_use]
    pub fn return_focus_target(&self, id: OverlayId) -> Option<Option<&H::Element>> {
        self.return_focus.get(&id).map(Option::as_ref)
    }

    /// Opens an overlay, optionally anchored at `trigger`.
    ///
    /// Returns `false` (and does nothing) if the overlay is unknown or
    /// already open.
    pub fn open(&mut self, id: OverlayId, trigger: Option<&H::Element>) -> bool {
        match self.slot(id) {
            Some(slot) if !slot.open => {}
            _ => return false,
        }

        let origin = trigger.and_then(|trigger| {
            Origin::from_trigger(self.host.element_rect(trigger), self.host.viewport_size())
        });
        if let Some(origin) = origin {
            self.host.apply_origin(id, origin);
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.open = true;
            if origin.is_some() {
                slot.origin = origin;
            }
        }

        self.host.apply_open_state(id, true);
        self.host.set_scroll_locked(true);

        let return_to = trigger.cloned().or_else(|| self.host.active_element());
        self.return_focus.insert(id, return_to);

        let trap = FocusTrap::new(self.host.focusable_descendants(id));
        let first = trap.first().cloned();
        let handle = self.host.install_trap(id, trap);
        if let Some(stale) = self.traps.insert(id, handle) {
            // Unreachable while open and close stay paired.
            self.host.remove_trap(id, stale);
        }

        match first {
            Some(element) => self.host.focus(&element),
            None => self.host.focus_root(id),
        }

        self.sync_menu_toggle(id);
        true
    }

    /// Closes an overlay.
    ///
    /// Returns `false` (and does nothing) if the overlay is unknown or
    /// already closed.
    pub fn close(&mut self, id: OverlayId) -> bool {
        match self.slot_mut(id) {
            Some(slot) if slot.open => slot.open = false,
            _ => return false,
        }

        self.host.apply_open_state(id, false);
        if let Some(handle) = self.traps.remove(&id) {
            self.host.remove_trap(id, handle);
        }
        let return_to = self.return_focus.remove(&id).flatten();

        let still_open = self.any_open();
        self.host.set_scroll_locked(still_open);

        if let Some(target) = return_to
            && self.host.can_focus(&target)
        {
            self.host.focus(&target);
        }

        self.sync_menu_toggle(id);
        true
    }

    /// Opens the navigation menu if closed, closes it if open.
    ///
    /// Returns the menu's new open state (`false` if no menu is registered).
    pub fn toggle_menu(&mut self) -> bool {
        let Some(menu) = self.menu else {
            return false;
        };
        if self.is_open(menu) {
            self.close(menu);
        } else {
            let toggle = self.menu_toggle.clone();
            self.open(menu, toggle.as_ref());
        }
        self.is_open(menu)
    }

    /// Closes every open overlay, returning how many were closed.
    pub fn close_all(&mut self) -> usize {
        let open: Vec<OverlayId> = self
            .ids()
            .filter(|&id| self.is_open(id))
            .collect();
        open.into_iter().filter(|&id| self.close(id)).count()
    }

    /// Handles a pointer-down inside an overlay.
    ///
    /// Content overlays close when the root or the backdrop is hit; the menu
    /// closes only when its root itself is hit. Returns `true` if the
    /// overlay closed.
    pub fn pointer_down(&mut self, id: OverlayId, target: PointerTarget) -> bool {
        let dismiss = matches!(
            (self.kind(id), target),
            (
                Some(OverlayKind::Content),
                PointerTarget::Root | PointerTarget::Backdrop
            ) | (Some(OverlayKind::Menu), PointerTarget::Root)
        );
        dismiss && self.close(id)
    }

    /// Iterates over every registered overlay id.
    pub fn ids(&self) -> impl Iterator<Item = OverlayId> + use<H> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "register() keeps the slot count within u32"
        )]
        let len = self.slots.len() as u32;
        (0..len).map(OverlayId)
    }

    fn sync_menu_toggle(&mut self, id: OverlayId) {
        if self.menu != Some(id) {
            return;
        }
        let expanded = self.is_open(id);
        if let Some(toggle) = &self.menu_toggle {
            self.host.set_expanded(toggle, expanded);
        }
    }

    fn slot(&self, id: OverlayId) -> Option<&OverlaySlot> {
        self.slots.get(id.0 as usize)
    }

    fn slot_mut(&mut self, id: OverlayId) -> Option<&mut OverlaySlot> {
        self.slots.get_mut(id.0 as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::vec;
    use crate::overlay::MENU_ELEMENT_ID;
    use kurbo::{Rect, Size};

    type El = u32;

    /// Records every side effect so tests can assert on the host state.
    #[derive(Debug, Default)]
    struct RecordingHost {
        viewport: Size,
        rects: BTreeMap<El, Rect>,
        focusables: BTreeMap<OverlayId, Vec<El>>,
        active: Option<El>,
        detached: BTreeSet<El>,
        open_state: BTreeMap<OverlayId, bool>,
        origins: BTreeMap<OverlayId, Origin>,
        scroll_locked: bool,
        next_handle: u32,
        installed: BTreeMap<u32, OverlayId>,
        cleanups: BTreeMap<OverlayId, u32>,
        focus_log: Vec<El>,
        root_focused: Vec<OverlayId>,
        expanded: BTreeMap<El, bool>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                viewport: Size::new(1000.0, 800.0),
                ..Self::default()
            }
        }

        fn cleanups(&self, id: OverlayId) -> u32 {
            self.cleanups.get(&id).copied().unwrap_or(0)
        }
    }

    impl OverlayHost for RecordingHost {
        type Element = El;
        type TrapHandle = u32;

        fn viewport_size(&self) -> Size {
            self.viewport
        }

        fn element_rect(&self, element: &El) -> Rect {
            self.rects.get(element).copied().unwrap_or(Rect::ZERO)
        }

        fn active_element(&self) -> Option<El> {
            self.active
        }

        fn focusable_descendants(&self, overlay: OverlayId) -> Vec<El> {
            self.focusables.get(&overlay).cloned().unwrap_or_default()
        }

        fn apply_open_state(&mut self, overlay: OverlayId, open: bool) {
            self.open_state.insert(overlay, open);
        }

        fn apply_origin(&mut self, overlay: OverlayId, origin: Origin) {
            self.origins.insert(overlay, origin);
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }

        fn install_trap(&mut self, overlay: OverlayId, _trap: FocusTrap<El>) -> u32 {
            self.next_handle += 1;
            self.installed.insert(self.next_handle, overlay);
            self.next_handle
        }

        fn remove_trap(&mut self, overlay: OverlayId, handle: u32) {
            let owner = self.installed.remove(&handle);
            assert_eq!(owner, Some(overlay), "handle removed twice or mismatched");
            *self.cleanups.entry(overlay).or_insert(0) += 1;
        }

        fn focus(&mut self, element: &El) {
            self.active = Some(*element);
            self.focus_log.push(*element);
        }

        fn focus_root(&mut self, overlay: OverlayId) {
            self.active = None;
            self.root_focused.push(overlay);
        }

        fn can_focus(&self, element: &El) -> bool {
            !self.detached.contains(element)
        }

        fn set_expanded(&mut self, toggle: &El, expanded: bool) {
            self.expanded.insert(*toggle, expanded);
        }
    }

    fn manager_with(content: usize) -> (OverlayManager<RecordingHost>, Vec<OverlayId>) {
        let mut manager = OverlayManager::new(RecordingHost::new());
        let ids = (0..content)
            .map(|i| manager.register(OverlayKind::Content, alloc::format!("overlay-{i}")))
            .collect();
        (manager, ids)
    }

    #[test]
    fn open_sets_state_locks_scroll_and_focuses_first() {
        let (mut m, ids) = manager_with(1);
        let a = ids[0];
        m.host_mut().focusables.insert(a, vec![10, 11]);

        assert!(m.open(a, None));
        assert!(m.is_open(a));
        assert!(!m.is_aria_hidden(a));
        assert_eq!(m.host().open_state.get(&a), Some(&true));
        assert!(m.host().scroll_locked, "opening must lock scroll");
        assert!(m.has_trap(a));
        assert_eq!(m.host().active, Some(10), "first focusable gets focus");
    }

    #[test]
    fn open_without_focusables_focuses_root() {
        let (mut m, ids) = manager_with(1);
        assert!(m.open(ids[0], None));
        assert_eq!(m.host().root_focused, vec![ids[0]]);
        assert!(m.has_trap(ids[0]), "an open overlay always has a trap");
    }

    #[test]
    fn open_twice_is_a_noop() {
        let (mut m, ids) = manager_with(1);
        assert!(m.open(ids[0], None));
        assert!(!m.open(ids[0], None));
        assert_eq!(m.host().installed.len(), 1, "only one trap may be attached");
    }

    #[test]
    fn unknown_overlay_is_ignored() {
        let (mut m, _) = manager_with(0);
        let bogus = OverlayId(42);
        assert!(!m.open(bogus, None));
        assert!(!m.close(bogus));
        assert!(!m.pointer_down(bogus, PointerTarget::Root));
        assert!(!m.host().scroll_locked);
    }

    #[test]
    fn repeated_close_cleans_up_exactly_once() {
        let (mut m, ids) = manager_with(1);
        let a = ids[0];
        m.open(a, None);
        assert!(m.close(a));
        assert!(!m.close(a));
        assert!(!m.close(a));
        assert_eq!(m.host().cleanups(a), 1, "cleanup must run exactly once");
        assert!(!m.has_trap(a));
        assert_eq!(m.return_focus_target(a), None);
    }

    #[test]
    fn closing_one_of_two_keeps_the_other_intact() {
        let (mut m, ids) = manager_with(2);
        let (a, b) = (ids[0], ids[1]);
        m.host_mut().focusables.insert(a, vec![20]);
        m.host_mut().focusables.insert(b, vec![30]);

        m.open(a, Some(&1));
        m.open(b, Some(&2));
        m.close(b);

        assert!(m.has_trap(a), "A's trap must survive closing B");
        assert_eq!(m.return_focus_target(a), Some(Some(&1)));
        assert_eq!(m.host().cleanups(a), 0);
        assert!(m.host().scroll_locked, "A still open, scroll stays locked");
        assert_eq!(m.host().active, Some(2), "focus returns to B's trigger");
    }

    #[test]
    fn scroll_lock_tracks_any_open_over_a_sequence() {
        let (mut m, ids) = manager_with(4);
        // Deterministic LCG walk over open/close calls.
        let mut state: u32 = 0x2545_f491;
        for _ in 0..500 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let id = ids[(state >> 8) as usize % ids.len()];
            if state & 1 == 0 {
                m.open(id, None);
            } else {
                m.close(id);
            }
            assert_eq!(
                m.host().scroll_locked,
                m.any_open(),
                "scroll lock must equal any-open after every call"
            );
            for &id in &ids {
                assert_eq!(m.has_trap(id), m.is_open(id), "trap iff open");
            }
        }
    }

    #[test]
    fn return_focus_prefers_trigger_then_active_element() {
        let (mut m, ids) = manager_with(2);
        m.host_mut().active = Some(5);
        m.open(ids[0], Some(&7));
        assert_eq!(m.return_focus_target(ids[0]), Some(Some(&7)));

        m.host_mut().active = Some(9);
        m.open(ids[1], None);
        assert_eq!(m.return_focus_target(ids[1]), Some(Some(&9)));

        m.close(ids[1]);
        assert_eq!(m.host().active, Some(9));
        m.close(ids[0]);
        assert_eq!(m.host().active, Some(7));
    }

    #[test]
    fn detached_return_target_is_not_refocused() {
        let (mut m, ids) = manager_with(1);
        m.host_mut().focusables.insert(ids[0], vec![40]);
        m.open(ids[0], Some(&3));
        m.host_mut().detached.insert(3);
        m.close(ids[0]);
        assert_eq!(m.host().focus_log, vec![40], "detached trigger keeps no focus");
    }

    #[test]
    fn origin_is_written_from_trigger() {
        let (mut m, ids) = manager_with(2);
        m.host_mut()
            .rects
            .insert(1, Rect::new(490.0, 390.0, 510.0, 410.0));
        m.host_mut()
            .rects
            .insert(2, Rect::new(490.0, 750.0, 510.0, 770.0));

        m.open(ids[0], Some(&1));
        let origin = m.origin(ids[0]).expect("origin from trigger");
        assert_eq!((origin.css_x().as_str(), origin.css_y().as_str()), ("50.00%", "50.00%"));

        m.open(ids[1], Some(&2));
        let origin = m.host().origins[&ids[1]];
        assert_eq!(origin.css_y(), "60.00%", "vertical origin clamps at 60%");
    }

    #[test]
    fn open_without_trigger_leaves_origin_alone() {
        let (mut m, ids) = manager_with(1);
        m.open(ids[0], None);
        assert_eq!(m.origin(ids[0]), None);
        assert!(m.host().origins.is_empty());
    }

    #[test]
    fn escape_closes_every_open_overlay_and_resets_menu_toggle() {
        let (mut m, ids) = manager_with(1);
        let menu = m.register(OverlayKind::Menu, "burger-menu");
        m.set_menu_toggle(99);

        assert!(m.toggle_menu());
        m.open(ids[0], None);
        assert_eq!(m.host().expanded.get(&99), Some(&true));

        assert_eq!(m.close_all(), 2);
        assert!(!m.is_open(menu));
        assert!(!m.is_open(ids[0]));
        assert!(m.is_aria_hidden(menu) && m.is_aria_hidden(ids[0]));
        assert_eq!(m.host().expanded.get(&99), Some(&false), "toggle must reset");
        assert!(!m.host().scroll_locked);
    }

    #[test]
    fn toggle_menu_flips_and_mirrors_expanded() {
        let mut m = OverlayManager::new(RecordingHost::new());
        let menu = m.register(OverlayKind::Menu, "burger-menu");
        m.set_menu_toggle(50);
        assert_eq!(m.host().expanded.get(&50), Some(&false));

        assert!(m.toggle_menu());
        assert!(m.is_open(menu));
        assert_eq!(m.host().expanded.get(&50), Some(&true));
        assert_eq!(m.return_focus_target(menu), Some(Some(&50)));

        assert!(!m.toggle_menu());
        assert_eq!(m.host().expanded.get(&50), Some(&false));
    }

    #[test]
    fn toggle_without_menu_does_nothing() {
        let (mut m, _) = manager_with(1);
        assert!(!m.toggle_menu());
    }

    #[test]
    fn pointer_down_dismissal_rules() {
        let (mut m, ids) = manager_with(1);
        let content = ids[0];
        let menu = m.register(OverlayKind::Menu, "burger-menu");

        m.open(content, None);
        assert!(!m.pointer_down(content, PointerTarget::Content));
        assert!(m.pointer_down(content, PointerTarget::Backdrop));
        m.open(content, None);
        assert!(m.pointer_down(content, PointerTarget::Root));

        m.open(menu, None);
        assert!(!m.pointer_down(menu, PointerTarget::Backdrop));
        assert!(!m.pointer_down(menu, PointerTarget::Content));
        assert!(m.pointer_down(menu, PointerTarget::Root));
    }

    #[test]
    fn find_resolves_registered_names() {
        let (m, ids) = manager_with(3);
        assert_eq!(m.find("overlay-2"), Some(ids[2]));
        assert_eq!(m.find("overlay-9"), None);
    }

    #[test]
    fn menu_is_the_root_registered_under_the_menu_id() {
        let mut m = OverlayManager::new(RecordingHost::new());
        for name in ["overlay-reef", MENU_ELEMENT_ID, "overlay-kelp"] {
            let _ = m.register(OverlayKind::for_element_id(name), name);
        }
        assert!(m.menu().is_some());
        assert_eq!(
            m.menu(),
            m.find(MENU_ELEMENT_ID),
            "menu toggling and menu links must address the same overlay"
        );
    }

    #[test]
    fn trace_event_captures_post_transition_state() {
        use crate::trace::{OverlayAction, OverlayEvent};

        let (mut m, ids) = manager_with(2);
        m.open(ids[0], None);
        m.open(ids[1], None);
        let evt = OverlayEvent::capture(&m, ids[1], OverlayAction::Opened).expect("known id");
        assert_eq!(evt.kind, OverlayKind::Content);
        assert_eq!(evt.open_count, 2);
        m.close(ids[0]);
        let evt = OverlayEvent::capture(&m, ids[0], OverlayAction::Closed).expect("known id");
        assert_eq!(evt.open_count, 1);
        assert_eq!(OverlayEvent::capture(&m, OverlayId(99), OverlayAction::Closed), None);
    }
}
