//! Timeline editor state.
//!
//! The timeline is the ordered slot row the player drops frames onto for the
//! currently selected [`AnimationKind`]. Slot position encodes temporal
//! order. Switching kinds saves the current row into a per-kind map and
//! restores whatever was saved for the new kind, so half-built cycles
//! survive for the whole editing session.
//!
//! This resource only owns slot state; the surrounding bookkeeping
//! (inventory hand-offs, scoring, registration) lives in
//! [`crate::systems::editor`].

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::resources::animationstore::{AnimationKind, Frame};

/// Slot row for one animation kind. Rows are short (a handful of frames), so
/// they live inline.
pub type SlotRow = SmallVec<[Option<Frame>; 8]>;

fn empty_row(len: usize) -> SlotRow {
    let mut row = SlotRow::new();
    row.resize(len, None);
    row
}

/// Drag-and-drop timeline editor state.
#[derive(Resource, Debug)]
pub struct TimelineEditor {
    current: AnimationKind,
    open: bool,
    slots: SlotRow,
    saved: FxHashMap<AnimationKind, SlotRow>,
    /// Kind whose slot view still needs a rebuild next tick (set when the
    /// slot count changed). Discarded if the current kind moves on first.
    pending_view_refresh: Option<AnimationKind>,
}

impl TimelineEditor {
    pub fn new(initial: AnimationKind, max_slots: usize) -> Self {
        Self {
            current: initial,
            open: false,
            slots: empty_row(max_slots),
            saved: FxHashMap::default(),
            pending_view_refresh: None,
        }
    }

    pub fn current(&self) -> AnimationKind {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn slots(&self) -> &[Option<Frame>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Frame> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Occupied slots in the row that was last saved (or is live) for `kind`.
    ///
    /// Used to re-evaluate a kind that is not currently selected, e.g. the
    /// one just switched away from.
    pub fn row_for(&self, kind: AnimationKind) -> Option<&[Option<Frame>]> {
        if kind == self.current {
            Some(&self.slots)
        } else {
            self.saved.get(&kind).map(|r| r.as_slice())
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn has_frames(&self) -> bool {
        self.slots.iter().any(|s| s.is_some())
    }

    /// Occupied frames in slot order.
    pub fn frames_in_order(&self) -> Vec<Frame> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// Put `frame` into `index`, returning whatever was there.
    ///
    /// An out-of-range index grows the row instead of failing; the caller
    /// decided the index, the editor just keeps up.
    pub fn place(&mut self, frame: Frame, index: usize) -> Option<Frame> {
        if index >= self.slots.len() {
            warn!(
                "slot {index} beyond timeline length {}, growing",
                self.slots.len()
            );
            self.slots.resize(index + 1, None);
        }
        self.slots[index].replace(frame)
    }

    /// Clear `index` and return its frame; out of range is a no-op.
    pub fn take(&mut self, index: usize) -> Option<Frame> {
        self.slots.get_mut(index).and_then(|s| s.take())
    }

    /// Save the live row for the current kind: kept when any slot is
    /// occupied, evicted when the row is empty.
    pub fn save_current(&mut self) {
        if self.has_frames() {
            debug!(
                "saved {} timeline with {} frames",
                self.current,
                self.occupied()
            );
            self.saved.insert(self.current, self.slots.clone());
        } else if self.saved.remove(&self.current).is_some() {
            debug!("evicted empty {} timeline", self.current);
        }
    }

    /// Rebuild the live row for `kind` at `max_slots`, restoring any saved
    /// contents. Frames beyond the (possibly shrunk) row length are dropped
    /// from view but survive in the saved map.
    pub fn load_for(&mut self, kind: AnimationKind, max_slots: usize) {
        let resized = self.slots.len() != max_slots;
        self.current = kind;
        self.slots = empty_row(max_slots);
        if let Some(saved) = self.saved.get(&kind) {
            for (dst, src) in self.slots.iter_mut().zip(saved.iter()) {
                *dst = src.clone();
            }
            debug!("restored {kind} timeline with {} frames", self.occupied());
        }
        if resized {
            self.pending_view_refresh = Some(kind);
        }
    }

    /// Save the current row, then load `to`. Returns the kind left behind.
    pub fn switch_to(&mut self, to: AnimationKind, max_slots: usize) -> AnimationKind {
        let left = self.current;
        self.save_current();
        self.load_for(to, max_slots);
        left
    }

    /// Claim the deferred view refresh if it still applies to the current
    /// kind; a stale request (kind changed since) is discarded.
    pub fn take_pending_refresh(&mut self) -> Option<AnimationKind> {
        let pending = self.pending_view_refresh.take()?;
        if pending == self.current {
            Some(pending)
        } else {
            debug!("discarding stale view refresh for {pending}");
            None
        }
    }
}
