//! Timeline editor commands.
//!
//! The drag-and-drop UI is an external collaborator; it reports what the
//! player did as [`EditorCmd`] messages, and
//! [`crate::systems::editor::process_editor_cmds`] applies them. Commands
//! carry the drag *origin* rather than the frame itself, so ownership moves
//! are explicit and no frame is ever duplicated.

use bevy_ecs::message::Message;

use crate::resources::animationstore::AnimationKind;

/// Where a dragged frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Index into the inventory list at the moment of the drop.
    Inventory(usize),
    /// A timeline slot of the currently edited kind.
    Slot(usize),
}

/// One player action in the timeline editor.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCmd {
    /// Open/close the editor panel.
    Toggle,
    /// Switch the edited animation kind (dropdown change).
    SelectKind(AnimationKind),
    /// Drop a dragged frame onto a timeline slot.
    DropOnSlot { source: DragSource, slot: usize },
    /// Drop a dragged frame back onto the inventory strip.
    DropOnInventory { source: DragSource },
    /// Clear a slot (right-click), returning its frame to the inventory.
    RemoveFromSlot { slot: usize },
}
