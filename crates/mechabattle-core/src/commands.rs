//! Player commands sent from the presentation layer to the engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::PartSlot;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Action choice ---
    /// Attack with the part in `slot`.
    SelectPart { slot: PartSlot },
    /// Skip this turn.
    Skip,
    /// Move the action cursor by `delta` entries (wraps around).
    MoveCursor { delta: i32 },
    /// Commit the action under the cursor, or advance the log.
    Confirm,
    /// Return the cursor to the first action.
    Cancel,
    /// Put the cursor on menu entry `index` (ignored when out of range).
    PointAt { index: usize },

    // --- Log ---
    /// Reveal the next pending log line.
    AdvanceLog,
}

/// Logical input for one frame, already translated from devices.
///
/// Each flag is true only for the frame the input occurred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalInput {
    pub confirm: bool,
    pub cancel: bool,
    pub menu: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in presentation coordinates.
    #[serde(default)]
    pub pointer: Option<(i32, i32)>,
    #[serde(default)]
    pub click: bool,
}

impl LogicalInput {
    /// Translate this frame's input into engine commands.
    ///
    /// `menu` opens presentation-side screens and produces no command.
    /// Without a menu layout a click only advances the log.
    pub fn commands(&self) -> Vec<PlayerCommand> {
        self.commands_with_menu(|_, _| None)
    }

    /// Like [`commands`](Self::commands), with `entry_at` mapping a pointer
    /// position to the action menu entry under it.
    ///
    /// Hovering an entry moves the cursor there; clicking it also confirms.
    pub fn commands_with_menu(
        &self,
        entry_at: impl Fn(i32, i32) -> Option<usize>,
    ) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        let entry = self.pointer.and_then(|(x, y)| entry_at(x, y));
        if let Some(index) = entry {
            commands.push(PlayerCommand::PointAt { index });
        }
        if self.up || self.left {
            commands.push(PlayerCommand::MoveCursor { delta: -1 });
        }
        if self.down || self.right {
            commands.push(PlayerCommand::MoveCursor { delta: 1 });
        }
        if self.cancel {
            commands.push(PlayerCommand::Cancel);
        }
        if self.confirm || (self.click && entry.is_some()) {
            commands.push(PlayerCommand::Confirm);
        } else if self.click {
            commands.push(PlayerCommand::AdvanceLog);
        }
        commands
    }
}
