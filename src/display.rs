//! Display server seam
//!
//! Placement needs two things from the X server: a synchronous read of a
//! client's strut properties and a request to move a frame window. Both go
//! through [`DisplayServer`] so the engine can run against a live connection
//! or against [`RecordingDisplay`] in tests and scenario replays.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::window::ClientId;

/// Window properties carrying edge reservations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrutAtom {
    /// `_NET_WM_STRUT_PARTIAL`, twelve CARDINALs
    Partial,
    /// `_NET_WM_STRUT`, four CARDINALs
    Basic,
}

impl StrutAtom {
    pub fn name(self) -> &'static str {
        match self {
            StrutAtom::Partial => "_NET_WM_STRUT_PARTIAL",
            StrutAtom::Basic => "_NET_WM_STRUT",
        }
    }

    /// Number of values a well-formed property carries
    pub fn length(self) -> usize {
        match self {
            StrutAtom::Partial => 12,
            StrutAtom::Basic => 4,
        }
    }
}

/// A frame move request issued to the display server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMove {
    pub client: ClientId,
    pub x: i32,
    pub y: i32,
}

/// Requests placement makes against the windowing system
pub trait DisplayServer {
    /// Read a CARDINAL array property of a client window.
    /// Blocks for the round trip; `None` means the property is not set.
    fn read_cardinals(&mut self, window: ClientId, atom: StrutAtom) -> Option<Vec<i64>>;

    /// Move the frame window that wraps `window` to a root position
    fn move_frame(&mut self, window: ClientId, x: i32, y: i32);
}

/// In-memory display: serves canned properties and records frame moves
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    properties: HashMap<(ClientId, StrutAtom), Vec<i64>>,
    moves: Vec<FrameMove>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&mut self, window: ClientId, atom: StrutAtom, values: Vec<i64>) {
        self.properties.insert((window, atom), values);
    }

    pub fn delete_property(&mut self, window: ClientId, atom: StrutAtom) {
        self.properties.remove(&(window, atom));
    }

    /// Every frame move in the order it was requested
    pub fn moves(&self) -> &[FrameMove] {
        &self.moves
    }

    pub fn last_move(&self, window: ClientId) -> Option<FrameMove> {
        self.moves.iter().rev().find(|m| m.client == window).copied()
    }
}

impl DisplayServer for RecordingDisplay {
    fn read_cardinals(&mut self, window: ClientId, atom: StrutAtom) -> Option<Vec<i64>> {
        let values = self.properties.get(&(window, atom)).cloned();
        trace!(
            "Read {} on {}: {}",
            atom.name(),
            window,
            values.as_ref().map_or(0, |v| v.len())
        );
        values
    }

    fn move_frame(&mut self, window: ClientId, x: i32, y: i32) {
        self.moves.push(FrameMove {
            client: window,
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_metadata() {
        assert_eq!(StrutAtom::Partial.length(), 12);
        assert_eq!(StrutAtom::Basic.length(), 4);
        assert_eq!(StrutAtom::Basic.name(), "_NET_WM_STRUT");
    }

    #[test]
    fn test_recording_display_properties() {
        let mut display = RecordingDisplay::new();
        assert!(display.read_cardinals(1, StrutAtom::Basic).is_none());

        display.set_property(1, StrutAtom::Basic, vec![0, 0, 30, 0]);
        assert_eq!(display.read_cardinals(1, StrutAtom::Basic), Some(vec![0, 0, 30, 0]));
        assert!(display.read_cardinals(1, StrutAtom::Partial).is_none());

        display.delete_property(1, StrutAtom::Basic);
        assert!(display.read_cardinals(1, StrutAtom::Basic).is_none());
    }

    #[test]
    fn test_recording_display_moves() {
        let mut display = RecordingDisplay::new();
        display.move_frame(1, 10, 20);
        display.move_frame(2, 0, 0);
        display.move_frame(1, 30, 40);

        assert_eq!(display.moves().len(), 3);
        assert_eq!(
            display.last_move(1),
            Some(FrameMove {
                client: 1,
                x: 30,
                y: 40
            })
        );
        assert!(display.last_move(3).is_none());
    }
}
