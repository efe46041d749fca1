//! Client state
//!
//! This module holds the per-client data placement reads and writes:
//! geometry, ICCCM size hints, decoration style, stacking layer and
//! desktop membership. The placement engine never owns clients; it reaches
//! them through [`ClientStore`], which [`ClientTable`] implements for the
//! in-process case.

use bitflags::bitflags;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Rectangle;
use crate::gravity::Gravity;

/// Identity of a managed client (the client window's XID)
pub type ClientId = u64;

/// Largest dimension the X protocol can express
pub const MAX_DIMENSION: i32 = 32767;

bitflags! {
    /// Which decoration parts the frame draws around a client
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BorderStyle: u8 {
        const OUTLINE = 1 << 0;
        const TITLE   = 1 << 1;
    }
}

bitflags! {
    /// WM_NORMAL_HINTS flags (ICCCM 4.1.2.3)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SizeHintFlags: u32 {
        const USER_POSITION    = 1 << 0;
        const USER_SIZE        = 1 << 1;
        const PROGRAM_POSITION = 1 << 2;
        const PROGRAM_SIZE     = 1 << 3;
        const MIN_SIZE         = 1 << 4;
        const MAX_SIZE         = 1 << 5;
        const RESIZE_INC       = 1 << 6;
        const ASPECT           = 1 << 7;
        const BASE_SIZE        = 1 << 8;
        const WIN_GRAVITY      = 1 << 9;
    }
}

bitflags! {
    /// Window manager side status bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ClientStatus: u16 {
        const MAPPED    = 1 << 0;
        const STICKY    = 1 << 1;
        const MAXIMIZED = 1 << 2;
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::OUTLINE | BorderStyle::TITLE
    }
}

impl Default for SizeHintFlags {
    fn default() -> Self {
        SizeHintFlags::empty()
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::empty()
    }
}

/// Stacking layers, bottom to top
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WindowLayer {
    Desktop = 0,
    Below = 1,
    #[default]
    Normal = 2,
    Above = 3,
    Dock = 4,
    Overlay = 5,
}

/// Aspect ratio expressed as a `x:y` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspect {
    pub x: i32,
    pub y: i32,
}

impl Aspect {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A ratio with a non-positive term cannot constrain anything
    pub fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0
    }
}

/// Size hints as announced by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeHints {
    pub flags: SizeHintFlags,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub width_inc: i32,
    pub height_inc: i32,
    pub min_aspect: Aspect,
    pub max_aspect: Aspect,
    pub gravity: Gravity,
}

impl Default for SizeHints {
    fn default() -> Self {
        Self {
            flags: SizeHintFlags::empty(),
            min_width: 1,
            min_height: 1,
            max_width: MAX_DIMENSION,
            max_height: MAX_DIMENSION,
            width_inc: 1,
            height_inc: 1,
            min_aspect: Aspect::new(1, 1),
            max_aspect: Aspect::new(1, 1),
            gravity: Gravity::NorthWest,
        }
    }
}

impl SizeHints {
    /// Whether the client or the user asked for a specific position
    pub fn has_position_hint(&self) -> bool {
        self.flags
            .intersects(SizeHintFlags::USER_POSITION | SizeHintFlags::PROGRAM_POSITION)
    }

    pub fn has_aspect(&self) -> bool {
        self.flags.contains(SizeHintFlags::ASPECT)
    }
}

/// Window manager state attached to a client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientState {
    pub desktop: u32,
    pub layer: WindowLayer,
    pub border: BorderStyle,
    pub status: ClientStatus,
}

/// A managed top-level window
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,

    /// Position of the undecorated client window
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,

    pub hints: SizeHints,
    pub state: ClientState,

    /// Geometry to go back to when leaving the maximized state
    pub saved_rect: Option<Rectangle>,
}

impl Client {
    pub fn new(id: ClientId, rect: Rectangle) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            hints: SizeHints::default(),
            state: ClientState::default(),
            saved_rect: None,
        }
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rectangle) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn is_sticky(&self) -> bool {
        self.state.status.contains(ClientStatus::STICKY)
    }

    pub fn is_maximized(&self) -> bool {
        self.state.status.contains(ClientStatus::MAXIMIZED)
    }

    pub fn is_mapped(&self) -> bool {
        self.state.status.contains(ClientStatus::MAPPED)
    }
}

/// Access to client state owned elsewhere
pub trait ClientStore {
    fn client(&self, id: ClientId) -> Option<&Client>;
    fn client_mut(&mut self, id: ClientId) -> Option<&mut Client>;
}

/// In-process client table
#[derive(Debug, Default)]
pub struct ClientTable {
    clients: HashMap<ClientId, Client>,
}

impl ClientTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start managing a client. An existing entry with the same id is replaced.
    pub fn add_client(&mut self, client: Client) {
        debug!(
            "Managing client {} at {}x{}+{}+{}",
            client.id, client.width, client.height, client.x, client.y
        );
        self.clients.insert(client.id, client);
    }

    pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
        let removed = self.clients.remove(&id);
        if removed.is_some() {
            debug!("Released client {}", id);
        }
        removed
    }

    pub fn get_client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn get_client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// All clients, ordered by id so reports are stable
    pub fn clients(&self) -> Vec<&Client> {
        let mut all: Vec<&Client> = self.clients.values().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientStore for ClientTable {
    fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }
}
