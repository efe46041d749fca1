//! Edge reservation (strut) registry
//!
//! Docks and panels announce screen space ordinary windows should avoid
//! through `_NET_WM_STRUT_PARTIAL` or the older `_NET_WM_STRUT`. This module
//! turns those properties into one rectangle per client and keeps them in a
//! registry keyed by client, most recent first.
//!
//! Only one rectangle is kept per client. When several edges are reserved,
//! the last positive edge in left, right, top, bottom order wins.

use log::debug;
use std::collections::{BTreeMap, HashMap};

use crate::display::{DisplayServer, StrutAtom};
use crate::geometry::Rectangle;
use crate::window::ClientId;

/// A parsed strut property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrutProperty {
    /// `[left, right, top, bottom, left_start, left_end, right_start,
    /// right_end, top_start, top_end, bottom_start, bottom_end]`
    Partial([i64; 12]),
    /// `[left, right, top, bottom]`
    Basic([i64; 4]),
}

impl StrutProperty {
    /// Interpret raw property values. A wrong element count means
    /// "no reservation", not an error.
    pub fn parse(atom: StrutAtom, values: &[i64]) -> Option<Self> {
        match atom {
            StrutAtom::Partial => values.try_into().ok().map(StrutProperty::Partial),
            StrutAtom::Basic => values.try_into().ok().map(StrutProperty::Basic),
        }
    }

    /// Reserved rectangle against a root window of `root_width x root_height`
    pub fn rectangle(&self, (root_width, root_height): (i32, i32)) -> Rectangle {
        let mut rect = Rectangle::default();

        match *self {
            StrutProperty::Partial(v) => {
                let left = thickness(v[0], root_width);
                let right = thickness(v[1], root_width);
                let top = thickness(v[2], root_height);
                let bottom = thickness(v[3], root_height);

                // Start and end are inclusive and kept inside the root
                if left > 0 {
                    let (start, end) = (edge(v[4], root_height), edge(v[5], root_height));
                    rect = Rectangle::new(0, start, left, end - start + 1);
                }
                if right > 0 {
                    let (start, end) = (edge(v[6], root_height), edge(v[7], root_height));
                    rect = Rectangle::new(root_width - right, start, right, end - start + 1);
                }
                if top > 0 {
                    let (start, end) = (edge(v[8], root_width), edge(v[9], root_width));
                    rect = Rectangle::new(start, 0, end - start + 1, top);
                }
                if bottom > 0 {
                    let (start, end) = (edge(v[10], root_width), edge(v[11], root_width));
                    rect = Rectangle::new(start, root_height - bottom, end - start + 1, bottom);
                }
            }
            StrutProperty::Basic(v) => {
                let left = thickness(v[0], root_width);
                let right = thickness(v[1], root_width);
                let top = thickness(v[2], root_height);
                let bottom = thickness(v[3], root_height);

                if left > 0 {
                    rect = Rectangle::new(0, 0, left, root_height);
                }
                if right > 0 {
                    rect = Rectangle::new(root_width - right, 0, right, root_height);
                }
                if top > 0 {
                    rect = Rectangle::new(0, 0, root_width, top);
                }
                if bottom > 0 {
                    rect = Rectangle::new(0, root_height - bottom, root_width, bottom);
                }
            }
        }

        rect
    }
}

/// Reserved width along an axis of length `limit`
fn thickness(value: i64, limit: i32) -> i32 {
    value.clamp(0, i64::from(limit.max(0))) as i32
}

/// Pixel index on an axis of length `limit`
fn edge(value: i64, limit: i32) -> i32 {
    value.clamp(0, i64::from(limit.max(1) - 1)) as i32
}

#[derive(Debug, Clone, Copy)]
struct StrutEntry {
    sequence: u64,
    rect: Rectangle,
}

/// Registered reservations, at most one per client
#[derive(Debug, Default)]
pub struct StrutRegistry {
    entries: HashMap<ClientId, StrutEntry>,
    /// sequence -> owner; newest entries have the highest sequence
    order: BTreeMap<u64, ClientId>,
    next_sequence: u64,
}

impl StrutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the reservation of `owner` from the display server.
    ///
    /// Any existing entry for `owner` is dropped first. The partial
    /// property is preferred; the basic one is only consulted when the
    /// partial property is missing or malformed.
    pub fn read(
        &mut self,
        owner: ClientId,
        display: &mut dyn DisplayServer,
        root_size: (i32, i32),
    ) -> Option<Rectangle> {
        let property = [StrutAtom::Partial, StrutAtom::Basic]
            .into_iter()
            .find_map(|atom| {
                display
                    .read_cardinals(owner, atom)
                    .and_then(|values| StrutProperty::parse(atom, &values))
            });

        self.update(owner, property, root_size)
    }

    /// Replace the reservation of `owner` with an already parsed property.
    /// `None` leaves the client without a reservation.
    pub fn update(
        &mut self,
        owner: ClientId,
        property: Option<StrutProperty>,
        root_size: (i32, i32),
    ) -> Option<Rectangle> {
        self.remove(owner);

        let rect = property?.rectangle(root_size);
        self.insert(owner, rect);
        Some(rect)
    }

    /// Raw values form of [`StrutRegistry::update`]
    pub fn update_from_values(
        &mut self,
        owner: ClientId,
        atom: StrutAtom,
        values: &[i64],
        root_size: (i32, i32),
    ) -> Option<Rectangle> {
        self.update(owner, StrutProperty::parse(atom, values), root_size)
    }

    fn insert(&mut self, owner: ClientId, rect: Rectangle) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries.insert(owner, StrutEntry { sequence, rect });
        self.order.insert(sequence, owner);
        debug!("Client {} reserves {:?}", owner, rect);
    }

    /// Drop the reservation of `owner`. Returns whether one existed.
    pub fn remove(&mut self, owner: ClientId) -> bool {
        match self.entries.remove(&owner) {
            Some(entry) => {
                self.order.remove(&entry.sequence);
                debug!("Client {} no longer reserves {:?}", owner, entry.rect);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, owner: ClientId) -> Option<Rectangle> {
        self.entries.get(&owner).map(|entry| entry.rect)
    }

    /// Reservations, most recently registered first
    pub fn iter(&self) -> impl Iterator<Item = (ClientId, Rectangle)> + '_ {
        self.order
            .values()
            .rev()
            .filter_map(move |owner| self.entries.get(owner).map(|entry| (*owner, entry.rect)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests;
