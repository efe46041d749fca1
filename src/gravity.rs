//! Decorated / undecorated frame translation
//!
//! A client's stored position is the position of its own window. The frame
//! around it adds an outline on every side and a title bar on top. Window
//! gravity says which reference point of the window must stay put when that
//! decoration appears or disappears.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::BorderConfig;
use crate::window::{BorderStyle, Client};

/// ICCCM window gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gravity {
    Forget,
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
    Static,
}

impl Gravity {
    /// Decode the `win_gravity` field of WM_NORMAL_HINTS.
    /// Anything outside the protocol range is treated like static gravity.
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => Gravity::Forget,
            1 => Gravity::NorthWest,
            2 => Gravity::North,
            3 => Gravity::NorthEast,
            4 => Gravity::West,
            5 => Gravity::Center,
            6 => Gravity::East,
            7 => Gravity::SouthWest,
            8 => Gravity::South,
            9 => Gravity::SouthEast,
            _ => Gravity::Static,
        }
    }

    /// How far the reference point moves between the decorated and the
    /// undecorated frame. Static and forget gravity never move.
    pub fn delta(self, borders: BorderThickness) -> (i32, i32) {
        let BorderThickness {
            north,
            south,
            east,
            west,
        } = borders;

        match self {
            Gravity::NorthWest => (-west, -north),
            Gravity::North => (0, -north),
            Gravity::NorthEast => (west, -north),
            Gravity::West => (-west, 0),
            Gravity::Center => ((east + west) / 2, (north + south) / 2),
            Gravity::East => (west, 0),
            Gravity::SouthWest => (-west, south),
            Gravity::South => (0, south),
            Gravity::SouthEast => (west, south),
            Gravity::Static | Gravity::Forget => (0, 0),
        }
    }
}

/// Decoration thickness on each side of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderThickness {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl BorderThickness {
    /// Thickness for a decoration style: the outline on every side, plus
    /// the title bar on the north side.
    pub fn for_style(style: BorderStyle, metrics: &BorderConfig) -> Self {
        let mut thickness = BorderThickness::default();
        if style.contains(BorderStyle::OUTLINE) {
            thickness = BorderThickness {
                north: metrics.border_width,
                south: metrics.border_width,
                east: metrics.border_width,
                west: metrics.border_width,
            };
        }
        if style.contains(BorderStyle::TITLE) {
            thickness.north += metrics.title_height;
        }
        thickness
    }

    pub fn of(client: &Client, metrics: &BorderConfig) -> Self {
        Self::for_style(client.state.border, metrics)
    }
}

/// Shift the client's stored position by its gravity delta.
/// `negate` undoes a previous application exactly.
pub fn apply_gravity(client: &mut Client, metrics: &BorderConfig, negate: bool) {
    let borders = BorderThickness::of(client, metrics);
    let (dx, dy) = client.hints.gravity.delta(borders);

    if negate {
        client.x = client.x.saturating_sub(dx);
        client.y = client.y.saturating_sub(dy);
    } else {
        client.x = client.x.saturating_add(dx);
        client.y = client.y.saturating_add(dy);
    }
}

/// Change a client's decoration without moving its anchored reference point
pub fn set_border_style(client: &mut Client, style: BorderStyle, metrics: &BorderConfig) {
    if client.state.border == style {
        return;
    }

    apply_gravity(client, metrics, true);
    client.state.border = style;
    apply_gravity(client, metrics, false);

    debug!(
        "Client {} decoration now {:?}, position {},{}",
        client.id, style, client.x, client.y
    );
}

/// Origin of the decorated frame for the client's current position
pub fn frame_origin(client: &Client, metrics: &BorderConfig) -> (i32, i32) {
    let borders = BorderThickness::of(client, metrics);
    (
        client.x.saturating_sub(borders.west),
        client.y.saturating_sub(borders.north),
    )
}
