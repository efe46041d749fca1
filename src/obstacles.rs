//! Obstacle exclusion
//!
//! Narrows a screen rectangle down to the area new windows may use by
//! subtracting panels (trays) and registered struts one at a time. As soon
//! as one obstacle would leave nothing usable, that subtraction is undone
//! and the remaining obstacles are ignored for this call.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;
use crate::strut::StrutRegistry;
use crate::window::{ClientStore, WindowLayer};

/// A tray or panel window managed outside the client list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default = "Panel::default_layer")]
    pub layer: WindowLayer,
}

impl Panel {
    fn default_layer() -> WindowLayer {
        WindowLayer::Dock
    }

    pub fn new(rect: Rectangle, layer: WindowLayer) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            layer,
        }
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}

/// Panels in registration order
pub trait PanelSource {
    fn panels(&self) -> &[Panel];
}

impl PanelSource for Vec<Panel> {
    fn panels(&self) -> &[Panel] {
        self
    }
}

/// Subtract one obstacle, undoing it if nothing usable would remain.
/// Returns `false` when the caller should stop processing obstacles.
fn subtract_or_revert(area: &mut Rectangle, obstacle: &Rectangle) -> bool {
    let last = *area;
    area.subtract(obstacle);
    if area.is_usable() {
        true
    } else {
        debug!(
            "Obstacle {:?} would leave {:?}, keeping {:?}",
            obstacle, area, last
        );
        *area = last;
        false
    }
}

/// Remove panels stacked strictly above `layer` from `area`
pub fn exclude_panels(area: &mut Rectangle, layer: WindowLayer, panels: &dyn PanelSource) {
    for panel in panels.panels() {
        if panel.layer <= layer {
            continue;
        }
        if !subtract_or_revert(area, &panel.rect()) {
            break;
        }
    }
}

/// Remove registered struts from `area`.
///
/// A strut is skipped when its owner is on `current_desktop` or sticky.
/// Owners the client store no longer knows about are not skipped.
pub fn exclude_struts(
    area: &mut Rectangle,
    struts: &StrutRegistry,
    clients: &dyn ClientStore,
    current_desktop: u32,
) {
    for (owner, rect) in struts.iter() {
        let skip = clients
            .client(owner)
            .is_some_and(|c| c.state.desktop == current_desktop || c.is_sticky());
        if skip {
            continue;
        }
        if !subtract_or_revert(area, &rect) {
            break;
        }
    }
}
