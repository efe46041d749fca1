//! Client placement
//!
//! [`PlacementEngine`] decides where a client goes when it is mapped and
//! what geometry it gets when maximized. It owns the session state
//! (registered struts and cascade cursors) and reaches everything else
//! through the collaborators bundled in [`PlacementContext`].
//!
//! All entry points run to completion synchronously. Unknown client ids are
//! logged and ignored; nothing here returns a recoverable error.

use anyhow::{bail, Result};
use log::{debug, info, warn};

use crate::cascade::CascadeTable;
use crate::config::{BorderConfig, PlacementConfig};
use crate::display::DisplayServer;
use crate::geometry::Rectangle;
use crate::gravity::{apply_gravity, frame_origin, BorderThickness};
use crate::obstacles::{exclude_panels, exclude_struts, PanelSource};
use crate::screen::ScreenProvider;
use crate::strut::StrutRegistry;
use crate::window::{ClientId, ClientStatus, ClientStore, SizeHints, WindowLayer};

/// Collaborators a placement call reads from and writes to
pub struct PlacementContext<'a> {
    pub screens: &'a dyn ScreenProvider,
    pub panels: &'a dyn PanelSource,
    pub clients: &'a mut dyn ClientStore,
    pub display: &'a mut dyn DisplayServer,
    /// Desktop currently shown
    pub current_desktop: u32,
}

/// Session-wide placement state
#[derive(Debug)]
pub struct PlacementEngine {
    borders: BorderConfig,
    struts: StrutRegistry,
    cascade: CascadeTable,
}

impl PlacementEngine {
    /// Start a placement session for `screen_count` screens
    pub fn new(config: &PlacementConfig, screen_count: usize) -> Result<Self> {
        config.validate()?;
        if screen_count == 0 {
            bail!("Placement needs at least one screen");
        }

        let borders = config.border;
        let cascade = CascadeTable::new(
            screen_count,
            config.desktops.count as usize,
            borders.cascade_step(),
        );

        info!(
            "Placement ready: {} screen(s), {} desktop(s), cascade step {}px",
            screen_count,
            config.desktops.count,
            borders.cascade_step()
        );

        Ok(Self {
            borders,
            struts: StrutRegistry::new(),
            cascade,
        })
    }

    pub fn borders(&self) -> &BorderConfig {
        &self.borders
    }

    pub fn struts(&self) -> &StrutRegistry {
        &self.struts
    }

    pub fn cascade(&self) -> &CascadeTable {
        &self.cascade
    }

    /// Re-read the strut properties of `owner`, replacing any earlier entry
    pub fn read_strut(&mut self, ctx: &mut PlacementContext<'_>, owner: ClientId) -> Option<Rectangle> {
        let root = ctx.screens.root_size();
        self.struts.read(owner, &mut *ctx.display, root)
    }

    /// Forget the strut of a client that went away
    pub fn remove_strut(&mut self, owner: ClientId) -> bool {
        self.struts.remove(owner)
    }

    /// Screen bounds minus panels above `layer` minus registered struts
    pub fn usable_area(
        &self,
        ctx: &PlacementContext<'_>,
        screen: usize,
        layer: WindowLayer,
    ) -> Rectangle {
        let mut area = ctx.screens.screen_bounds(screen);
        exclude_panels(&mut area, layer, ctx.panels);
        exclude_struts(&mut area, &self.struts, &*ctx.clients, ctx.current_desktop);
        area
    }

    /// Position a client that is being mapped and move its frame there.
    ///
    /// Clients that were mapped before, or that carry a user or program
    /// position hint, keep their position (clamped to the pointer's screen
    /// and translated by gravity). Everyone else is cascaded.
    pub fn place_client(&mut self, ctx: &mut PlacementContext<'_>, id: ClientId, already_mapped: bool) {
        let Some(client) = ctx.clients.client(id) else {
            warn!("Cannot place unknown client {}", id);
            return;
        };

        let borders = BorderThickness::of(client, &self.borders);
        let layer = client.state.layer;
        let (width, height) = (client.width, client.height);
        let keep_position = already_mapped || client.hints.has_position_hint();

        let screen = ctx.screens.pointer_screen();
        let bounds = ctx.screens.screen_bounds(screen);

        let cascaded = if keep_position {
            None
        } else {
            let usable = self.usable_area(ctx, screen, layer);
            Some(self.cascade_position(
                usable,
                (width, height),
                borders,
                screen,
                ctx.current_desktop as usize,
            ))
        };

        let Some(client) = ctx.clients.client_mut(id) else {
            return;
        };

        match cascaded {
            Some((x, y)) => {
                client.x = x;
                client.y = y;
                debug!("Cascaded client {} to {},{}", id, x, y);
            }
            None => {
                if extends_past(client.x, client.width, bounds.x, bounds.width) {
                    client.x = bounds.x;
                }
                if extends_past(client.y, client.height, bounds.y, bounds.height) {
                    client.y = bounds.y;
                }
                apply_gravity(client, &self.borders, false);
                debug!("Kept requested position for client {}: {},{}", id, client.x, client.y);
            }
        }

        let (frame_x, frame_y) = frame_origin(client, &self.borders);
        ctx.display.move_frame(id, frame_x, frame_y);
    }

    /// Next cascade position inside `usable`, advancing the cursor
    fn cascade_position(
        &mut self,
        usable: Rectangle,
        size: (i32, i32),
        borders: BorderThickness,
        screen: usize,
        desktop: usize,
    ) -> (i32, i32) {
        let at = |offset: i32| (usable.x + borders.west + offset, usable.y + borders.north + offset);
        let overflows = |(x, y): (i32, i32)| {
            extends_past(x, size.0, usable.x, usable.width)
                || extends_past(y, size.1, usable.y, usable.height)
        };

        let position = at(self.cascade.offset(screen, desktop));
        self.cascade.advance(screen, desktop);
        if !overflows(position) {
            return position;
        }

        self.cascade.reset(screen, desktop);
        let position = at(self.cascade.offset(screen, desktop));
        if overflows(position) {
            debug!("Client does not fit the cascade, using the usable origin");
            return at(0);
        }

        self.cascade.advance(screen, desktop);
        position
    }

    /// Fill the usable area of the client's screen, honouring its size hints.
    ///
    /// The previous geometry is saved for [`PlacementEngine::restore_maximized`].
    pub fn place_maximized(&mut self, ctx: &mut PlacementContext<'_>, id: ClientId) {
        let Some(client) = ctx.clients.client(id) else {
            warn!("Cannot maximize unknown client {}", id);
            return;
        };

        let borders = BorderThickness::of(client, &self.borders);
        let screen = ctx.screens.screen_at(client.x, client.y);
        let layer = client.state.layer;
        let hints = client.hints.clone();

        let mut area = self.usable_area(ctx, screen, layer);
        area.x += borders.west;
        area.y += borders.north;
        area.width -= borders.west + borders.east;
        area.height -= borders.north + borders.south;

        let (width, height) = constrain_to_hints(area.width, area.height, &hints);

        let Some(client) = ctx.clients.client_mut(id) else {
            return;
        };
        client.saved_rect = Some(client.rect());
        client.set_rect(Rectangle::new(area.x, area.y, width, height));
        client.state.status |= ClientStatus::MAXIMIZED;

        debug!("Maximized client {} to {:?}", id, client.rect());
    }

    /// Undo [`PlacementEngine::place_maximized`]
    pub fn restore_maximized(&mut self, ctx: &mut PlacementContext<'_>, id: ClientId) {
        let Some(client) = ctx.clients.client_mut(id) else {
            warn!("Cannot restore unknown client {}", id);
            return;
        };

        client.state.status.remove(ClientStatus::MAXIMIZED);
        match client.saved_rect.take() {
            Some(rect) => {
                client.set_rect(rect);
                debug!("Restored client {} to {:?}", id, rect);
            }
            None => debug!("Client {} has no saved geometry", id),
        }
    }

    /// Send every cascade cursor back to its starting point
    pub fn reset_cascade(&mut self) {
        self.cascade.reset_all();
    }

    /// The screen layout changed. Cursors restart from the beginning and
    /// the table is reallocated if the number of screens differs.
    pub fn resize_screens(&mut self, screen_count: usize) {
        if screen_count == 0 {
            warn!("Ignoring screen change to zero screens");
            return;
        }
        if screen_count == self.cascade.screens() {
            self.reset_cascade();
            debug!("Screen layout changed, cascade reset");
        } else {
            self.cascade.resize(screen_count);
            debug!("Cascade table resized for {} screen(s)", screen_count);
        }
    }

    /// End of session: drop all struts and cascade progress
    pub fn shutdown(&mut self) {
        self.struts.clear();
        self.reset_cascade();
        info!("Placement session closed");
    }
}

/// Whether `start + size` reaches beyond `bound_start + bound_size`
fn extends_past(start: i32, size: i32, bound_start: i32, bound_size: i32) -> bool {
    i64::from(start) + i64::from(size) - i64::from(bound_start) > i64::from(bound_size)
}

/// Apply maximum size, aspect ratio and resize increments to a box
fn constrain_to_hints(mut width: i32, mut height: i32, hints: &SizeHints) -> (i32, i32) {
    width = width.min(hints.max_width);
    height = height.min(hints.max_height);

    if hints.has_aspect() && width > 0 && height > 0 {
        let (min, max) = (hints.min_aspect, hints.max_aspect);
        let (w, h) = (i64::from(width), i64::from(height));

        // width / height < min.x / min.y
        if min.is_valid() && w * i64::from(min.y) < i64::from(min.x) * h {
            height = (w * i64::from(min.y) / i64::from(min.x)) as i32;
        }

        let h = i64::from(height);
        // width / height > max.x / max.y
        if max.is_valid() && w * i64::from(max.y) > i64::from(max.x) * h {
            width = (h * i64::from(max.x) / i64::from(max.y)) as i32;
        }
    }

    (snap(width, hints.width_inc), snap(height, hints.height_inc))
}

/// Round down to a multiple of `increment`
fn snap(value: i32, increment: i32) -> i32 {
    if increment > 1 {
        value - value % increment
    } else {
        value
    }
}
