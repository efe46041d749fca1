//! Scenario replay
//!
//! A [`Scenario`] describes a screen layout, panels, a set of clients and a
//! sequence of window-manager events in TOML. [`Session`] wires the
//! in-memory collaborators to a [`PlacementEngine`], replays the events and
//! reports where every client ended up.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::PlacementConfig;
use crate::display::{DisplayServer, FrameMove, RecordingDisplay, StrutAtom};
use crate::geometry::Rectangle;
use crate::gravity::{frame_origin, set_border_style};
use crate::obstacles::Panel;
use crate::placement::{PlacementContext, PlacementEngine};
use crate::screen::{ScreenProvider, StaticScreens};
use crate::window::{
    BorderStyle, Client, ClientId, ClientStatus, ClientTable, SizeHints, WindowLayer,
};

/// Replayable description of a placement session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Physical screens; the root window is their bounding box
    pub screens: Vec<Rectangle>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub clients: Vec<ClientSpec>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Initial state of one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSpec {
    pub id: ClientId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub desktop: u32,
    #[serde(default)]
    pub layer: WindowLayer,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default = "ClientSpec::default_decorated")]
    pub decorated: bool,
    #[serde(default)]
    pub hints: SizeHints,
    /// `_NET_WM_STRUT` values, if the client sets it
    #[serde(default)]
    pub strut: Option<Vec<i64>>,
    /// `_NET_WM_STRUT_PARTIAL` values, if the client sets it
    #[serde(default)]
    pub strut_partial: Option<Vec<i64>>,
}

impl ClientSpec {
    fn default_decorated() -> bool {
        true
    }

    fn to_client(&self) -> Client {
        let mut client = Client::new(
            self.id,
            Rectangle::new(self.x, self.y, self.width, self.height),
        );
        client.hints = self.hints.clone();
        client.state.desktop = self.desktop;
        client.state.layer = self.layer;
        if !self.decorated {
            client.state.border = BorderStyle::empty();
        }
        if self.sticky {
            client.state.status |= ClientStatus::STICKY;
        }
        client
    }
}

/// Window manager events, replayed in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    /// First map of a client
    Map { client: ClientId },
    /// Map of a client that was mapped before
    Remap { client: ClientId },
    Maximize { client: ClientId },
    Restore { client: ClientId },
    /// The client's strut properties changed
    ReadStrut { client: ClientId },
    /// The client was destroyed
    Remove { client: ClientId },
    SetDesktop { desktop: u32 },
    SetPointer { x: i32, y: i32 },
    /// Switch between fully decorated and undecorated
    ToggleBorder { client: ClientId },
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse scenario file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.screens.is_empty() {
            bail!("Scenario declares no screens");
        }

        let mut ids: Vec<ClientId> = self.clients.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("Client {} is declared twice", pair[0]);
        }

        if let Some(c) = self.clients.iter().find(|c| c.width <= 0 || c.height <= 0) {
            bail!("Client {} has an empty size {}x{}", c.id, c.width, c.height);
        }

        Ok(())
    }
}

/// Final geometry of one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientReport {
    pub id: ClientId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub desktop: u32,
    pub maximized: bool,
}

/// A registered strut at the end of the replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrutReport {
    pub owner: ClientId,
    pub area: Rectangle,
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub desktop: u32,
    pub clients: Vec<ClientReport>,
    pub struts: Vec<StrutReport>,
    /// Usable area of each screen for normal windows on the final desktop
    pub usable: Vec<Rectangle>,
    pub moves: Vec<FrameMove>,
}

/// In-memory placement session
pub struct Session {
    screens: StaticScreens,
    panels: Vec<Panel>,
    clients: ClientTable,
    display: RecordingDisplay,
    engine: PlacementEngine,
    desktop: u32,
    desktop_count: u32,
}

macro_rules! context {
    ($session:ident) => {
        PlacementContext {
            screens: &$session.screens,
            panels: &$session.panels,
            clients: &mut $session.clients,
            display: &mut $session.display,
            current_desktop: $session.desktop,
        }
    };
}

impl Session {
    pub fn new(config: &PlacementConfig, scenario: &Scenario) -> Result<Self> {
        scenario.validate()?;

        let screens = StaticScreens::new(scenario.screens.clone())?;
        let engine = PlacementEngine::new(config, screens.screen_count())?;

        let mut clients = ClientTable::new();
        let mut display = RecordingDisplay::new();
        for spec in &scenario.clients {
            clients.add_client(spec.to_client());
            if let Some(values) = &spec.strut {
                display.set_property(spec.id, StrutAtom::Basic, values.clone());
            }
            if let Some(values) = &spec.strut_partial {
                display.set_property(spec.id, StrutAtom::Partial, values.clone());
            }
        }

        info!(
            "Session with {} screen(s), {} panel(s), {} client(s)",
            screens.screen_count(),
            scenario.panels.len(),
            clients.len()
        );

        Ok(Self {
            screens,
            panels: scenario.panels.clone(),
            clients,
            display,
            engine,
            desktop: config.desktops.initial,
            desktop_count: config.desktops.count,
        })
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn clients(&self) -> &ClientTable {
        &self.clients
    }

    pub fn display(&self) -> &RecordingDisplay {
        &self.display
    }

    pub fn desktop(&self) -> u32 {
        self.desktop
    }

    /// Apply one event
    pub fn apply(&mut self, event: &Event) -> Result<()> {
        debug!("Event: {:?}", event);

        match *event {
            Event::Map { client } => {
                let already_mapped = self.clients.get_client(client).is_some_and(Client::is_mapped);
                self.engine
                    .place_client(&mut context!(self), client, already_mapped);
                if let Some(c) = self.clients.get_client_mut(client) {
                    c.state.status |= ClientStatus::MAPPED;
                }
            }
            Event::Remap { client } => {
                self.engine.place_client(&mut context!(self), client, true);
            }
            Event::Maximize { client } => {
                self.engine.place_maximized(&mut context!(self), client);
                self.move_frame(client);
            }
            Event::Restore { client } => {
                self.engine.restore_maximized(&mut context!(self), client);
                self.move_frame(client);
            }
            Event::ReadStrut { client } => {
                if self.engine.read_strut(&mut context!(self), client).is_none() {
                    debug!("Client {} reserves no space", client);
                }
            }
            Event::Remove { client } => {
                self.engine.remove_strut(client);
                if self.clients.remove_client(client).is_none() {
                    warn!("Removed client {} was not known", client);
                }
            }
            Event::SetDesktop { desktop } => {
                if desktop >= self.desktop_count {
                    bail!(
                        "Desktop {} out of range ({} desktops)",
                        desktop,
                        self.desktop_count
                    );
                }
                self.desktop = desktop;
            }
            Event::SetPointer { x, y } => self.screens.set_pointer(x, y),
            Event::ToggleBorder { client } => {
                let metrics = *self.engine.borders();
                let Some(c) = self.clients.get_client_mut(client) else {
                    warn!("Cannot change decoration of unknown client {}", client);
                    return Ok(());
                };
                let style = if c.state.border.is_empty() {
                    BorderStyle::default()
                } else {
                    BorderStyle::empty()
                };
                set_border_style(c, style, &metrics);
                self.move_frame(client);
            }
        }

        Ok(())
    }

    /// Replay every event of `scenario` and report the result
    pub fn run(&mut self, scenario: &Scenario) -> Result<Report> {
        for (index, event) in scenario.events.iter().enumerate() {
            self.apply(event)
                .with_context(|| format!("Event {} ({:?}) failed", index + 1, event))?;
        }
        Ok(self.report())
    }

    pub fn report(&mut self) -> Report {
        let clients = self
            .clients
            .clients()
            .into_iter()
            .map(|c| ClientReport {
                id: c.id,
                x: c.x,
                y: c.y,
                width: c.width,
                height: c.height,
                desktop: c.state.desktop,
                maximized: c.is_maximized(),
            })
            .collect();

        let struts = self
            .engine
            .struts()
            .iter()
            .map(|(owner, area)| StrutReport { owner, area })
            .collect();

        let usable = (0..self.screens.screen_count())
            .map(|screen| {
                self.engine
                    .usable_area(&context!(self), screen, WindowLayer::Normal)
            })
            .collect();

        Report {
            desktop: self.desktop,
            clients,
            struts,
            usable,
            moves: self.display.moves().to_vec(),
        }
    }

    fn move_frame(&mut self, client: ClientId) {
        if let Some(c) = self.clients.get_client(client) {
            let (x, y) = frame_origin(c, self.engine.borders());
            self.display.move_frame(client, x, y);
        }
    }

    /// End the session, dropping engine state
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}
