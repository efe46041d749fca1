//! # Axiom Place
//!
//! Client placement for a stacking X11 window manager: where a newly mapped
//! window goes, how much of each screen panels and docks leave usable, and
//! what geometry a maximized window gets.
//!
//! ## Architecture
//!
//! - `geometry`: Rectangles and obstacle subtraction
//! - `strut`: Edge reservations read from `_NET_WM_STRUT(_PARTIAL)`
//! - `obstacles`: Panels and struts removed from a screen's usable area
//! - `cascade`: Per screen and desktop cascade cursors
//! - `placement`: The placement engine tying everything together
//! - `gravity`: Window gravity and decoration offsets
//! - `window`: Client state and size hints
//! - `screen` / `display`: Seams to the screen layout and the X server
//! - `config`: Configuration parsing and management
//! - `scenario`: TOML-driven replay of placement sessions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use axiom_place::{PlacementConfig, Scenario, Session};
//!
//! fn main() -> anyhow::Result<()> {
//!     let scenario = Scenario::load("session.toml")?;
//!     let mut session = Session::new(&PlacementConfig::default(), &scenario)?;
//!     let report = session.run(&scenario)?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod cascade;
pub mod config;
pub mod display;
pub mod geometry;
pub mod gravity;
pub mod obstacles;
pub mod placement;
pub mod scenario;
pub mod screen;
pub mod strut;
pub mod window;

// Re-export main types for easy access
pub use config::PlacementConfig;
pub use geometry::Rectangle;
pub use placement::{PlacementContext, PlacementEngine};
pub use scenario::{Report, Scenario, Session};
pub use strut::StrutRegistry;
pub use window::{Client, ClientId, ClientTable};

// Re-export common error types
pub use anyhow::{Context, Error, Result};

/// Version information for Axiom Place
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
