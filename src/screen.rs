//! Screen layout seam
//!
//! Physical screens (Xinerama heads) as placement sees them: an index, a
//! rectangle in root coordinates, and lookups by point or by pointer.

use anyhow::{bail, Result};
use log::{debug, warn};

use crate::geometry::Rectangle;

/// Source of screen geometry
pub trait ScreenProvider {
    fn screen_count(&self) -> usize;

    /// Bounds of screen `index` in root coordinates
    fn screen_bounds(&self, index: usize) -> Rectangle;

    /// Screen containing the point, or screen 0 if none does
    fn screen_at(&self, x: i32, y: i32) -> usize;

    /// Screen currently containing the pointer
    fn pointer_screen(&self) -> usize;

    /// Root window dimensions
    fn root_size(&self) -> (i32, i32);
}

/// Fixed screen layout with a movable pointer
#[derive(Debug, Clone)]
pub struct StaticScreens {
    screens: Vec<Rectangle>,
    pointer: (i32, i32),
}

impl StaticScreens {
    pub fn new(screens: Vec<Rectangle>) -> Result<Self> {
        if screens.is_empty() {
            bail!("At least one screen is required");
        }
        if let Some(bad) = screens.iter().find(|s| !s.is_usable()) {
            bail!("Screen {:?} has no area", bad);
        }

        debug!("Screen layout: {:?}", screens);
        Ok(Self {
            screens,
            pointer: (0, 0),
        })
    }

    /// Single screen covering the whole root window
    pub fn single(width: i32, height: i32) -> Result<Self> {
        Self::new(vec![Rectangle::new(0, 0, width, height)])
    }

    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }
}

impl ScreenProvider for StaticScreens {
    fn screen_count(&self) -> usize {
        self.screens.len()
    }

    fn screen_bounds(&self, index: usize) -> Rectangle {
        match self.screens.get(index) {
            Some(bounds) => *bounds,
            None => {
                warn!("Screen {} does not exist, using screen 0", index);
                self.screens[0]
            }
        }
    }

    fn screen_at(&self, x: i32, y: i32) -> usize {
        self.screens
            .iter()
            .position(|s| s.contains_point(x, y))
            .unwrap_or(0)
    }

    fn pointer_screen(&self) -> usize {
        self.screen_at(self.pointer.0, self.pointer.1)
    }

    fn root_size(&self) -> (i32, i32) {
        let width = self.screens.iter().map(|s| s.right()).max().unwrap_or(0);
        let height = self.screens.iter().map(|s| s.bottom()).max().unwrap_or(0);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_head() -> StaticScreens {
        StaticScreens::new(vec![
            Rectangle::new(0, 0, 1920, 1080),
            Rectangle::new(1920, 0, 1280, 1024),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert!(StaticScreens::new(Vec::new()).is_err());
        assert!(StaticScreens::new(vec![Rectangle::new(0, 0, 0, 100)]).is_err());
    }

    #[test]
    fn test_screen_lookup_by_point() {
        let screens = dual_head();
        assert_eq!(screens.screen_count(), 2);
        assert_eq!(screens.screen_at(10, 10), 0);
        assert_eq!(screens.screen_at(1920, 500), 1);
        // Outside every screen falls back to the first one
        assert_eq!(screens.screen_at(5000, 5000), 0);
    }

    #[test]
    fn test_pointer_screen_follows_pointer() {
        let mut screens = dual_head();
        assert_eq!(screens.pointer_screen(), 0);
        screens.set_pointer(2500, 100);
        assert_eq!(screens.pointer_screen(), 1);
    }

    #[test]
    fn test_root_size_spans_all_screens() {
        assert_eq!(dual_head().root_size(), (3200, 1080));
        assert_eq!(StaticScreens::single(1024, 768).unwrap().root_size(), (1024, 768));
    }

    #[test]
    fn test_out_of_range_bounds_fall_back() {
        let screens = dual_head();
        assert_eq!(screens.screen_bounds(7), Rectangle::new(0, 0, 1920, 1080));
    }
}
