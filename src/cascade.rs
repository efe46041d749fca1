//! Cascade cursors
//!
//! One pixel offset per (screen, desktop) pair. Each cascaded placement
//! lands at the cursor and then moves it diagonally by one step; an
//! overflowing placement sends the cursor back to its starting value.

use log::debug;

/// Per (screen, desktop) cascade offsets
#[derive(Debug, Clone)]
pub struct CascadeTable {
    offsets: Vec<i32>,
    screens: usize,
    desktops: usize,
    step: i32,
}

impl CascadeTable {
    /// Every cursor starts at `step`, the same distance it advances by
    pub fn new(screens: usize, desktops: usize, step: i32) -> Self {
        Self {
            offsets: vec![step; screens * desktops],
            screens,
            desktops,
            step,
        }
    }

    fn index(&self, screen: usize, desktop: usize) -> Option<usize> {
        (screen < self.screens && desktop < self.desktops).then_some(screen * self.desktops + desktop)
    }

    /// Current cursor. Out-of-range pairs read as the initial value.
    pub fn offset(&self, screen: usize, desktop: usize) -> i32 {
        self.index(screen, desktop)
            .and_then(|i| self.offsets.get(i).copied())
            .unwrap_or(self.step)
    }

    /// Move the cursor one step further
    pub fn advance(&mut self, screen: usize, desktop: usize) {
        if let Some(i) = self.index(screen, desktop) {
            self.offsets[i] += self.step;
        }
    }

    /// Put the cursor back to its initial value
    pub fn reset(&mut self, screen: usize, desktop: usize) {
        if let Some(i) = self.index(screen, desktop) {
            self.offsets[i] = self.step;
            debug!("Cascade for screen {} desktop {} reset", screen, desktop);
        }
    }

    pub fn reset_all(&mut self) {
        self.offsets.fill(self.step);
    }

    /// Reallocate for a new screen count, dropping every cursor
    pub fn resize(&mut self, screens: usize) {
        self.screens = screens;
        self.offsets = vec![self.step; screens * self.desktops];
    }

    pub fn screens(&self) -> usize {
        self.screens
    }

    pub fn desktops(&self) -> usize {
        self.desktops
    }
}
