//! Rectangle arithmetic used by placement
//!
//! Everything here works in root-window pixel space. Width and height are
//! signed on purpose: obstacle subtraction can produce degenerate boxes and
//! callers need to see the negative area to decide how to recover.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column to the right of the rectangle, saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// First row below the rectangle, saturating at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// `width * height`, widened so large screens cannot overflow.
    /// Negative when exactly one dimension is negative.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Whether the rectangle still has room for anything
    pub fn is_usable(&self) -> bool {
        self.area() > 0
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        other.right() > self.x
            && other.bottom() > self.y
            && self.right() > other.x
            && self.bottom() > other.y
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink `self` so it no longer intersects `obstacle`.
    ///
    /// Four candidates are considered: move the left edge past the
    /// obstacle, move the top edge past it, cut the width at the
    /// obstacle's left edge, or cut the height at its top edge. The one
    /// with the largest area wins; the comparison runs (1 vs 2), (3 vs 4),
    /// then the two winners, and exact ties keep the earlier candidate so
    /// horizontal shrinking is preferred.
    ///
    /// The result may have a non-positive area. This method never rejects
    /// or reverts; that decision belongs to the caller.
    pub fn subtract(&mut self, obstacle: &Rectangle) {
        if !self.overlaps(obstacle) {
            return;
        }

        let clip_left = Rectangle {
            x: obstacle.right(),
            width: distance(obstacle.right(), self.right()),
            ..*self
        };
        let clip_top = Rectangle {
            y: obstacle.bottom(),
            height: distance(obstacle.bottom(), self.bottom()),
            ..*self
        };
        let cut_width = Rectangle {
            width: distance(self.x, obstacle.x),
            ..*self
        };
        let cut_height = Rectangle {
            height: distance(self.y, obstacle.y),
            ..*self
        };

        let leading = if clip_left.area() < clip_top.area() {
            clip_top
        } else {
            clip_left
        };
        let trailing = if cut_width.area() < cut_height.area() {
            cut_height
        } else {
            cut_width
        };

        *self = if leading.area() < trailing.area() {
            trailing
        } else {
            leading
        };
    }

    /// Non-mutating form of [`Rectangle::subtract`]
    pub fn without(mut self, obstacle: &Rectangle) -> Rectangle {
        self.subtract(obstacle);
        self
    }
}

/// `to - from`, clamped to the `i32` range
fn distance(from: i32, to: i32) -> i32 {
    (i64::from(to) - i64::from(from)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
