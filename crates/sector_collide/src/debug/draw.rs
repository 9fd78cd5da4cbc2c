//! Line plotting collaborator and a recording implementation

use crate::foundation::math::{Color, Point2};

/// Receiver of debug line segments in display space
pub trait LinePlotter {
    /// Draw one segment
    fn plot(&mut self, p0: Point2, p1: Point2, color: Color);
}

/// A recorded line segment
#[derive(Clone, Debug, PartialEq)]
pub struct DebugLine {
    /// Segment start
    pub start: Point2,
    /// Segment end
    pub end: Point2,
    /// Line color
    pub color: Color,
}

/// Line plotter that records segments for a renderer to flush later
pub struct DebugLineBuffer {
    lines: Vec<DebugLine>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugLineBuffer {
    /// Create an empty, enabled buffer
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            enabled: true,
        }
    }

    /// Recorded segments in plot order
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Number of recorded segments
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hand the recorded segments over and start a new frame
    pub fn drain(&mut self) -> std::vec::Drain<'_, DebugLine> {
        self.lines.drain(..)
    }

    /// Drop every recorded segment
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for DebugLineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePlotter for DebugLineBuffer {
    fn plot(&mut self, p0: Point2, p1: Point2, color: Color) {
        if !self.enabled {
            return;
        }

        self.lines.push(DebugLine {
            start: p0,
            end: p1,
            color,
        });
    }
}
