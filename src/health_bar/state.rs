//! Numeric model of a radial segmented health bar.
//!
//! Every mutator clamps its input instead of rejecting it, so the state can be
//! driven directly from gameplay code without validation at the call site.

use bevy::color::LinearRgba;

/// Health operations shared by every segmented health bar.
pub trait SegmentedHealthBar {
    /// Set the number of segments in the bar
    fn set_segment_count(&mut self, value: f32);
    /// Set the absolute number of removed segments
    fn set_removed_segments(&mut self, value: f32);
    /// Set the absolute health, from 0 (no health) to 1 (full health)
    fn set_percent(&mut self, value: f32);
    /// Add (+) or remove (-) removed segments. Does not alter the segment count.
    fn add_remove_segments(&mut self, value: f32);
    /// Add (+) or remove (-) a fraction of the whole bar. Does not alter the segment count.
    fn add_remove_percent(&mut self, value: f32);
}

/// Current health and appearance of one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBarState {
    segment_count: f32,
    removed_segments: f32,
    spacing: f32,
    radius: f32,
    line_width: f32,
    rotation_degrees: f32,
    color: LinearRgba,
}

impl Default for HealthBarState {
    fn default() -> Self {
        Self {
            segment_count: 5.0,
            removed_segments: 0.0,
            spacing: 0.04,
            radius: 0.4,
            line_width: 0.04,
            rotation_degrees: 0.0,
            color: LinearRgba::WHITE,
        }
    }
}

/// Clamp that never panics and never returns NaN.
///
/// NaN maps to `min`. Callers guarantee `min <= max`.
pub(crate) fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.max(min).min(max)
    }
}

impl HealthBarState {
    pub fn segment_count(&self) -> f32 {
        self.segment_count
    }

    pub fn removed_segments(&self) -> f32 {
        self.removed_segments
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn color(&self) -> LinearRgba {
        self.color
    }

    /// Segments still present
    pub fn remaining_segments(&self) -> f32 {
        self.segment_count - self.removed_segments
    }

    /// Remaining health as a fraction of the whole bar (0 for an empty bar)
    pub fn percent(&self) -> f32 {
        if self.segment_count > 0.0 {
            1.0 - self.removed_segments / self.segment_count
        } else {
            0.0
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.removed_segments >= self.segment_count
    }

    /// Gap between segments, in [0, 1]
    pub fn set_spacing(&mut self, value: f32) {
        self.spacing = clamp_lenient(value, 0.0, 1.0);
    }

    /// Ring radius in UV space, in [0, 1]
    pub fn set_radius(&mut self, value: f32) {
        self.radius = clamp_lenient(value, 0.0, 1.0);
    }

    /// Ring thickness in UV space, in [0, 1]
    pub fn set_line_width(&mut self, value: f32) {
        self.line_width = clamp_lenient(value, 0.0, 1.0);
    }

    /// Rotation of the first segment, in [0, 360] degrees
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_degrees = clamp_lenient(degrees, 0.0, 360.0);
    }

    /// Non-finite components are stored as 0
    pub fn set_color(&mut self, color: impl Into<LinearRgba>) {
        let color = color.into();
        let finite = |c: f32| if c.is_finite() { c } else { 0.0 };
        self.color = LinearRgba::new(
            finite(color.red),
            finite(color.green),
            finite(color.blue),
            finite(color.alpha),
        );
    }

    fn clamp_removed(&mut self) {
        self.removed_segments = clamp_lenient(self.removed_segments, 0.0, self.segment_count);
    }
}

impl SegmentedHealthBar for HealthBarState {
    fn set_segment_count(&mut self, value: f32) {
        self.segment_count = clamp_lenient(value, 0.0, f32::MAX);
        // shrinking below the removed count would break the invariant
        self.clamp_removed();
    }

    fn set_removed_segments(&mut self, value: f32) {
        self.removed_segments = value;
        self.clamp_removed();
    }

    fn set_percent(&mut self, value: f32) {
        let percent = clamp_lenient(value, 0.0, 1.0);
        self.removed_segments = (1.0 - percent) * self.segment_count;
        self.clamp_removed();
    }

    fn add_remove_segments(&mut self, value: f32) {
        self.removed_segments += value;
        self.clamp_removed();
    }

    fn add_remove_percent(&mut self, value: f32) {
        self.removed_segments += value * self.segment_count;
        self.clamp_removed();
    }
}
