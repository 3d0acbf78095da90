//! Shader parameter slots shared by the health bar material and its shader.
//!
//! The slot names are the contract with the material system and must match the
//! parameter names the shader was authored against.

use bevy::color::LinearRgba;

use super::state::HealthBarState;

/// A named shader parameter the health bar writes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamSlot {
    Color,
    SegmentCount,
    RemoveSegments,
    SegmentSpacing,
    Radius,
    LineWidth,
    Rotation,
}

/// Every slot and its parameter name, in sync order
pub const PARAM_SLOTS: [(ParamSlot, &str); 7] = [
    (ParamSlot::Color, "Color"),
    (ParamSlot::SegmentCount, "SegmentCount"),
    (ParamSlot::RemoveSegments, "RemoveSegments"),
    (ParamSlot::SegmentSpacing, "SegmentSpacing"),
    (ParamSlot::Radius, "Radius"),
    (ParamSlot::LineWidth, "LineWidth"),
    (ParamSlot::Rotation, "Rotation"),
];

impl ParamSlot {
    pub fn name(self) -> &'static str {
        PARAM_SLOTS
            .iter()
            .find(|(slot, _)| *slot == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PARAM_SLOTS
            .iter()
            .find(|(_, slot_name)| *slot_name == name)
            .map(|(slot, _)| *slot)
    }

    /// Read this slot's value out of a health bar state
    pub fn read(self, state: &HealthBarState) -> ParamValue {
        match self {
            ParamSlot::Color => ParamValue::Color(state.color()),
            ParamSlot::SegmentCount => ParamValue::Float(state.segment_count()),
            ParamSlot::RemoveSegments => ParamValue::Float(state.removed_segments()),
            ParamSlot::SegmentSpacing => ParamValue::Float(state.spacing()),
            ParamSlot::Radius => ParamValue::Float(state.radius()),
            ParamSlot::LineWidth => ParamValue::Float(state.line_width()),
            ParamSlot::Rotation => ParamValue::Float(state.rotation_degrees()),
        }
    }
}

/// Value carried by a parameter slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Color(LinearRgba),
}

/// A shader-parameter sink the health bar projects its state onto.
///
/// Slots are addressed by [`ParamSlot`]. Reading a float from the color slot
/// (or the reverse) is a host bug; implementations return a zero value.
pub trait RenderTarget {
    /// Identity of the material instance behind this target
    fn identity(&self) -> &str;

    fn set_float(&mut self, slot: ParamSlot, value: f32);

    fn set_color(&mut self, slot: ParamSlot, value: LinearRgba);

    fn float(&self, slot: ParamSlot) -> f32;

    fn color(&self, slot: ParamSlot) -> LinearRgba;

    fn write(&mut self, slot: ParamSlot, value: ParamValue) {
        match value {
            ParamValue::Float(v) => self.set_float(slot, v),
            ParamValue::Color(c) => self.set_color(slot, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names_round_trip() {
        for (slot, name) in PARAM_SLOTS {
            assert_eq!(slot.name(), name);
            assert_eq!(ParamSlot::from_name(name), Some(slot));
        }
        assert_eq!(ParamSlot::from_name("_RemoveSegments"), None);
    }

    #[test]
    fn test_slot_names_are_unique() {
        for (i, (_, a)) in PARAM_SLOTS.iter().enumerate() {
            for (_, b) in &PARAM_SLOTS[i + 1..] {
                assert_ne!(a, b, "duplicate parameter name {}", a);
            }
        }
    }

    #[test]
    fn test_read_maps_fields() {
        let state = HealthBarState::default();
        assert_eq!(
            ParamSlot::SegmentCount.read(&state),
            ParamValue::Float(5.0)
        );
        assert_eq!(ParamSlot::Radius.read(&state), ParamValue::Float(0.4));
        assert_eq!(
            ParamSlot::Color.read(&state),
            ParamValue::Color(LinearRgba::WHITE)
        );
    }
}
