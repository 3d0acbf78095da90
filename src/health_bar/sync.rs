//! Change-driven synchronization of health bar state onto a render target.

use super::params::{PARAM_SLOTS, ParamSlot, ParamValue, RenderTarget};
use super::state::{HealthBarState, SegmentedHealthBar};

/// Last value pushed to the render target for each slot, in `PARAM_SLOTS` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCopy {
    values: [ParamValue; PARAM_SLOTS.len()],
}

impl ShadowCopy {
    /// Shadow matching a state exactly (nothing pending)
    pub fn of(state: &HealthBarState) -> Self {
        Self {
            values: PARAM_SLOTS.map(|(slot, _)| slot.read(state)),
        }
    }

    /// Shadow matching whatever the target currently holds
    pub fn read_from(target: &impl RenderTarget) -> Self {
        Self {
            values: PARAM_SLOTS.map(|(slot, _)| match slot {
                ParamSlot::Color => ParamValue::Color(target.color(slot)),
                _ => ParamValue::Float(target.float(slot)),
            }),
        }
    }

    /// Slots whose current value differs from the last pushed one.
    /// Equality is exact.
    pub fn changes<'a>(
        &'a self,
        state: &'a HealthBarState,
    ) -> impl Iterator<Item = (usize, ParamSlot, ParamValue)> + 'a {
        PARAM_SLOTS
            .iter()
            .enumerate()
            .filter_map(move |(i, (slot, _))| {
                let current = slot.read(state);
                (current != self.values[i]).then_some((i, *slot, current))
            })
    }

    pub fn is_dirty(&self, state: &HealthBarState) -> bool {
        self.changes(state).next().is_some()
    }

    pub fn get(&self, slot: ParamSlot) -> ParamValue {
        let index = PARAM_SLOTS
            .iter()
            .position(|(s, _)| *s == slot)
            .unwrap_or_default();
        self.values[index]
    }
}

/// Write every changed slot to `target` and record it in `shadow`.
///
/// Returns the number of writes issued; unchanged slots are never touched.
pub fn push_changes(
    state: &HealthBarState,
    shadow: &mut ShadowCopy,
    target: &mut impl RenderTarget,
) -> usize {
    let pending: Vec<_> = shadow.changes(state).collect();

    for &(index, slot, value) in &pending {
        target.write(slot, value);
        shadow.values[index] = value;
    }

    pending.len()
}

/// Build a state from the target's current parameters (pull-then-own).
///
/// Values outside their domain are clamped in the state while the shadow keeps
/// what the target holds, so the next push corrects the target.
pub fn adopt_target(target: &impl RenderTarget) -> (HealthBarState, ShadowCopy) {
    let mut state = HealthBarState::default();

    state.set_color(target.color(ParamSlot::Color));
    state.set_segment_count(target.float(ParamSlot::SegmentCount));
    state.set_removed_segments(target.float(ParamSlot::RemoveSegments));
    state.set_spacing(target.float(ParamSlot::SegmentSpacing));
    state.set_radius(target.float(ParamSlot::Radius));
    state.set_line_width(target.float(ParamSlot::LineWidth));
    state.set_rotation(target.float(ParamSlot::Rotation));

    (state, ShadowCopy::read_from(target))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bevy::color::LinearRgba;
    use std::collections::HashMap;

    /// Render target that records every write
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTarget {
        pub identity: String,
        pub floats: HashMap<ParamSlot, f32>,
        pub color: LinearRgba,
        pub writes: Vec<ParamSlot>,
    }

    impl RecordingTarget {
        pub(crate) fn named(identity: &str) -> Self {
            Self {
                identity: identity.to_string(),
                ..Default::default()
            }
        }

        pub(crate) fn holding(identity: &str, state: &HealthBarState) -> Self {
            let mut target = Self::named(identity);
            for (slot, _) in PARAM_SLOTS {
                target.write(slot, slot.read(state));
            }
            target.writes.clear();
            target
        }
    }

    impl RenderTarget for RecordingTarget {
        fn identity(&self) -> &str {
            &self.identity
        }

        fn set_float(&mut self, slot: ParamSlot, value: f32) {
            self.floats.insert(slot, value);
            self.writes.push(slot);
        }

        fn set_color(&mut self, slot: ParamSlot, value: LinearRgba) {
            self.color = value;
            self.writes.push(slot);
        }

        fn float(&self, slot: ParamSlot) -> f32 {
            self.floats.get(&slot).copied().unwrap_or(0.0)
        }

        fn color(&self, _slot: ParamSlot) -> LinearRgba {
            self.color
        }
    }

    #[test]
    fn test_push_only_changed() {
        let mut state = HealthBarState::default();
        let mut shadow = ShadowCopy::of(&state);
        let mut target = RecordingTarget::holding("bar", &state);

        state.add_remove_segments(1.0);
        state.set_radius(0.3);

        assert_eq!(push_changes(&state, &mut shadow, &mut target), 2);
        assert_eq!(
            target.writes,
            vec![ParamSlot::RemoveSegments, ParamSlot::Radius]
        );
        assert_eq!(target.float(ParamSlot::RemoveSegments), 1.0);
        assert_eq!(target.float(ParamSlot::Radius), 0.3);
    }

    #[test]
    fn test_second_push_is_idempotent() {
        let mut state = HealthBarState::default();
        let mut shadow = ShadowCopy::of(&state);
        let mut target = RecordingTarget::named("bar");

        state.set_percent(0.2);
        state.set_color(LinearRgba::GREEN);
        push_changes(&state, &mut shadow, &mut target);
        let writes = target.writes.len();

        assert_eq!(push_changes(&state, &mut shadow, &mut target), 0);
        assert_eq!(target.writes.len(), writes);
        assert!(!shadow.is_dirty(&state));
    }

    #[test]
    fn test_nan_color_settles_after_one_push() {
        let mut state = HealthBarState::default();
        let mut shadow = ShadowCopy::of(&state);
        let mut target = RecordingTarget::holding("bar", &state);

        state.set_color(LinearRgba::new(f32::NAN, 0.0, 0.0, 1.0));

        assert_eq!(push_changes(&state, &mut shadow, &mut target), 1);
        assert_eq!(push_changes(&state, &mut shadow, &mut target), 0);
        assert!(!shadow.is_dirty(&state));
    }

    #[test]
    fn test_adopted_nan_target_is_corrected_once() {
        let mut target = RecordingTarget::holding("bar", &HealthBarState::default());
        target.color = LinearRgba::new(1.0, f32::NAN, 1.0, 1.0);
        target.floats.insert(ParamSlot::Radius, f32::NAN);

        let (state, mut shadow) = adopt_target(&target);
        assert_eq!(state.color(), LinearRgba::new(1.0, 0.0, 1.0, 1.0));
        assert_eq!(state.radius(), 0.0);

        assert_eq!(push_changes(&state, &mut shadow, &mut target), 2);
        assert_eq!(push_changes(&state, &mut shadow, &mut target), 0);
    }

    #[test]
    fn test_fresh_shadow_pushes_everything() {
        let state = HealthBarState::default();
        let mut target = RecordingTarget::named("empty");
        target.color = LinearRgba::NONE;
        let mut shadow = ShadowCopy::read_from(&target);

        // removed segments and rotation already match the zeroed target
        assert_eq!(push_changes(&state, &mut shadow, &mut target), 5);
        assert_eq!(shadow, ShadowCopy::of(&state));
    }

    #[test]
    fn test_adopt_target_seeds_shadow() {
        let mut source = HealthBarState::default();
        source.set_segment_count(12.0);
        source.set_removed_segments(4.0);
        source.set_rotation(90.0);
        source.set_color(LinearRgba::BLUE);

        let mut target = RecordingTarget::holding("bar", &source);
        let (state, mut shadow) = adopt_target(&target);

        assert_eq!(state, source);
        assert_eq!(push_changes(&state, &mut shadow, &mut target), 0);
        assert!(target.writes.is_empty());
    }

    #[test]
    fn test_adopt_target_clamps_and_corrects() {
        let mut target = RecordingTarget::named("bar");
        target.set_float(ParamSlot::SegmentCount, 3.0);
        target.set_float(ParamSlot::RemoveSegments, 9.0);
        target.writes.clear();

        let (state, mut shadow) = adopt_target(&target);
        assert_eq!(state.removed_segments(), 3.0);
        assert_eq!(shadow.get(ParamSlot::RemoveSegments), ParamValue::Float(9.0));

        assert_eq!(push_changes(&state, &mut shadow, &mut target), 1);
        assert_eq!(target.float(ParamSlot::RemoveSegments), 3.0);
    }
}
