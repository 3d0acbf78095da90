//! Host-agnostic health bar widget: state, shadow copy and binding lifecycle.
//!
//! The host calls [`HealthBarWidget::on_attach`] once a render target has been
//! resolved and [`HealthBarWidget::on_tick`] every frame afterwards.

use std::fmt;

use super::params::RenderTarget;
use super::state::{HealthBarState, SegmentedHealthBar};
use super::sync::{ShadowCopy, adopt_target, push_changes};

/// Name of the material template a new instance is created from
pub const MATERIAL_TEMPLATE_NAME: &str = "RadialSegmentedHealthBarMaterial";
/// Name of the placeholder visual the material is drawn on
pub const PLACEHOLDER_VISUAL_NAME: &str = "placeholderSprite";
/// Identity every material instance owned by a health bar carries
pub const MATERIAL_INSTANCE_NAME: &str = "radialSegmentedHealthBarInstance";

/// Why a widget could not be bound to a render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    MissingTemplate(String),
    MissingPlaceholder(String),
    MissingTarget,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::MissingTemplate(name) => {
                write!(f, "material template '{}' could not be resolved", name)
            }
            BindingError::MissingPlaceholder(name) => {
                write!(f, "placeholder visual '{}' could not be resolved", name)
            }
            BindingError::MissingTarget => write!(f, "no render target to bind to"),
        }
    }
}

impl std::error::Error for BindingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPhase {
    /// No render target attached yet
    Unbound,
    /// Waiting for the host to resolve (or re-resolve) a render target
    Binding,
    /// Pushing changes every tick
    Bound,
    /// Binding failed; terminal
    Disabled,
}

#[derive(Debug, Clone)]
pub struct HealthBarWidget {
    state: HealthBarState,
    shadow: ShadowCopy,
    phase: BindingPhase,
    authoring_mode: bool,
}

impl Default for HealthBarWidget {
    fn default() -> Self {
        Self::new(false)
    }
}

impl HealthBarWidget {
    pub fn new(authoring_mode: bool) -> Self {
        let state = HealthBarState::default();
        Self {
            shadow: ShadowCopy::of(&state),
            state,
            phase: BindingPhase::Unbound,
            authoring_mode,
        }
    }

    pub fn state(&self) -> &HealthBarState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut HealthBarState {
        &mut self.state
    }

    pub fn phase(&self) -> BindingPhase {
        self.phase
    }

    pub fn authoring_mode(&self) -> bool {
        self.authoring_mode
    }

    /// True while the host still has to provide a render target
    pub fn needs_binding(&self) -> bool {
        matches!(self.phase, BindingPhase::Unbound | BindingPhase::Binding)
    }

    /// True when the next tick would write to the target
    pub fn has_pending_changes(&self) -> bool {
        self.phase == BindingPhase::Bound && self.shadow.is_dirty(&self.state)
    }

    /// Bind to a resolved render target, or fail for good.
    ///
    /// Failures are returned for the host to report. On success the widget
    /// adopts the target's current values, so the first tick writes nothing
    /// the target does not already hold.
    pub fn on_attach<T: RenderTarget>(
        &mut self,
        target: Result<&T, BindingError>,
    ) -> Result<(), BindingError> {
        if self.phase == BindingPhase::Disabled {
            return Err(BindingError::MissingTarget);
        }
        self.phase = BindingPhase::Binding;

        match target {
            Ok(target) => {
                let (state, shadow) = adopt_target(target);
                self.state = state;
                self.shadow = shadow;
                self.phase = BindingPhase::Bound;
                log::debug!("health bar bound to '{}'", target.identity());
                Ok(())
            }
            Err(err) => {
                self.phase = BindingPhase::Disabled;
                Err(err)
            }
        }
    }

    /// In authoring mode, drop back to binding when the target was swapped
    /// for a material this widget does not own. Returns true if still bound.
    pub fn verify_target(&mut self, identity: &str) -> bool {
        if self.phase != BindingPhase::Bound {
            return false;
        }
        if self.authoring_mode && identity != MATERIAL_INSTANCE_NAME {
            log::warn!(
                "health bar material replaced by '{}', rebinding",
                identity
            );
            self.phase = BindingPhase::Binding;
            return false;
        }
        true
    }

    /// The bound target no longer exists. In authoring mode the widget goes
    /// back to binding; at runtime the binding is assumed stable.
    pub fn on_target_lost(&mut self) {
        if self.phase == BindingPhase::Bound && self.authoring_mode {
            log::warn!("health bar material is gone, rebinding");
            self.phase = BindingPhase::Binding;
        }
    }

    /// Push changed fields to the target. Returns the number of writes.
    pub fn on_tick(&mut self, target: &mut impl RenderTarget) -> usize {
        if !self.verify_target(target.identity()) {
            return 0;
        }
        push_changes(&self.state, &mut self.shadow, target)
    }
}

impl SegmentedHealthBar for HealthBarWidget {
    fn set_segment_count(&mut self, value: f32) {
        self.state.set_segment_count(value);
    }

    fn set_removed_segments(&mut self, value: f32) {
        self.state.set_removed_segments(value);
    }

    fn set_percent(&mut self, value: f32) {
        self.state.set_percent(value);
    }

    fn add_remove_segments(&mut self, value: f32) {
        self.state.add_remove_segments(value);
    }

    fn add_remove_percent(&mut self, value: f32) {
        self.state.add_remove_percent(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_bar::params::ParamSlot;
    use crate::health_bar::sync::tests::RecordingTarget;

    fn bound_widget(authoring_mode: bool) -> (HealthBarWidget, RecordingTarget) {
        let target = RecordingTarget::holding(MATERIAL_INSTANCE_NAME, &HealthBarState::default());
        let mut widget = HealthBarWidget::new(authoring_mode);
        widget.on_attach(Ok(&target)).unwrap();
        (widget, target)
    }

    #[test]
    fn test_starts_unbound() {
        let widget = HealthBarWidget::default();
        assert_eq!(widget.phase(), BindingPhase::Unbound);
        assert!(widget.needs_binding());
        assert!(!widget.has_pending_changes());
    }

    #[test]
    fn test_tick_before_attach_writes_nothing() {
        let mut widget = HealthBarWidget::default();
        let mut target = RecordingTarget::named(MATERIAL_INSTANCE_NAME);
        widget.set_percent(0.5);

        assert_eq!(widget.on_tick(&mut target), 0);
        assert!(target.writes.is_empty());
    }

    #[test]
    fn test_attach_adopts_target_values() {
        let mut source = HealthBarState::default();
        source.set_segment_count(10.0);
        source.set_removed_segments(2.0);
        let mut target = RecordingTarget::holding(MATERIAL_INSTANCE_NAME, &source);

        let mut widget = HealthBarWidget::default();
        widget.set_segment_count(3.0);
        widget.on_attach(Ok(&target)).unwrap();

        assert_eq!(widget.phase(), BindingPhase::Bound);
        assert_eq!(widget.state().segment_count(), 10.0);
        assert_eq!(widget.state().removed_segments(), 2.0);
        assert_eq!(widget.on_tick(&mut target), 0);
    }

    #[test]
    fn test_tick_pushes_then_goes_quiet() {
        let (mut widget, mut target) = bound_widget(false);

        widget.add_remove_percent(0.5);
        assert!(widget.has_pending_changes());
        assert_eq!(widget.on_tick(&mut target), 1);
        assert_eq!(target.float(ParamSlot::RemoveSegments), 2.5);

        assert_eq!(widget.on_tick(&mut target), 0);
        assert_eq!(target.writes, vec![ParamSlot::RemoveSegments]);
    }

    #[test]
    fn test_failed_attach_is_terminal() {
        let mut widget = HealthBarWidget::default();
        let err = widget
            .on_attach::<RecordingTarget>(Err(BindingError::MissingTemplate(
                MATERIAL_TEMPLATE_NAME.to_string(),
            )))
            .unwrap_err();

        assert_eq!(
            err,
            BindingError::MissingTemplate(MATERIAL_TEMPLATE_NAME.to_string())
        );
        assert_eq!(widget.phase(), BindingPhase::Disabled);
        assert!(!widget.needs_binding());

        // a later target does not revive it
        let target = RecordingTarget::named(MATERIAL_INSTANCE_NAME);
        assert!(widget.on_attach(Ok(&target)).is_err());
        assert_eq!(widget.phase(), BindingPhase::Disabled);
    }

    #[test]
    fn test_authoring_mode_rebinds_on_foreign_material() {
        let (mut widget, _) = bound_widget(true);
        let mut foreign = RecordingTarget::named("SomeOtherMaterial");
        widget.set_percent(0.0);

        assert_eq!(widget.on_tick(&mut foreign), 0);
        assert_eq!(widget.phase(), BindingPhase::Binding);
        assert!(widget.needs_binding());
        assert!(foreign.writes.is_empty());
    }

    #[test]
    fn test_lost_target_rebinds_only_while_authoring() {
        let (mut authoring, _) = bound_widget(true);
        authoring.on_target_lost();
        assert_eq!(authoring.phase(), BindingPhase::Binding);

        let (mut runtime, _) = bound_widget(false);
        runtime.on_target_lost();
        assert_eq!(runtime.phase(), BindingPhase::Bound);
    }

    #[test]
    fn test_runtime_ignores_identity() {
        let (mut widget, _) = bound_widget(false);
        let mut foreign = RecordingTarget::named("SomeOtherMaterial");
        widget.set_percent(0.0);

        assert_eq!(widget.on_tick(&mut foreign), 1);
        assert_eq!(widget.phase(), BindingPhase::Bound);
    }

    #[test]
    fn test_binding_error_messages() {
        assert_eq!(
            BindingError::MissingPlaceholder(PLACEHOLDER_VISUAL_NAME.to_string()).to_string(),
            "placeholder visual 'placeholderSprite' could not be resolved"
        );
        assert_eq!(
            BindingError::MissingTarget.to_string(),
            "no render target to bind to"
        );
    }
}
