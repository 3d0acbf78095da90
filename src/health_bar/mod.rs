//! Radial segmented health bar.
//!
//! - **State** (`state.rs`): segment count, removed segments and appearance, always clamped
//! - **Parameters** (`params.rs`): shader slot table and the `RenderTarget` seam
//! - **Sync** (`sync.rs`): shadow copy and change-only pushes
//! - **Widget** (`widget.rs`): binding lifecycle (`on_attach` / `on_tick`)
//! - **Material** (`material.rs`): Bevy material and WGSL uniform
//! - **Templates** (`templates.rs`): named templates and placeholder visuals
//! - **Plugin** (`plugin.rs`): ECS component and the systems that drive the widget

pub mod material;
pub mod params;
pub mod plugin;
pub mod state;
pub mod sync;
pub mod templates;
pub mod widget;

// Re-export commonly used types
pub use material::{HealthBarMaterial, HealthBarMaterialPlugin, HealthBarUniform};
pub use params::{PARAM_SLOTS, ParamSlot, ParamValue, RenderTarget};
pub use plugin::{
    HealthBar, HealthBarDisabled, HealthBarMaterialAssigned, HealthBarSettings,
    RadialHealthBarPlugin,
};
pub use state::{HealthBarState, SegmentedHealthBar};
pub use templates::{HealthBarTemplate, HealthBarTemplates, PlaceholderVisuals};
pub use widget::{BindingError, BindingPhase, HealthBarWidget};
