//! Radial segmented health bar material.
//!
//! One uniform carries every shader parameter; the fragment shader draws the
//! ring, cuts it into segments and hides the removed ones.

use bevy::color::ColorToComponents;
use bevy::pbr::{Material, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use super::params::{ParamSlot, RenderTarget};
use super::templates::HealthBarTemplate;
use super::widget::MATERIAL_INSTANCE_NAME;

/// Registers the health bar material with the renderer
pub struct HealthBarMaterialPlugin;

impl Plugin for HealthBarMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<HealthBarMaterial>::default());
    }
}

#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct HealthBarUniform {
    pub color: Vec4,
    pub segment_count: f32,
    pub remove_segments: f32,
    pub segment_spacing: f32,
    pub radius: f32,
    pub line_width: f32,
    /// Degrees
    pub rotation: f32,
    pub _padding1: f32,
    pub _padding2: f32,
}

impl From<&HealthBarTemplate> for HealthBarUniform {
    fn from(template: &HealthBarTemplate) -> Self {
        Self {
            color: Vec4::from_array(template.color),
            segment_count: template.segment_count,
            remove_segments: template.remove_segments,
            segment_spacing: template.segment_spacing,
            radius: template.radius,
            line_width: template.line_width,
            rotation: template.rotation,
            _padding1: 0.0,
            _padding2: 0.0,
        }
    }
}

impl Default for HealthBarUniform {
    fn default() -> Self {
        Self::from(&HealthBarTemplate::default())
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct HealthBarMaterial {
    #[uniform(0)]
    pub data: HealthBarUniform,

    /// Instance identity, not sent to the GPU
    pub name: String,
}

impl Default for HealthBarMaterial {
    fn default() -> Self {
        Self {
            data: HealthBarUniform::default(),
            name: MATERIAL_INSTANCE_NAME.to_string(),
        }
    }
}

impl HealthBarMaterial {
    /// Fresh instance owned by a health bar, initialized from a template
    pub fn from_template(template: &HealthBarTemplate) -> Self {
        Self {
            data: HealthBarUniform::from(template),
            name: MATERIAL_INSTANCE_NAME.to_string(),
        }
    }

    fn float_mut(&mut self, slot: ParamSlot) -> Option<&mut f32> {
        match slot {
            ParamSlot::Color => None,
            ParamSlot::SegmentCount => Some(&mut self.data.segment_count),
            ParamSlot::RemoveSegments => Some(&mut self.data.remove_segments),
            ParamSlot::SegmentSpacing => Some(&mut self.data.segment_spacing),
            ParamSlot::Radius => Some(&mut self.data.radius),
            ParamSlot::LineWidth => Some(&mut self.data.line_width),
            ParamSlot::Rotation => Some(&mut self.data.rotation),
        }
    }
}

impl RenderTarget for HealthBarMaterial {
    fn identity(&self) -> &str {
        &self.name
    }

    fn set_float(&mut self, slot: ParamSlot, value: f32) {
        if let Some(field) = self.float_mut(slot) {
            *field = value;
        }
    }

    fn set_color(&mut self, slot: ParamSlot, value: LinearRgba) {
        if slot == ParamSlot::Color {
            self.data.color = value.to_vec4();
        }
    }

    fn float(&self, slot: ParamSlot) -> f32 {
        match slot {
            ParamSlot::Color => 0.0,
            ParamSlot::SegmentCount => self.data.segment_count,
            ParamSlot::RemoveSegments => self.data.remove_segments,
            ParamSlot::SegmentSpacing => self.data.segment_spacing,
            ParamSlot::Radius => self.data.radius,
            ParamSlot::LineWidth => self.data.line_width,
            ParamSlot::Rotation => self.data.rotation,
        }
    }

    fn color(&self, slot: ParamSlot) -> LinearRgba {
        match slot {
            ParamSlot::Color => LinearRgba::from_vec4(self.data.color),
            _ => LinearRgba::NONE,
        }
    }
}

impl Material for HealthBarMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/radial_segmented_health_bar.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}
