//! Named health bar templates and placeholder visuals.
//!
//! Templates are parsed from embedded JSON; a bar resolves its template by name
//! when it binds, and a missing name is a binding failure.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use super::widget::{BindingError, MATERIAL_TEMPLATE_NAME, PLACEHOLDER_VISUAL_NAME};

const TEMPLATES_JSON: &str = include_str!("../../assets/health_bar_templates.json");

/// Initial shader parameters for a new material instance
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthBarTemplate {
    /// Linear RGBA
    pub color: [f32; 4],
    pub segment_count: f32,
    pub remove_segments: f32,
    pub segment_spacing: f32,
    pub radius: f32,
    pub line_width: f32,
    /// Degrees
    pub rotation: f32,
}

impl Default for HealthBarTemplate {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            segment_count: 5.0,
            remove_segments: 0.0,
            segment_spacing: 0.04,
            radius: 0.4,
            line_width: 0.04,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemplatesJson {
    templates: HashMap<String, HealthBarTemplate>,
    #[serde(default)]
    placeholders: Vec<String>,
}

#[derive(Debug)]
pub enum TemplateError {
    Parse(serde_json::Error),
    MissingDefault,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Parse(err) => write!(f, "invalid template JSON: {}", err),
            TemplateError::MissingDefault => {
                write!(f, "no '{}' template defined", MATERIAL_TEMPLATE_NAME)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Parse(err) => Some(err),
            TemplateError::MissingDefault => None,
        }
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Parse(err)
    }
}

/// Material templates by name, plus the placeholder visuals to register
#[derive(Resource, Debug, Clone)]
pub struct HealthBarTemplates {
    templates: HashMap<String, HealthBarTemplate>,
    placeholders: Vec<String>,
}

impl Default for HealthBarTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HealthBarTemplates {
    /// Parse the embedded template file
    pub fn load() -> Result<Self, TemplateError> {
        Self::from_json(TEMPLATES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let parsed: TemplatesJson = serde_json::from_str(json)?;

        if !parsed.templates.contains_key(MATERIAL_TEMPLATE_NAME) {
            return Err(TemplateError::MissingDefault);
        }

        Ok(Self {
            templates: parsed.templates,
            placeholders: parsed.placeholders,
        })
    }

    /// Only the default template and placeholder
    pub fn builtin() -> Self {
        Self {
            templates: HashMap::from([(
                MATERIAL_TEMPLATE_NAME.to_string(),
                HealthBarTemplate::default(),
            )]),
            placeholders: vec![PLACEHOLDER_VISUAL_NAME.to_string()],
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&HealthBarTemplate, BindingError> {
        self.templates
            .get(name)
            .ok_or_else(|| BindingError::MissingTemplate(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, template: HealthBarTemplate) {
        self.templates.insert(name.into(), template);
    }

    pub fn remove(&mut self, name: &str) -> Option<HealthBarTemplate> {
        self.templates.remove(name)
    }

    /// Stop registering placeholder visuals; bars without a mesh then fail to bind
    pub fn clear_placeholders(&mut self) {
        self.placeholders.clear();
    }

    pub fn placeholder_names(&self) -> &[String] {
        &self.placeholders
    }
}

/// Meshes a bar is drawn on when its entity has none, by name
#[derive(Resource, Debug, Clone, Default)]
pub struct PlaceholderVisuals {
    meshes: HashMap<String, Handle<Mesh>>,
}

impl PlaceholderVisuals {
    pub fn insert(&mut self, name: impl Into<String>, mesh: Handle<Mesh>) {
        self.meshes.insert(name.into(), mesh);
    }

    pub fn resolve(&self, name: &str) -> Result<Handle<Mesh>, BindingError> {
        self.meshes
            .get(name)
            .cloned()
            .ok_or_else(|| BindingError::MissingPlaceholder(name.to_string()))
    }
}
