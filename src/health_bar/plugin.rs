use bevy::prelude::*;

use super::material::{HealthBarMaterial, HealthBarMaterialPlugin};
use super::state::HealthBarState;
use super::templates::{HealthBarTemplates, PlaceholderVisuals};
use super::widget::{
    BindingError, BindingPhase, HealthBarWidget, MATERIAL_INSTANCE_NAME, MATERIAL_TEMPLATE_NAME,
    PLACEHOLDER_VISUAL_NAME,
};

/// Binds health bars to material instances and keeps the materials in sync
#[derive(Default)]
pub struct RadialHealthBarPlugin {
    /// Re-bind bars whose material was swapped out from under them
    pub authoring_mode: bool,
}

impl Plugin for RadialHealthBarPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HealthBarMaterialPlugin);
        self.configure(app);
    }
}

impl RadialHealthBarPlugin {
    /// Everything except renderer registration
    fn configure(&self, app: &mut App) {
        let templates = HealthBarTemplates::load().unwrap_or_else(|err| {
            warn!("Falling back to built-in health bar template: {}", err);
            HealthBarTemplates::builtin()
        });

        app.insert_resource(HealthBarSettings {
            authoring_mode: self.authoring_mode,
        })
        .insert_resource(templates)
        .init_resource::<PlaceholderVisuals>()
        .add_message::<HealthBarMaterialAssigned>()
        .add_systems(Startup, register_placeholder_visuals)
        .add_systems(Update, (attach_health_bars, tick_health_bars).chain());
    }
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HealthBarSettings {
    pub authoring_mode: bool,
}

/// A new material instance was assigned to a bar while authoring; the host's
/// scene now differs from what is saved
#[derive(Message, Debug, Clone)]
pub struct HealthBarMaterialAssigned {
    pub entity: Entity,
}

/// Left on an entity whose health bar failed to bind
#[derive(Component, Debug, Clone)]
pub struct HealthBarDisabled {
    pub reason: BindingError,
}

/// Radial segmented health bar widget.
///
/// Health operations come from [`SegmentedHealthBar`](super::SegmentedHealthBar)
/// through the inner widget.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct HealthBar {
    #[deref]
    widget: HealthBarWidget,
    /// Template a new material instance is created from
    pub template: String,
}

impl HealthBar {
    pub fn new(settings: &HealthBarSettings) -> Self {
        Self::with_template(settings, MATERIAL_TEMPLATE_NAME)
    }

    pub fn with_template(settings: &HealthBarSettings, template: impl Into<String>) -> Self {
        Self {
            widget: HealthBarWidget::new(settings.authoring_mode),
            template: template.into(),
        }
    }

    pub fn state(&self) -> &HealthBarState {
        self.widget.state()
    }
}

fn register_placeholder_visuals(
    templates: Res<HealthBarTemplates>,
    mut visuals: ResMut<PlaceholderVisuals>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for name in templates.placeholder_names() {
        let mesh = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
        visuals.insert(name.clone(), mesh);
    }
}

/// Resolve a material for every bar waiting on one.
///
/// A bar already carrying an instance it owns adopts it; otherwise a fresh
/// instance is created from the bar's template. Bars that cannot be resolved
/// are removed.
pub fn attach_health_bars(
    mut commands: Commands,
    templates: Res<HealthBarTemplates>,
    visuals: Res<PlaceholderVisuals>,
    mut materials: ResMut<Assets<HealthBarMaterial>>,
    mut bars: Query<(
        Entity,
        &mut HealthBar,
        Option<&MeshMaterial3d<HealthBarMaterial>>,
        Has<Mesh3d>,
    )>,
    mut assigned: MessageWriter<HealthBarMaterialAssigned>,
) {
    for (entity, mut bar, current, has_mesh) in &mut bars {
        if !bar.needs_binding() {
            continue;
        }

        let owned = current
            .and_then(|handle| materials.get(&handle.0))
            .filter(|material| material.name == MATERIAL_INSTANCE_NAME);
        if let Some(material) = owned {
            if bar.on_attach(Ok(material)).is_ok() {
                debug!("Health bar {} adopted its existing material", entity);
            }
            continue;
        }

        let resolved = templates.resolve(&bar.template).and_then(|template| {
            let placeholder = if has_mesh {
                None
            } else {
                Some(visuals.resolve(PLACEHOLDER_VISUAL_NAME)?)
            };
            Ok((HealthBarMaterial::from_template(template), placeholder))
        });

        let (material, placeholder) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                if let Err(reason) = bar.on_attach::<HealthBarMaterial>(Err(err)) {
                    error!("Removing health bar from {}: {}", entity, reason);
                    commands
                        .entity(entity)
                        .remove::<HealthBar>()
                        .insert(HealthBarDisabled { reason });
                }
                continue;
            }
        };

        if bar.on_attach(Ok(&material)).is_err() {
            continue;
        }

        let handle = materials.add(material);
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(MeshMaterial3d(handle));
        if let Some(mesh) = placeholder {
            entity_commands.insert(Mesh3d(mesh));
        }

        info!(
            "Health bar {} bound to a new '{}' instance",
            entity, bar.template
        );
        if bar.authoring_mode() {
            assigned.write(HealthBarMaterialAssigned { entity });
        }
    }
}

/// Push changed bar state to its material.
///
/// Materials are only borrowed mutably when something changed, so idle bars
/// never trigger a GPU upload.
pub fn tick_health_bars(
    mut bars: Query<(Entity, &mut HealthBar, &MeshMaterial3d<HealthBarMaterial>)>,
    mut materials: ResMut<Assets<HealthBarMaterial>>,
) {
    for (entity, mut bar, handle) in &mut bars {
        if bar.phase() != BindingPhase::Bound {
            continue;
        }

        let Some(material) = materials.get(&handle.0) else {
            bar.on_target_lost();
            continue;
        };
        if !bar.verify_target(&material.name) || !bar.has_pending_changes() {
            continue;
        }

        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        let writes = bar.on_tick(&mut *material);
        trace!("Health bar {} pushed {} parameters", entity, writes);
    }
}
