use bevy::camera::ScalingMode;
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameCamera>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_camera_resource);
    }
}

#[derive(Resource)]
pub struct GameCamera {
    pub scale: f32,
    pub aspect_ratio: f32,
    pub bounds: CameraBounds,
}

#[derive(Debug, Clone)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        let scale = 6.0;
        let aspect_ratio = 16.0 / 9.0;

        Self {
            scale,
            aspect_ratio,
            bounds: CameraBounds::from_scale_and_aspect(scale, aspect_ratio),
        }
    }
}

impl CameraBounds {
    pub fn from_scale_and_aspect(scale: f32, aspect_ratio: f32) -> Self {
        let half_height = scale * 0.5;
        let half_width = half_height * aspect_ratio;

        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Center of cell `index` when the width is split into `count` equal
    /// columns, on the XZ board plane
    pub fn column_center(&self, index: usize, count: usize) -> Vec3 {
        let count = count.max(1);
        let column_width = self.width() / count as f32;
        let x = self.left + column_width * (index as f32 + 0.5);
        let z = self.bottom + self.height() * 0.5;

        Vec3::new(x, 0.0, z)
    }

    /// Side length of the largest square fitting a column, minus padding
    pub fn column_size(&self, count: usize, padding_percent: f32) -> f32 {
        let column_width = self.width() / count.max(1) as f32;
        column_width.min(self.height()) * (1.0 - 2.0 * padding_percent)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Top-down orthographic camera over the XZ plane, +Z pointing up on screen
fn setup_camera(mut commands: Commands, game_camera: Res<GameCamera>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: game_camera.scale,
        },
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        MainCamera,
    ));
}

/// Update camera resource when window is resized
fn update_camera_resource(mut game_camera: ResMut<GameCamera>, windows: Query<&Window>) {
    if let Ok(window) = windows.single() {
        let new_aspect = window.width() / window.height();

        if (new_aspect - game_camera.aspect_ratio).abs() > 0.01 {
            game_camera.aspect_ratio = new_aspect;
            game_camera.bounds =
                CameraBounds::from_scale_and_aspect(game_camera.scale, game_camera.aspect_ratio);

            info!("Camera bounds updated: {:?}", game_camera.bounds);
        }
    }
}
