use bevy::prelude::*;

mod camera;
mod demo;
mod health_bar;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use demo::DemoPlugin;
use health_bar::RadialHealthBarPlugin;

fn main() {
    let authoring_mode = std::env::args().any(|arg| arg == "--authoring");

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Radial Health Bar".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(RadialHealthBarPlugin { authoring_mode })
    .add_plugins(DemoPlugin);

    app.run();
}
