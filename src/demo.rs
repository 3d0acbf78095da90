//! Keyboard-driven showcase of a few health bars.
//!
//! Space removes a segment, H heals one, P jumps to a random percent,
//! Up/Down change the segment count, R rotates, Tab selects the next bar.

use bevy::prelude::*;
use rand::Rng;

use crate::camera::GameCamera;
use crate::health_bar::{HealthBar, HealthBarSettings, SegmentedHealthBar};

const DEMO_TEMPLATES: [&str; 3] = [
    "RadialSegmentedHealthBarMaterial",
    "BossHealthBar",
    "ShieldRing",
];

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedBar>()
            .add_message::<BarCommand>()
            .add_systems(Startup, spawn_demo_bars)
            .add_systems(Update, (collect_bar_commands, apply_bar_commands).chain());
    }
}

/// Index of the bar keyboard commands apply to
#[derive(Resource, Default, Debug, Clone, Copy)]
struct SelectedBar(usize);

#[derive(Component, Debug, Clone, Copy)]
struct DemoSlot(usize);

#[derive(Message, Debug, Clone, Copy, PartialEq)]
enum BarCommand {
    Damage,
    Heal,
    SetPercent(f32),
    GrowSegments,
    ShrinkSegments,
    Rotate,
    SelectNext,
}

fn spawn_demo_bars(
    mut commands: Commands,
    game_camera: Res<GameCamera>,
    settings: Res<HealthBarSettings>,
) {
    let bounds = &game_camera.bounds;
    let count = DEMO_TEMPLATES.len();
    let size = bounds.column_size(count, 0.05);

    for (index, template) in DEMO_TEMPLATES.iter().enumerate() {
        commands.spawn((
            HealthBar::with_template(&settings, *template),
            DemoSlot(index),
            Transform::from_translation(bounds.column_center(index, count))
                .with_scale(Vec3::splat(size)),
            Name::new(format!("Health Bar ({})", template)),
        ));
    }

    info!("Spawned {} demo health bars", count);
}

fn collect_bar_commands(keys: Res<ButtonInput<KeyCode>>, mut out: MessageWriter<BarCommand>) {
    let bindings = [
        (KeyCode::Space, BarCommand::Damage),
        (KeyCode::KeyH, BarCommand::Heal),
        (KeyCode::ArrowUp, BarCommand::GrowSegments),
        (KeyCode::ArrowDown, BarCommand::ShrinkSegments),
        (KeyCode::KeyR, BarCommand::Rotate),
        (KeyCode::Tab, BarCommand::SelectNext),
    ];

    for (key, command) in bindings {
        if keys.just_pressed(key) {
            out.write(command);
        }
    }

    if keys.just_pressed(KeyCode::KeyP) {
        out.write(BarCommand::SetPercent(rand::rng().random_range(0.0..=1.0)));
    }
}

fn apply_bar_commands(
    mut commands: MessageReader<BarCommand>,
    mut selected: ResMut<SelectedBar>,
    mut bars: Query<(&DemoSlot, &mut HealthBar)>,
) {
    for command in commands.read() {
        if *command == BarCommand::SelectNext {
            selected.0 = (selected.0 + 1) % DEMO_TEMPLATES.len();
            info!("Selected bar {}", selected.0);
            continue;
        }

        let Some((_, mut bar)) = bars.iter_mut().find(|(slot, _)| slot.0 == selected.0) else {
            continue;
        };

        apply_command(&mut bar, *command);

        let state = bar.state();
        info!(
            "Bar {}: {:.2}/{} segments ({:.0}%)",
            selected.0,
            state.remaining_segments(),
            state.segment_count(),
            state.percent() * 100.0
        );
    }
}

fn apply_command(bar: &mut HealthBar, command: BarCommand) {
    match command {
        BarCommand::Damage => bar.add_remove_segments(1.0),
        BarCommand::Heal => bar.add_remove_segments(-1.0),
        BarCommand::SetPercent(percent) => bar.set_percent(percent),
        BarCommand::GrowSegments => {
            let count = bar.state().segment_count();
            bar.set_segment_count(count + 1.0);
        }
        BarCommand::ShrinkSegments => {
            let count = bar.state().segment_count();
            bar.set_segment_count(count - 1.0);
        }
        BarCommand::Rotate => {
            let rotation = (bar.state().rotation_degrees() + 15.0) % 360.0;
            bar.state_mut().set_rotation(rotation);
        }
        BarCommand::SelectNext => {}
    }
}
