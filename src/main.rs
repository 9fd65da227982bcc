use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use chess3d::core::CorePlugin;
use chess3d::game::GamePlugin;
use chess3d::rendering::{BoardSurfacePlugin, GuidesPlugin, PiecesPlugin, WeatherPlugin};
use chess3d::ui::UiPlugin;

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;

fn main() {
    let window = Window {
        title: "chess3d".to_string(),
        resolution: (WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32).into(),
        ..default()
    };

    App::new()
        // Sky-blue clear color behind the board
        .insert_resource(ClearColor(Color::srgb(0.75, 0.82, 0.90)))
        // Core plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        // Game systems
        .add_plugins(CorePlugin)
        .add_plugins(GamePlugin)
        .add_plugins(BoardSurfacePlugin)
        .add_plugins(PiecesPlugin)
        .add_plugins(GuidesPlugin)
        .add_plugins(WeatherPlugin)
        .add_plugins(UiPlugin)
        // Startup systems
        .add_systems(Startup, setup_scene)
        .run();
}

fn setup_scene(mut commands: Commands) {
    // Camera looking down on the board from behind White
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Lighting
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 5_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
