//! Weather overlays - cosmetic particle systems
//!
//! Rain, snow and heat shimmer are pure scene dressing: the particle set is
//! rebuilt only when the weather mode (or any cosmetic setting) changes,
//! and particle motion is advanced every rendered frame regardless of game
//! state. Particles carry no [`crate::game::PickShape`] marker, so pick
//! rays pass straight through them.

use bevy::prelude::*;
use rand::Rng;

use crate::core::{CosmeticConfig, WeatherMode};
use crate::game::GameSystems;

const RAIN_COUNT: usize = 500;
const SNOW_COUNT: usize = 300;
const HEAT_COUNT: usize = 60;

/// Half-extent of the particle volume around the board center.
const SPAWN_EXTENT: f32 = 6.0;
const CEILING: f32 = 9.0;
const FLOOR: f32 = 0.0;

/// Per-particle motion state
#[derive(Component, Debug)]
pub struct WeatherParticle {
    velocity: Vec3,
    /// Sideways sway amplitude; zero for straight fallers
    drift: f32,
    /// Phase offset so particles don't sway in lockstep
    phase: f32,
    home_x: f32,
}

/// Tear down and respawn the particle set for the active weather mode
pub fn rebuild_weather(
    mut commands: Commands,
    existing: Query<Entity, With<WeatherParticle>>,
    config: Res<CosmeticConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let mut rng = rand::rng();

    match config.weather {
        WeatherMode::None => {}
        WeatherMode::Rain => {
            let mesh = meshes.add(Cuboid::new(0.015, 0.35, 0.015));
            let material = materials.add(StandardMaterial {
                base_color: Color::srgba(0.55, 0.65, 0.90, 0.6),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            for _ in 0..RAIN_COUNT {
                let x = rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT);
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(
                        x,
                        rng.random_range(FLOOR..CEILING),
                        rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT),
                    ),
                    WeatherParticle {
                        velocity: Vec3::new(0.0, -rng.random_range(6.0..9.0), 0.0),
                        drift: 0.0,
                        phase: 0.0,
                        home_x: x,
                    },
                    Name::new("Rain Drop"),
                ));
            }
        }
        WeatherMode::Snow => {
            let mesh = meshes.add(Sphere::new(0.035));
            let material = materials.add(StandardMaterial {
                base_color: Color::srgb(0.95, 0.95, 1.0),
                unlit: true,
                ..default()
            });
            for _ in 0..SNOW_COUNT {
                let x = rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT);
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(
                        x,
                        rng.random_range(FLOOR..CEILING),
                        rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT),
                    ),
                    WeatherParticle {
                        velocity: Vec3::new(0.0, -rng.random_range(0.6..1.2), 0.0),
                        drift: 0.35,
                        phase: rng.random_range(0.0..std::f32::consts::TAU),
                        home_x: x,
                    },
                    Name::new("Snowflake"),
                ));
            }
        }
        WeatherMode::Heat => {
            let mesh = meshes.add(Sphere::new(0.10));
            let material = materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 0.60, 0.25, 0.12),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            for _ in 0..HEAT_COUNT {
                let x = rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT);
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(
                        x,
                        rng.random_range(FLOOR..CEILING),
                        rng.random_range(-SPAWN_EXTENT..SPAWN_EXTENT),
                    ),
                    WeatherParticle {
                        velocity: Vec3::new(0.0, rng.random_range(0.4..0.9), 0.0),
                        drift: 0.25,
                        phase: rng.random_range(0.0..std::f32::consts::TAU),
                        home_x: x,
                    },
                    Name::new("Heat Shimmer"),
                ));
            }
        }
    }

    if config.weather != WeatherMode::None {
        info!("[WEATHER] rebuilt {} overlay", config.weather.name());
    }
}

/// Advance particle motion every rendered frame
pub fn animate_weather(
    time: Res<Time>,
    mut particles: Query<(&mut Transform, &WeatherParticle)>,
) {
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (mut transform, particle) in particles.iter_mut() {
        transform.translation += particle.velocity * dt;
        if particle.drift > 0.0 {
            transform.translation.x =
                particle.home_x + (elapsed + particle.phase).sin() * particle.drift;
        }
        if transform.translation.y < FLOOR {
            transform.translation.y = CEILING;
        } else if transform.translation.y > CEILING {
            transform.translation.y = FLOOR;
        }
    }
}

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                rebuild_weather.run_if(resource_changed::<CosmeticConfig>),
                animate_weather,
            )
                .chain()
                .in_set(GameSystems::Visual),
        );
    }
}
