use bevy::log::LogPlugin;
use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod plugins;
pub mod preludes;

use config::{Cli, GameplayConfig};
use plugins::fire::FirePlugin;
use plugins::health::HealthPlugin;
use plugins::network::NetworkPlugin;
use plugins::player::PlayerPlugin;
use plugins::projectile::ProjectilePlugin;

const LOG_FILTER: &str = "info,wgpu=error,naga=warn,mp_arena=debug";

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Fire,
    Projectiles,
}

/// Gameplay without windowing or transport, usable headless.
pub struct GamePlugin;
impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, (
            CombatSet::Input,
            CombatSet::Fire,
            CombatSet::Projectiles,
        ).chain())
        .add_plugins((
            HealthPlugin,
            FirePlugin,
            ProjectilePlugin,
            PlayerPlugin,
        ));
    }
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(LogPlugin {
            filter: LOG_FILTER.into(),
            ..default()
        }))
        .init_resource::<Cli>()
        .init_resource::<GameplayConfig>()
        .add_plugins((GamePlugin, NetworkPlugin));
    }
}
