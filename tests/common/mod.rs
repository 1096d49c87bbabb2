#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use mp_arena::preludes::combat_preludes::*;
use mp_arena::preludes::network_preludes::NetworkRole;
use mp_arena::GamePlugin;

pub const STEP: Duration = Duration::from_millis(100);

/// Headless app with a manually driven clock.
pub fn app(role: NetworkRole, config: GameplayConfig) -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .insert_resource(role)
        .insert_resource(config)
        .add_plugins(GamePlugin);
    app
}

pub fn spawn_character(app: &mut App, name: &str, local: bool) -> Entity {
    let config = app.world().resource::<GameplayConfig>().clone();
    let mut entity = app
        .world_mut()
        .spawn(CharacterBundle::new(name.into(), &config, Vec3::ZERO));
    if local {
        entity.insert(LocalPlayer);
    }
    let id = entity.id();
    app.update();
    id
}

pub fn step(app: &mut App) {
    app.world_mut().resource_mut::<Time>().advance_by(STEP);
    app.update();
}

pub fn run_for(app: &mut App, duration: Duration) {
    let steps = duration.as_millis() / STEP.as_millis();
    for _ in 0..steps {
        step(app);
    }
}

/// Takes every notice emitted since the last call.
pub fn notices(app: &mut App) -> Vec<HealthNotice> {
    app.world_mut()
        .resource_mut::<Events<HealthNotice>>()
        .drain()
        .collect()
}

pub fn projectile_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&Projectile>()
        .iter(app.world())
        .count()
}
