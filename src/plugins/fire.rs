use bevy::prelude::*;

use crate::components::fire::FireStart;
use crate::plugins::projectile::spawn_projectile;
use crate::preludes::combat_preludes::*;
use crate::preludes::network_preludes::{has_authority, NetworkRole};
use crate::CombatSet;

pub struct FirePlugin;
impl Plugin for FirePlugin {
    fn build(&self, app: &mut App) {
        app
        .init_resource::<NetworkRole>()
        .init_resource::<GameplayConfig>()
        .add_event::<FireRequest>()
        .add_observer(fire_intent_trigger)
        .add_observer(fire_order_trigger)
        .add_systems(Update, tick_fire_timers.run_if(has_authority).in_set(CombatSet::Fire));
    }
}

/// Records the local intent and routes it to whoever may act on it.
fn fire_intent_trigger(
    trigger: Trigger<FireIntent>,
    role: Res<NetworkRole>,
    mut states: Query<&mut FireState>,
    mut requests: EventWriter<FireRequest>,
    mut commands: Commands,
) {
    let character = trigger.target();
    let FireIntent(command) = *trigger.event();

    let Ok(mut state) = states.get_mut(character) else {
        return;
    };
    state.set_intent(command);

    if role.is_authoritative() {
        commands.trigger_targets(FireOrder(command), character);
    } else {
        requests.write(FireRequest(command));
    }
}

fn fire_order_trigger(
    trigger: Trigger<FireOrder>,
    role: Res<NetworkRole>,
    time: Res<Time>,
    config: Res<GameplayConfig>,
    mut shooters: Query<(&mut FireState, &Transform)>,
    mut commands: Commands,
) {
    if !role.is_authoritative() {
        return;
    }

    let character = trigger.target();
    let Ok((mut state, transform)) = shooters.get_mut(character) else {
        return;
    };

    match trigger.event().0 {
        FireCommand::Start => match state.begin(time.elapsed()) {
            FireStart::Immediate => {
                spawn_projectile(&mut commands, character, transform, &config.projectile);
            }
            FireStart::Deferred(cooldown) => {
                debug!("{character} still cooling down, first shot in {cooldown:?}");
            }
            FireStart::AlreadyFiring => {
                debug!("{character} is already firing");
            }
        },
        FireCommand::Stop => {
            if !state.cancel() {
                debug!("{character} was not firing");
            }
        }
    }
}

fn tick_fire_timers(
    time: Res<Time>,
    config: Res<GameplayConfig>,
    mut shooters: Query<(Entity, &mut FireState, &Transform)>,
    mut commands: Commands,
) {
    for (character, mut state, transform) in &mut shooters {
        if state.phase() == FirePhase::Idle {
            continue;
        }

        let due = state.tick(time.delta(), time.elapsed());
        for _ in 0..due {
            spawn_projectile(&mut commands, character, transform, &config.projectile);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::GamePlugin;

    const STEP: Duration = Duration::from_millis(100);

    fn app(role: NetworkRole, fire_rate: f32) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(role)
            .insert_resource(GameplayConfig {
                fire_rate,
                ..default()
            })
            .add_plugins(GamePlugin);

        let config = app.world().resource::<GameplayConfig>().clone();
        let character = app
            .world_mut()
            .spawn(CharacterBundle::new("Shooter".into(), &config, Vec3::ZERO))
            .id();
        app.update();

        (app, character)
    }

    fn step(app: &mut App) {
        app.world_mut().resource_mut::<Time>().advance_by(STEP);
        app.update();
    }

    fn fire(app: &mut App, character: Entity, command: FireCommand) {
        app.world_mut().trigger_targets(FireIntent(command), character);
        app.world_mut().flush();
    }

    fn projectiles(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Projectile>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn authority_spawns_on_start() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Start);

        assert_eq!(projectiles(&mut app), 1);
        let state = app.world().get::<FireState>(character).unwrap();
        assert_eq!(state.phase(), FirePhase::Firing);
        assert!(state.is_firing());
    }

    #[test]
    fn projectile_carries_instigator_and_damage() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Start);

        let projectile = app
            .world_mut()
            .query::<&Projectile>()
            .single(app.world())
            .unwrap()
            .clone();
        assert_eq!(projectile.instigator, character);
        assert_eq!(projectile.damage, 10.0);
        assert_eq!(projectile.damage_type, DamageType::Point);
    }

    #[test]
    fn observer_only_sends_a_request() {
        let (mut app, character) = app(NetworkRole::Observer, 0.5);

        fire(&mut app, character, FireCommand::Start);

        assert_eq!(projectiles(&mut app), 0);
        let state = app.world().get::<FireState>(character).unwrap();
        assert!(state.is_firing());
        assert_eq!(state.phase(), FirePhase::Idle);

        let sent: Vec<_> = app
            .world()
            .resource::<Events<FireRequest>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(sent, vec![FireRequest(FireCommand::Start)]);
    }

    #[test]
    fn observer_never_ticks_timers() {
        let (mut app, character) = app(NetworkRole::Observer, 0.5);

        fire(&mut app, character, FireCommand::Start);
        for _ in 0..10 {
            step(&mut app);
        }

        assert_eq!(projectiles(&mut app), 0);
    }

    #[test]
    fn duplicate_start_keeps_one_timer() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Start);
        fire(&mut app, character, FireCommand::Start);
        assert_eq!(projectiles(&mut app), 1);

        for _ in 0..5 {
            step(&mut app);
        }
        assert_eq!(projectiles(&mut app), 2);
    }

    #[test]
    fn stop_cancels_pending_shots() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Start);
        step(&mut app);
        fire(&mut app, character, FireCommand::Stop);

        assert_eq!(app.world().get::<FireState>(character).unwrap().phase(), FirePhase::Idle);
        for _ in 0..20 {
            step(&mut app);
        }
        assert_eq!(projectiles(&mut app), 1);
    }

    #[test]
    fn stop_while_idle_is_harmless() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Stop);
        step(&mut app);

        assert_eq!(projectiles(&mut app), 0);
        assert_eq!(app.world().get::<FireState>(character).unwrap().phase(), FirePhase::Idle);
    }

    #[test]
    fn despawned_character_stops_firing() {
        let (mut app, character) = app(NetworkRole::Authority, 0.5);

        fire(&mut app, character, FireCommand::Start);
        app.world_mut().despawn(character);
        for _ in 0..20 {
            step(&mut app);
        }

        assert_eq!(projectiles(&mut app), 1);
    }
}
