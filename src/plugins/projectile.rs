use bevy::prelude::*;

use crate::preludes::combat_preludes::*;
use crate::preludes::network_preludes::{has_authority, NetworkRole};
use crate::CombatSet;

pub struct ProjectilePlugin;
impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app
        .init_resource::<NetworkRole>()
        .add_observer(projectile_impact_trigger)
        .add_systems(Update, advance_projectiles.run_if(has_authority).in_set(CombatSet::Projectiles));
    }
}

/// Spawns a projectile in front of `muzzle`, flying along its forward axis.
pub fn spawn_projectile(
    commands: &mut Commands,
    instigator: Entity,
    muzzle: &Transform,
    spec: &ProjectileSpec,
) -> Entity {
    let direction = muzzle.forward().as_vec3();
    let origin = muzzle.translation
        + direction * spec.muzzle_forward
        + muzzle.up().as_vec3() * spec.muzzle_up;

    commands
        .spawn((
            Projectile {
                instigator,
                direction,
                speed: spec.speed,
                range: spec.range,
                traveled: 0.0,
                damage: spec.damage,
                damage_type: spec.damage_type,
                spent: false,
            },
            Transform::from_translation(origin).with_rotation(muzzle.rotation),
            Name::new("Projectile"),
        ))
        .id()
}

fn advance_projectiles(
    time: Res<Time>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
) {
    for (entity, mut transform, mut projectile) in &mut projectiles {
        let delta = projectile.speed * time.delta_secs();
        projectile.traveled += delta;
        transform.translation += projectile.direction * delta;

        if projectile.traveled >= projectile.range {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Turns a reported hit into exactly one damage application against the struck entity.
fn projectile_impact_trigger(
    trigger: Trigger<ProjectileImpact>,
    role: Res<NetworkRole>,
    mut projectiles: Query<&mut Projectile>,
    mut commands: Commands,
) {
    if !role.is_authoritative() {
        return;
    }

    let ProjectileImpact { projectile: entity, target } = *trigger.event();
    let Ok(mut projectile) = projectiles.get_mut(entity) else {
        return;
    };

    if projectile.spent || target == projectile.instigator {
        return;
    }
    projectile.spent = true;

    commands.trigger(
        DamageEvent::new(target, projectile.damage)
            .with_type(projectile.damage_type)
            .caused_by(projectile.instigator, entity),
    );
    commands.entity(entity).try_despawn();
}
