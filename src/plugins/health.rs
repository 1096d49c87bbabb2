use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::preludes::combat_preludes::*;
use crate::preludes::network_preludes::{is_observer, NetworkRole};

pub struct HealthPlugin;
impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app
        .init_resource::<NetworkRole>()
        .add_event::<HealthNotice>()
        .add_observer(set_health_trigger)
        .add_observer(damage_trigger)
        .add_systems(PostUpdate, announce_replicated_health.run_if(is_observer));
    }
}

/// The only write path into [`Health`].
///
/// Every mutation is refused on a non-authoritative process: clients get their health through
/// replication and may not predict it locally. Each accepted write announces the stored value.
#[derive(SystemParam)]
pub struct HealthAuthority<'w, 's> {
    role: Res<'w, NetworkRole>,
    healths: Query<'w, 's, (&'static mut Health, Option<&'static Name>, Has<LocalPlayer>)>,
    notices: EventWriter<'w, HealthNotice>,
    commands: Commands<'w, 's>,
}

impl HealthAuthority<'_, '_> {
    /// Clamps `value` into the target's health range and stores it. Returns the stored value,
    /// or `None` when this process may not write or the entity has no health.
    pub fn set_current_health(&mut self, entity: Entity, value: f32) -> Option<f32> {
        if !self.role.is_authoritative() {
            debug!("ignoring health write on {entity}: not authoritative");
            return None;
        }

        let (mut health, name, local) = self.healths.get_mut(entity).ok()?;
        let stored = health.set_current(value);
        announce(&mut self.notices, entity, &health, name, local, true);

        Some(stored)
    }

    /// Subtracts the event's amount from the target's health and notifies the damage listeners.
    /// The returned health is the clamped, stored value.
    pub fn apply_damage(&mut self, event: &DamageEvent) -> Option<f32> {
        if !self.role.is_authoritative() {
            return None;
        }

        let current = self.healths.get(event.target).ok()?.0.current();
        let remaining = self.set_current_health(event.target, current - event.amount)?;

        self.commands.trigger_targets(
            DamageTaken {
                amount: event.amount,
                damage_type: event.damage_type,
                instigator: event.instigator,
                causer: event.causer,
                remaining,
            },
            event.target,
        );

        Some(remaining)
    }
}

fn set_health_trigger(trigger: Trigger<SetHealth>, mut authority: HealthAuthority) {
    let SetHealth(value) = *trigger.event();
    authority.set_current_health(trigger.target(), value);
}

fn damage_trigger(trigger: Trigger<DamageEvent>, mut authority: HealthAuthority) {
    let event = trigger.event();

    if let Some(remaining) = authority.apply_damage(event) {
        debug!("{} took {} damage, {remaining} left", event.target, event.amount);
    }
}

fn announce(
    notices: &mut EventWriter<HealthNotice>,
    entity: Entity,
    health: &Health,
    name: Option<&Name>,
    local: bool,
    authoritative: bool,
) {
    let current = health.current();
    let mut emit = |notice: HealthNotice| {
        info!("{notice}");
        notices.write(notice);
    };

    if local {
        emit(HealthNotice::Remaining { entity, health: current });

        if health.is_dead() {
            emit(HealthNotice::Died { entity });
        }
    }

    if authoritative {
        let name = name.map_or_else(|| entity.to_string(), |name| name.to_string());
        emit(HealthNotice::ServerReport { entity, name, health: current });
    }
}

/// Runs the local notification path for values that arrived through replication.
fn announce_replicated_health(
    healths: Query<(Entity, Ref<Health>, Option<&Name>, Has<LocalPlayer>)>,
    mut notices: EventWriter<HealthNotice>,
) {
    for (entity, health, name, local) in &healths {
        if !health.is_changed() || health.is_added() {
            continue;
        }

        announce(&mut notices, entity, &health, name, local, false);
    }
}
