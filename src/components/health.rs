use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

/// Canonical health of a character.
///
/// Replicated from the authority to every observer. The current value is only ever written
/// through [`HealthAuthority`](crate::plugins::health::HealthAuthority) on the authoritative
/// side, which keeps it inside `[0, max]`; observers receive already clamped values.
#[derive(Component, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    max: f32,
    current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Health { max, current: max }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(max: f32, current: f32) -> Self {
        let mut health = Health::new(max);
        health.set_current(current);
        health
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Stores `value` clamped to `[0, max]` and returns what was stored. NaN counts as zero.
    pub(crate) fn set_current(&mut self, value: f32) -> f32 {
        self.current = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max)
        };
        self.current
    }
}

impl Default for Health {
    fn default() -> Self {
        Health::new(DEFAULT_MAX_HEALTH)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageType {
    #[default]
    Generic,
    Point,
}

/// A single damage application, consumed once by the target's health on the authority.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub amount: f32,
    pub damage_type: DamageType,
    pub instigator: Option<Entity>,
    pub causer: Option<Entity>,
    pub target: Entity,
}

impl DamageEvent {
    pub fn new(target: Entity, amount: f32) -> Self {
        Self {
            amount,
            damage_type: DamageType::Generic,
            instigator: None,
            causer: None,
            target,
        }
    }

    pub fn with_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn caused_by(mut self, instigator: Entity, causer: Entity) -> Self {
        self.instigator = Some(instigator);
        self.causer = Some(causer);
        self
    }
}

/// Request to overwrite a character's health, targeted at the character.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SetHealth(pub f32);

/// Broadcast to the damaged character's observers after the authority applied damage.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageTaken {
    pub amount: f32,
    pub damage_type: DamageType,
    pub instigator: Option<Entity>,
    pub causer: Option<Entity>,
    pub remaining: f32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum HealthNotice {
    Remaining { entity: Entity, health: f32 },
    Died { entity: Entity },
    ServerReport { entity: Entity, name: String, health: f32 },
}

impl std::fmt::Display for HealthNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthNotice::Remaining { health, .. } => write!(f, "You have {health} health remaining"),
            HealthNotice::Died { .. } => write!(f, "You have died"),
            HealthNotice::ServerReport { name, health, .. } => write!(f, "{name} has {health} health remaining"),
        }
    }
}
