use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use bevy_replicon::prelude::Replicated;

use super::health::DamageType;

#[derive(Component, Serialize, Deserialize, Debug, Clone)]
#[require(Transform, Replicated)]
pub struct Projectile {
    #[entities]
    pub instigator: Entity,
    pub direction: Vec3,
    pub speed: f32,
    pub range: f32,
    pub traveled: f32,
    pub damage: f32,
    pub damage_type: DamageType,
    /// Set once the projectile has reported its hit.
    #[serde(skip)]
    pub spent: bool,
}

/// Reported by the collision backend when a projectile strikes an entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    pub target: Entity,
}
