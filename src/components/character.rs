use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use bevy_replicon::prelude::Replicated;

use super::fire::FireState;
use super::health::Health;
use crate::config::GameplayConfig;

#[derive(Component, Serialize, Deserialize, Debug)]
#[require(Health, FireState, Transform)]
#[require(Replicated)]
pub struct Character;

/// The character driven by this process' input.
#[derive(Component)]
pub struct LocalPlayer;

/// Server-side link between a character and the replicon client entity controlling it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedBy(pub Entity);

#[derive(Bundle)]
pub struct CharacterBundle {
    character: Character,
    health: Health,
    fire: FireState,
    transform: Transform,
    name: Name,
}

impl CharacterBundle {
    pub fn new(name: String, config: &GameplayConfig, translation: Vec3) -> Self {
        Self {
            character: Character,
            health: Health::new(config.max_health),
            fire: FireState::new(config.fire_rate),
            transform: Transform::from_translation(translation),
            name: Name::new(name),
        }
    }
}
