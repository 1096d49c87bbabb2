use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether this process owns the canonical copy of replicated gameplay state.
///
/// The server (or a single player session) is authoritative for every replicated entity,
/// clients only observe.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkRole {
    #[default]
    Authority,
    Observer,
}

impl NetworkRole {
    pub fn is_authoritative(&self) -> bool {
        *self == NetworkRole::Authority
    }
}

pub fn has_authority(role: Res<NetworkRole>) -> bool {
    role.is_authoritative()
}

pub fn is_observer(role: Res<NetworkRole>) -> bool {
    !role.is_authoritative()
}

/// Sent by the server to the client that controls the targeted character.
#[derive(Event, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PossessCharacter;
