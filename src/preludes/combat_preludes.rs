pub use crate::components::character::{Character, CharacterBundle, LocalPlayer, OwnedBy};
pub use crate::components::fire::{FireCommand, FireIntent, FireOrder, FirePhase, FireRequest, FireState};
pub use crate::components::health::{DamageEvent, DamageTaken, DamageType, Health, HealthNotice, SetHealth};
pub use crate::components::projectile::{Projectile, ProjectileImpact};
pub use crate::config::{GameplayConfig, ProjectileSpec};
