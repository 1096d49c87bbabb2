pub mod fire;
pub mod health;
pub mod network;
pub mod player;
pub mod projectile;
