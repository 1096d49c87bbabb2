pub mod character;
pub mod fire;
pub mod health;
pub mod network;
pub mod projectile;
