use std::net::{IpAddr, Ipv4Addr};

use bevy::prelude::*;
use clap::{Parser, Subcommand};

use crate::components::fire::{DEFAULT_FIRE_RATE, MIN_FIRE_INTERVAL};
use crate::components::health::{DamageType, DEFAULT_MAX_HEALTH};

pub const PORT: u16 = 5000;
pub const DEFAULT_PROJECTILE_DAMAGE: f32 = 10.0;

#[derive(Parser, Resource, Debug, Clone, PartialEq)]
#[command(version, about = "Server authoritative arena shooter")]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    #[arg(long, default_value_t = DEFAULT_MAX_HEALTH)]
    pub max_health: f32,

    /// Seconds between two shots while the fire button is held
    #[arg(long, default_value_t = DEFAULT_FIRE_RATE, value_parser = parse_fire_rate)]
    pub fire_rate: f32,

    #[arg(long, default_value_t = DEFAULT_PROJECTILE_DAMAGE)]
    pub damage: f32,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Mode {
    SinglePlayer,
    Server {
        #[arg(short, long, default_value_t = PORT)]
        port: u16,
    },
    Client {
        #[arg(short, long, default_value_t = Ipv4Addr::LOCALHOST.into())]
        ip: IpAddr,

        #[arg(short, long, default_value_t = PORT)]
        port: u16,
    },
}

impl Default for Cli {
    fn default() -> Self {
        Self::parse()
    }
}

fn parse_fire_rate(value: &str) -> Result<f32, String> {
    let secs: f32 = value.parse().map_err(|err| format!("{err}"))?;
    if !secs.is_finite() || secs < MIN_FIRE_INTERVAL.as_secs_f32() {
        return Err(format!(
            "fire rate must be at least {}s",
            MIN_FIRE_INTERVAL.as_secs_f32()
        ));
    }
    Ok(secs)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpec {
    pub damage: f32,
    pub damage_type: DamageType,
    pub speed: f32,
    pub range: f32,
    pub muzzle_forward: f32,
    pub muzzle_up: f32,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            damage: DEFAULT_PROJECTILE_DAMAGE,
            damage_type: DamageType::Point,
            speed: 15.0,
            range: 40.0,
            muzzle_forward: 1.0,
            muzzle_up: 0.5,
        }
    }
}

/// Gameplay tunables shared by every character spawned in this session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameplayConfig {
    pub max_health: f32,
    pub fire_rate: f32,
    pub projectile: ProjectileSpec,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_MAX_HEALTH,
            fire_rate: DEFAULT_FIRE_RATE,
            projectile: ProjectileSpec::default(),
        }
    }
}

impl From<&Cli> for GameplayConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            max_health: cli.max_health,
            fire_rate: cli.fire_rate,
            projectile: ProjectileSpec {
                damage: cli.damage,
                ..default()
            },
        }
    }
}

impl FromWorld for GameplayConfig {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<Cli>()
            .map(GameplayConfig::from)
            .unwrap_or_default()
    }
}
