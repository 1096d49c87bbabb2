pub mod combat_preludes;
pub mod network_preludes;
