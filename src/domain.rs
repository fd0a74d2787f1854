pub mod delivery;
pub mod ports;
