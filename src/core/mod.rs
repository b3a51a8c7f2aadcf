//! Core engine types: players and deterministic RNG.

pub mod player;
pub mod rng;

pub use player::Side;
pub use rng::GameRng;
