// Library exports for testing
pub use config::{ConfigError, GameConfig};
pub use entities::{
    Arrow, Cupid, Field, GameState, Human, HumanKind, Outcome, PowerUp, PowerUpKind, Sprite,
};
pub use world::{GameWorld, Status, TickReport};

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod effects;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod world;
