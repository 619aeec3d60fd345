mod arrow;
mod cupid;
mod game_state;
mod human;
mod power_up;
mod sprite;

// Re-export all public types
pub use arrow::{ARROW_HEIGHT, ARROW_WIDTH, Arrow};
pub use cupid::{CUPID_HEIGHT, CUPID_WIDTH, Cupid, MAX_CUPID_STRENGTH, MIN_CUPID_STRENGTH};
pub use game_state::{GameState, Outcome};
pub use human::{
    BOSS_HEALTH, BOSS_HEIGHT, BOSS_STRENGTH, BOSS_WIDTH, HUMAN_HEIGHT, HUMAN_WIDTH, Human,
    HumanKind, LACKEY_STRENGTH,
};
pub use power_up::{POWER_UP_HEIGHT, POWER_UP_WIDTH, PowerUp, PowerUpKind};
pub use sprite::{Field, Sprite};
