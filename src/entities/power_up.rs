use crate::config::GameConfig;

use super::sprite::Sprite;

pub const POWER_UP_WIDTH: u16 = 3;
pub const POWER_UP_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Doubles Cupid's strength
    Heart,
    /// Immortality
    Wings,
    /// Faster movement
    Dolphin,
    /// Automatic fire
    Autopilot,
    /// Freezes the humans and the round clock
    Snowflake,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Heart,
        PowerUpKind::Wings,
        PowerUpKind::Dolphin,
        PowerUpKind::Autopilot,
        PowerUpKind::Snowflake,
    ];

    /// Maps a roll in `1..=100` to a kind. Dolphins are the common drop,
    /// hearts the rarest.
    pub fn from_roll(v: u32) -> Self {
        if v.is_multiple_of(10) && v <= 50 {
            PowerUpKind::Snowflake
        } else if v.is_multiple_of(3) {
            PowerUpKind::Wings
        } else if v.is_multiple_of(5) {
            PowerUpKind::Autopilot
        } else if v.is_multiple_of(8) && v <= 50 {
            PowerUpKind::Heart
        } else {
            PowerUpKind::Dolphin
        }
    }

    /// Length of the effect window, `None` for instant effects.
    pub fn duration_secs(&self, config: &GameConfig) -> Option<u32> {
        match self {
            PowerUpKind::Heart => None,
            PowerUpKind::Wings => Some(config.wings_secs),
            PowerUpKind::Dolphin => Some(config.dolphin_secs),
            PowerUpKind::Autopilot => Some(config.autopilot_secs),
            PowerUpKind::Snowflake => Some(config.snowflake_secs),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PowerUpKind::Heart => 0,
            PowerUpKind::Wings => 1,
            PowerUpKind::Dolphin => 2,
            PowerUpKind::Autopilot => 3,
            PowerUpKind::Snowflake => 4,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::Heart => "Heart",
            PowerUpKind::Wings => "Wings",
            PowerUpKind::Dolphin => "Dolphin",
            PowerUpKind::Autopilot => "Autopilot",
            PowerUpKind::Snowflake => "Snowflake",
        }
    }

    pub fn get_char(&self) -> char {
        match self {
            PowerUpKind::Heart => '♥',
            PowerUpKind::Wings => 'W',
            PowerUpKind::Dolphin => 'D',
            PowerUpKind::Autopilot => 'A',
            PowerUpKind::Snowflake => '*',
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub x: u16,
    pub y: u16,
    pub kind: PowerUpKind,
    /// Round-clock ticks left before it disappears uncollected
    pub idle_ticks_left: u64,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(x: u16, y: u16, kind: PowerUpKind, idle_ticks: u64) -> Self {
        Self {
            x,
            y,
            kind,
            idle_ticks_left: idle_ticks,
            collected: false,
        }
    }

    pub fn update(&mut self) {
        self.idle_ticks_left = self.idle_ticks_left.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.idle_ticks_left == 0
    }

    pub fn get_sprite(&self) -> String {
        format!("[{}]", self.kind.get_char())
    }
}

impl Sprite for PowerUp {
    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    fn size(&self) -> (u16, u16) {
        (POWER_UP_WIDTH, POWER_UP_HEIGHT)
    }

    fn is_visible(&self) -> bool {
        !self.collected && !self.is_expired()
    }
}
