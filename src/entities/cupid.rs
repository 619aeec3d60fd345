use rand::Rng;

use super::arrow::{ARROW_HEIGHT, Arrow};
use super::human::Human;
use super::sprite::{Field, Sprite};

pub const CUPID_WIDTH: u16 = 5;
pub const CUPID_HEIGHT: u16 = 3;
pub const MIN_CUPID_STRENGTH: u32 = 100;
pub const MAX_CUPID_STRENGTH: u32 = 150;

#[derive(Debug, Clone)]
pub struct Cupid {
    pub x: u16,
    pub y: u16,
    /// Health and the damage dealt by each arrow
    pub strength: u32,
    pub score: u32,
    /// Held movement direction, each axis in -1..=1
    pub dx: i8,
    pub dy: i8,
    pub immortal: bool,
    pub fast: bool,
    pub move_counter: u32,
    pub damage_flash_frames: u8,
}

impl Cupid {
    pub fn new(x: u16, y: u16, strength: u32) -> Self {
        Self {
            x,
            y,
            strength,
            score: 0,
            dx: 0,
            dy: 0,
            immortal: false,
            fast: false,
            move_counter: 0,
            damage_flash_frames: 0,
        }
    }

    /// Cupid starts at the left edge on a random row with a random strength.
    pub fn spawn<R: Rng>(rng: &mut R, field: Field) -> Self {
        let y = rng.random_range(0..=field.max_y(CUPID_HEIGHT));
        let strength = rng.random_range(MIN_CUPID_STRENGTH..=MAX_CUPID_STRENGTH);
        Self::new(1, y, strength)
    }

    pub fn steer(&mut self, dx: i8, dy: i8) {
        self.dx = dx.signum();
        self.dy = dy.signum();
    }

    /// Moves one cell along the held direction every `interval` ticks,
    /// never leaving the field.
    pub fn step(&mut self, field: Field, interval: u32) {
        if self.damage_flash_frames > 0 {
            self.damage_flash_frames -= 1;
        }

        if self.dx == 0 && self.dy == 0 {
            self.move_counter = 0;
            return;
        }

        let should_move = self.move_counter.is_multiple_of(interval.max(1));
        self.move_counter = self.move_counter.wrapping_add(1);
        if !should_move {
            return;
        }

        match self.dx {
            -1 => self.x = self.x.saturating_sub(1),
            1 => self.x = (self.x + 1).min(field.max_x(CUPID_WIDTH)),
            _ => {}
        }
        match self.dy {
            -1 => self.y = self.y.saturating_sub(1),
            1 => self.y = (self.y + 1).min(field.max_y(CUPID_HEIGHT)),
            _ => {}
        }
    }

    /// Fires an arrow from the bow, carrying Cupid's current strength.
    pub fn shoot(&self) -> Arrow {
        let x = self.x + CUPID_WIDTH;
        let y = self.y + (CUPID_HEIGHT - ARROW_HEIGHT) / 2;
        Arrow::new(x, y, self.strength)
    }

    pub fn take_hit(&mut self, damage: u32) {
        self.strength = self.strength.saturating_sub(damage);
        self.damage_flash_frames = 10;
    }

    pub fn double_strength(&mut self) {
        self.strength = self.strength.saturating_mul(2);
    }

    pub fn set_immortal(&mut self, value: bool) {
        self.immortal = value;
    }

    pub fn set_fast(&mut self, value: bool) {
        self.fast = value;
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Knocks Cupid horizontally away from the human that hit him.
    pub fn bounce_from(&mut self, human: &Human, field: Field, distance: u16) {
        if self.x < human.x {
            self.x = self.x.saturating_sub(distance);
        } else {
            self.x = (self.x + distance).min(field.max_x(CUPID_WIDTH));
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.damage_flash_frames > 0
    }

    pub fn is_alive(&self) -> bool {
        self.strength > 0
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        if self.immortal {
            vec!["\\\\o//", " }|->", " / \\ "]
        } else {
            vec![" ,o, ", " }|->", " / \\ "]
        }
    }

    pub fn get_width(&self) -> u16 {
        CUPID_WIDTH
    }

    pub fn get_height(&self) -> u16 {
        CUPID_HEIGHT
    }
}

impl Sprite for Cupid {
    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    fn size(&self) -> (u16, u16) {
        (CUPID_WIDTH, CUPID_HEIGHT)
    }

    fn is_visible(&self) -> bool {
        self.is_alive()
    }
}
