use super::sprite::Sprite;

pub const ARROW_WIDTH: u16 = 3;
pub const ARROW_HEIGHT: u16 = 1;

#[derive(Debug, Clone)]
pub struct Arrow {
    pub x: u16,
    pub y: u16,
    /// Cupid's strength when the arrow was shot
    pub damage: u32,
    pub active: bool,
}

impl Arrow {
    pub fn new(x: u16, y: u16, damage: u32) -> Self {
        Self {
            x,
            y,
            damage,
            active: true,
        }
    }

    /// Flies `speed` cells to the right and drops out at the field edge.
    pub fn update(&mut self, speed: u16, field_width: u16) {
        if !self.active {
            return;
        }
        self.x = self.x.saturating_add(speed);
        if self.x + ARROW_WIDTH >= field_width {
            self.active = false;
        }
    }

    /// An arrow hits exactly one human.
    pub fn spend(&mut self) {
        self.damage = 0;
        self.active = false;
    }

    pub fn get_sprite(&self) -> &'static str {
        ">->"
    }
}

impl Sprite for Arrow {
    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    fn size(&self) -> (u16, u16) {
        (ARROW_WIDTH, ARROW_HEIGHT)
    }

    fn is_visible(&self) -> bool {
        self.active
    }
}
