use rand::Rng;

use super::sprite::Sprite;

pub const HUMAN_WIDTH: u16 = 3;
pub const HUMAN_HEIGHT: u16 = 3;
pub const BOSS_WIDTH: u16 = 5;
pub const BOSS_HEIGHT: u16 = 4;

pub const MIN_HUMAN_STRENGTH: u32 = 30;
pub const MAX_HUMAN_STRENGTH: u32 = 40;
pub const MAX_HUMAN_SPEED: u8 = 5;
pub const LACKEY_STRENGTH: u32 = 50;
pub const BOSS_STRENGTH: u32 = 50;
pub const BOSS_HEALTH: u32 = 3000;

/// Ticks per step at speed 1; faster humans divide it.
const HUMAN_STEP_BASE: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanKind {
    Normal,
    Boss,
    Lackey,
}

#[derive(Debug, Clone)]
pub struct Human {
    pub x: u16,
    pub y: u16,
    pub kind: HumanKind,
    /// Damage dealt to Cupid on contact
    pub strength: u32,
    pub health: u32,
    pub speed: u8,
    pub moving_right: bool,
    pub step_counter: u8,
    pub damage_flash_frames: u8,
    /// Alternate look for normal humans and lackeys
    pub variant: bool,
}

impl Human {
    pub fn new(x: u16, y: u16, kind: HumanKind, speed: u8, moving_right: bool) -> Self {
        let (strength, health) = match kind {
            HumanKind::Normal => (MIN_HUMAN_STRENGTH, MIN_HUMAN_STRENGTH),
            HumanKind::Lackey => (LACKEY_STRENGTH, LACKEY_STRENGTH),
            HumanKind::Boss => (BOSS_STRENGTH, BOSS_HEALTH),
        };

        Self {
            x,
            y,
            kind,
            strength,
            health,
            speed: speed.clamp(1, MAX_HUMAN_SPEED),
            moving_right,
            step_counter: 0,
            damage_flash_frames: 0,
            variant: false,
        }
    }

    /// Builds a human with randomized speed, direction and (for normal
    /// humans) strength.
    pub fn spawn<R: Rng>(rng: &mut R, x: u16, y: u16, kind: HumanKind) -> Self {
        let speed = rng.random_range(1..=MAX_HUMAN_SPEED);
        let mut human = Self::new(x, y, kind, speed, rng.random_bool(0.5));
        if kind == HumanKind::Normal {
            let strength = rng.random_range(MIN_HUMAN_STRENGTH..=MAX_HUMAN_STRENGTH);
            human.strength = strength;
            human.health = strength;
        }
        human.variant = rng.random_bool(0.5);
        human
    }

    /// Ticks between one-cell steps.
    pub fn step_interval(&self) -> u8 {
        (HUMAN_STEP_BASE / self.speed).max(1)
    }

    /// Walks left or right, turning around at the field edges.
    pub fn update(&mut self, field_width: u16) {
        if self.damage_flash_frames > 0 {
            self.damage_flash_frames -= 1;
        }

        self.step_counter += 1;
        if self.step_counter < self.step_interval() {
            return;
        }
        self.step_counter = 0;

        let width = self.get_width();
        if self.moving_right {
            if self.x + 1 + width <= field_width {
                self.x += 1;
            } else {
                self.moving_right = false;
            }
        } else if self.x > 0 {
            self.x -= 1;
        } else {
            self.moving_right = true;
        }
    }

    /// Returns true if this damage is what made the human fall in love.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        // The boss hits just as hard no matter how wounded it is
        if self.kind != HumanKind::Boss {
            self.strength = self.strength.saturating_sub(damage);
        }
        self.damage_flash_frames = 10;
        !self.is_alive()
    }

    pub fn is_flashing(&self) -> bool {
        self.damage_flash_frames > 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_boss(&self) -> bool {
        self.kind == HumanKind::Boss
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        match (self.kind, self.variant) {
            (HumanKind::Boss, _) => vec!["\\_O_/", "  |  ", " [#] ", " / \\ "],
            (_, false) => vec![" o ", "/|\\", "/ \\"],
            (_, true) => vec![" o ", "/|\\", "/A\\"],
        }
    }

    pub fn get_width(&self) -> u16 {
        match self.kind {
            HumanKind::Boss => BOSS_WIDTH,
            _ => HUMAN_WIDTH,
        }
    }

    pub fn get_height(&self) -> u16 {
        match self.kind {
            HumanKind::Boss => BOSS_HEIGHT,
            _ => HUMAN_HEIGHT,
        }
    }
}

impl Sprite for Human {
    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    fn size(&self) -> (u16, u16) {
        (self.get_width(), self.get_height())
    }

    fn is_visible(&self) -> bool {
        self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_human_presets_by_kind() {
        let normal = Human::new(10, 10, HumanKind::Normal, 1, true);
        assert_eq!(normal.strength, 30);
        assert_eq!(normal.health, 30);

        let lackey = Human::new(10, 10, HumanKind::Lackey, 1, true);
        assert_eq!(lackey.strength, 50);
        assert_eq!(lackey.health, 50);

        let boss = Human::new(10, 10, HumanKind::Boss, 1, true);
        assert_eq!(boss.strength, 50);
        assert_eq!(boss.health, 3000);
        assert_eq!(boss.get_width(), BOSS_WIDTH);
        assert_eq!(boss.get_height(), BOSS_HEIGHT);
    }

    #[test]
    fn test_spawned_normal_human_stats_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let human = Human::spawn(&mut rng, 50, 5, HumanKind::Normal);
            assert!((MIN_HUMAN_STRENGTH..=MAX_HUMAN_STRENGTH).contains(&human.strength));
            assert_eq!(human.health, human.strength);
            assert!((1..=MAX_HUMAN_SPEED).contains(&human.speed));
        }
    }

    #[test]
    fn test_take_damage_reduces_health_and_strength() {
        let mut human = Human::new(10, 10, HumanKind::Normal, 1, true);
        assert!(!human.take_damage(10));
        assert_eq!(human.health, 20);
        assert_eq!(human.strength, 20);
        assert!(human.is_flashing());

        assert!(human.take_damage(100));
        assert_eq!(human.health, 0);
        assert_eq!(human.strength, 0);
        assert!(!human.is_alive());

        // Already in love, no second kill
        assert!(!human.take_damage(10));
    }

    #[test]
    fn test_boss_strength_is_constant() {
        let mut boss = Human::new(10, 10, HumanKind::Boss, 1, true);
        boss.take_damage(1000);
        assert_eq!(boss.health, 2000);
        assert_eq!(boss.strength, BOSS_STRENGTH);
    }

    #[test]
    fn test_human_steps_on_interval() {
        let mut human = Human::new(10, 10, HumanKind::Normal, 5, true);
        assert_eq!(human.step_interval(), 3);
        human.update(96);
        human.update(96);
        assert_eq!(human.x, 10);
        human.update(96);
        assert_eq!(human.x, 11);
    }

    #[test]
    fn test_slow_human_keeps_pace_over_long_runs() {
        let mut human = Human::new(10, 10, HumanKind::Normal, 1, true);
        assert_eq!(human.step_interval(), 15);
        for _ in 0..300 {
            human.update(200);
        }
        assert_eq!(human.x, 30);
    }

    #[test]
    fn test_human_bounces_at_right_edge() {
        let mut human = Human::new(93, 10, HumanKind::Normal, 5, true);
        for _ in 0..3 {
            human.update(96);
        }
        assert_eq!(human.x, 93);
        assert!(!human.moving_right);

        for _ in 0..3 {
            human.update(96);
        }
        assert_eq!(human.x, 92);
    }

    #[test]
    fn test_human_bounces_at_left_edge() {
        let mut human = Human::new(0, 10, HumanKind::Lackey, 5, false);
        for _ in 0..3 {
            human.update(96);
        }
        assert_eq!(human.x, 0);
        assert!(human.moving_right);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_human_stays_in_field(
                start_x in 0u16..91,
                speed in 1u8..=5,
                moving_right in any::<bool>(),
                boss in any::<bool>(),
                ticks in 0usize..2000,
            ) {
                let kind = if boss { HumanKind::Boss } else { HumanKind::Normal };
                let mut human = Human::new(start_x, 5, kind, speed, moving_right);
                for _ in 0..ticks {
                    human.update(96);
                }
                prop_assert!(human.x + human.get_width() <= 96);
            }

            #[test]
            fn test_human_health_never_increases(
                damage_amounts in prop::collection::vec(0u32..60, 0..10)
            ) {
                let mut human = Human::new(10, 10, HumanKind::Lackey, 1, true);
                let initial = human.health;
                for damage in damage_amounts {
                    human.take_damage(damage);
                }
                prop_assert!(human.health <= initial);
                prop_assert!(human.strength <= LACKEY_STRENGTH);
            }
        }
    }
}
