//! The simulation: one `tick` advances every entity by 1/60 s, spawns on the
//! round clock, runs power-up windows and resolves collisions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{GameClock, secs_to_ticks};
use crate::config::GameConfig;
use crate::effects::EffectTracker;
use crate::entities::{
    Arrow, BOSS_HEIGHT, BOSS_WIDTH, Cupid, Field, HUMAN_HEIGHT, HUMAN_WIDTH, Human,
    HumanKind, Outcome, POWER_UP_HEIGHT, POWER_UP_WIDTH, PowerUp, PowerUpKind, Sprite,
};

/// Lackeys appear just left of the boss.
const LACKEY_GAP: u16 = 2;

/// What happened during one tick, for sound and scoring feedback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub arrows_fired: u32,
    pub humans_in_love: u32,
    pub cupid_hit: bool,
    pub power_ups_collected: u32,
}

/// Read-only HUD data.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub elapsed_secs: u32,
    pub round_secs: u32,
    pub score: u32,
    pub strength: u32,
    pub immortal: bool,
    pub frozen: bool,
    pub frenzy: bool,
    /// Timed effects with their remaining seconds, `None` when inactive
    pub effects: Vec<(PowerUpKind, Option<u32>)>,
    pub collected: Vec<(PowerUpKind, u32)>,
}

pub struct GameWorld {
    config: GameConfig,
    field: Field,
    rng: StdRng,
    clock: GameClock,
    effects: EffectTracker,
    pub cupid: Cupid,
    pub humans: Vec<Human>,
    pub arrows: Vec<Arrow>,
    pub power_ups: Vec<PowerUp>,
    /// Round second the living boss appeared at
    boss_spawned_at: Option<u32>,
    autopilot_counter: u32,
    outcome: Option<Outcome>,
}

impl GameWorld {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic world for tests and replays.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let field = Field::new(config.field_width, config.field_height);
        let cupid = Cupid::spawn(&mut rng, field);
        log::info!("Cupid's initial strength: {}", cupid.strength);

        let mut world = Self {
            config,
            field,
            rng,
            clock: GameClock::new(),
            effects: EffectTracker::new(),
            cupid,
            humans: Vec::new(),
            arrows: Vec::new(),
            power_ups: Vec::new(),
            boss_spawned_at: None,
            autopilot_counter: 0,
            outcome: None,
        };

        for _ in 0..world.config.initial_humans {
            world.spawn_human();
        }
        world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn effects(&self) -> &EffectTracker {
        &self.effects
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_frozen(&self) -> bool {
        self.effects.is_active(PowerUpKind::Snowflake)
    }

    pub fn has_boss(&self) -> bool {
        self.boss_spawned_at.is_some()
    }

    /// Held movement direction for the coming ticks.
    pub fn steer(&mut self, dx: i8, dy: i8) {
        self.cupid.steer(dx, dy);
    }

    /// Looses an arrow. Returns false once the round is over.
    pub fn shoot(&mut self) -> bool {
        if self.outcome.is_some() || !self.cupid.is_alive() {
            return false;
        }
        self.arrows.push(self.cupid.shoot());
        true
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.outcome.is_some() {
            return report;
        }

        let frozen = self.is_frozen();
        let new_second = self.clock.advance(frozen);

        if self.check_outcome() {
            return report;
        }

        if let Some(second) = new_second {
            self.spawn_timed(second);
        }

        self.update_effects(&mut report);
        self.move_sprites(frozen);
        self.resolve_collisions(&mut report);
        self.cleanup();

        report
    }

    pub fn status(&self) -> Status {
        let now = self.clock.ticks();
        let effects = [
            PowerUpKind::Wings,
            PowerUpKind::Dolphin,
            PowerUpKind::Autopilot,
            PowerUpKind::Snowflake,
        ]
        .into_iter()
        .map(|kind| (kind, self.effects.remaining_secs(kind, now)))
        .collect();
        let collected = PowerUpKind::ALL
            .into_iter()
            .map(|kind| (kind, self.effects.collected(kind)))
            .collect();

        Status {
            elapsed_secs: self.clock.elapsed_secs().min(self.config.round_secs),
            round_secs: self.config.round_secs,
            score: self.cupid.score,
            strength: self.cupid.strength,
            immortal: self.cupid.immortal,
            frozen: self.is_frozen(),
            frenzy: self.has_boss(),
            effects,
            collected,
        }
    }

    fn check_outcome(&mut self) -> bool {
        let outcome = if !self.cupid.is_alive() {
            log::info!("Cupid has lost all of his strength! Game over");
            Outcome::Lost
        } else if self.clock.elapsed_secs() >= self.config.round_secs {
            log::info!("{} seconds are up! Cupid wins", self.config.round_secs);
            Outcome::Won
        } else {
            return false;
        };
        log::info!("Final score: {}", self.cupid.score);
        self.outcome = Some(outcome);
        true
    }

    /// Spawns keyed to whole round seconds. Nothing spawns at the start or
    /// at the time limit.
    fn spawn_timed(&mut self, second: u32) {
        if second == 0 || second >= self.config.round_secs {
            return;
        }

        if second.is_multiple_of(self.config.wave_interval_secs) {
            for _ in 0..self.config.wave_size {
                self.spawn_human();
            }
            log::debug!("{second}s: spawned {} humans", self.config.wave_size);
        }

        if second.is_multiple_of(self.config.boss_at_secs) && !self.has_boss() {
            self.spawn_boss(second);
        }

        if let Some(boss_second) = self.boss_spawned_at
            && second > boss_second
            && (second - boss_second).is_multiple_of(self.config.lackey_interval_secs)
        {
            for _ in 0..self.config.lackey_count {
                self.spawn_lackey();
            }
            log::debug!("{second}s: spawned {} lackeys", self.config.lackey_count);
        }

        if second.is_multiple_of(self.config.power_up_interval_secs) {
            self.spawn_power_up();
        }
    }

    /// Normal humans appear somewhere in the right half.
    fn spawn_human(&mut self) {
        let min_x = self.field.width / 2;
        let max_x = self.field.max_x(HUMAN_WIDTH).max(min_x);
        let x = self.rng.random_range(min_x..=max_x);
        let y = self.rng.random_range(0..=self.field.max_y(HUMAN_HEIGHT));
        let human = Human::spawn(&mut self.rng, x, y, HumanKind::Normal);
        self.humans.push(human);
    }

    fn spawn_boss(&mut self, second: u32) {
        let x = self.field.max_x(BOSS_WIDTH);
        let y = self.field.max_y(BOSS_HEIGHT) / 2;
        let boss = Human::spawn(&mut self.rng, x, y, HumanKind::Boss);
        self.humans.push(boss);
        self.boss_spawned_at = Some(second);
        log::info!("A boss has appeared! Frenzy begins");
    }

    fn spawn_lackey(&mut self) {
        let x = self
            .field
            .max_x(HUMAN_WIDTH)
            .saturating_sub(BOSS_WIDTH + LACKEY_GAP);
        let y = self.rng.random_range(0..=self.field.max_y(HUMAN_HEIGHT));
        let lackey = Human::spawn(&mut self.rng, x, y, HumanKind::Lackey);
        self.humans.push(lackey);
    }

    /// One random power-up somewhere in the left half.
    fn spawn_power_up(&mut self) {
        let max_x = (self.field.width / 2).min(self.field.max_x(POWER_UP_WIDTH));
        let x = self.rng.random_range(0..=max_x);
        let y = self.rng.random_range(0..=self.field.max_y(POWER_UP_HEIGHT));
        let kind = PowerUpKind::from_roll(self.rng.random_range(1..=100));
        let idle_ticks = secs_to_ticks(self.config.power_up_idle_secs);
        self.power_ups.push(PowerUp::new(x, y, kind, idle_ticks));
        log::debug!("Spawned a {} at ({x}, {y})", kind.get_name());
    }

    fn update_effects(&mut self, report: &mut TickReport) {
        let now = self.clock.ticks();
        for kind in self.effects.expire(now) {
            match kind {
                PowerUpKind::Wings => self.cupid.set_immortal(false),
                PowerUpKind::Dolphin => self.cupid.set_fast(false),
                PowerUpKind::Autopilot => self.autopilot_counter = 0,
                PowerUpKind::Snowflake | PowerUpKind::Heart => {}
            }
            log::info!("{} effect has worn off", kind.get_name());
        }

        if self.effects.is_active(PowerUpKind::Autopilot) {
            let fire = self
                .autopilot_counter
                .is_multiple_of(self.config.autopilot_fire_interval);
            self.autopilot_counter = self.autopilot_counter.wrapping_add(1);
            if fire && self.shoot() {
                report.arrows_fired += 1;
            }
        }
    }

    /// Cupid and arrows always move; humans and idle power-ups wait while
    /// time is frozen.
    fn move_sprites(&mut self, frozen: bool) {
        let interval = if self.cupid.fast {
            self.config.fast_move_interval
        } else {
            self.config.cupid_move_interval
        };
        self.cupid.step(self.field, interval);

        for arrow in &mut self.arrows {
            arrow.update(self.config.arrow_speed, self.field.width);
        }

        if frozen {
            return;
        }
        for human in &mut self.humans {
            human.update(self.field.width);
        }
        for power_up in &mut self.power_ups {
            power_up.update();
        }
    }

    fn resolve_collisions(&mut self, report: &mut TickReport) {
        // Arrows hitting humans: each arrow lands on at most one human
        for arrow in &mut self.arrows {
            for human in &mut self.humans {
                if !arrow.collides_with(&*human) {
                    continue;
                }
                let fell_in_love = human.take_damage(arrow.damage);
                arrow.spend();
                if fell_in_love {
                    self.cupid.add_point();
                    report.humans_in_love += 1;
                    log::info!(
                        "Cupid's arrow made a human fall in love! Score: {}",
                        self.cupid.score
                    );
                }
                break;
            }
        }

        // Humans running into Cupid
        for human in &mut self.humans {
            if !self.cupid.collides_with(&*human) {
                continue;
            }
            if self.cupid.immortal {
                human.take_damage(self.cupid.strength);
            } else {
                let strength_before = self.cupid.strength;
                self.cupid.take_hit(human.strength);
                self.cupid
                    .bounce_from(human, self.field, self.config.bounce_distance);
                report.cupid_hit = true;
                log::info!(
                    "Cupid got hit by a human with strength {}, strength now {}",
                    human.strength,
                    self.cupid.strength
                );
                human.take_damage(strength_before);
            }
            if !self.cupid.is_alive() {
                break;
            }
        }

        // Cupid picking up power-ups
        let mut picked = Vec::new();
        for power_up in &mut self.power_ups {
            if self.cupid.collides_with(&*power_up) {
                power_up.collected = true;
                picked.push(power_up.kind);
            }
        }
        for kind in picked {
            self.apply_power_up(kind);
            report.power_ups_collected += 1;
        }
    }

    fn apply_power_up(&mut self, kind: PowerUpKind) {
        self.effects.record_collected(kind);
        match kind {
            PowerUpKind::Heart => self.cupid.double_strength(),
            PowerUpKind::Wings => self.cupid.set_immortal(true),
            PowerUpKind::Dolphin => self.cupid.set_fast(true),
            PowerUpKind::Autopilot => self.autopilot_counter = 0,
            PowerUpKind::Snowflake => {}
        }
        if let Some(secs) = kind.duration_secs(&self.config) {
            self.effects
                .activate(kind, self.clock.ticks(), secs_to_ticks(secs));
        }
        log::info!(
            "Cupid collected a {}! Strength: {}",
            kind.get_name(),
            self.cupid.strength
        );
    }

    fn cleanup(&mut self) {
        self.arrows.retain(|a| a.active);
        self.humans.retain(|h| h.is_alive());
        self.power_ups.retain(|p| p.is_visible());

        if self.boss_spawned_at.is_some() && !self.humans.iter().any(|h| h.is_boss()) {
            self.boss_spawned_at = None;
            log::info!("The boss fell in love. Frenzy is over");
        }
    }
}
