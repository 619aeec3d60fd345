/// Integration tests for game logic
///
/// These tests drive a seeded world through whole rounds and check the
/// timed spawns, power-up windows and win/lose conditions together.
use cupids_arrow::clock::TICKS_PER_SECOND;
use cupids_arrow::{
    Cupid, GameConfig, GameWorld, Human, HumanKind, Outcome, PowerUp, PowerUpKind,
};

/// Config with every random spawn pushed past the end of the round.
fn quiet_config() -> GameConfig {
    GameConfig {
        initial_humans: 0,
        wave_size: 0,
        boss_at_secs: 1000,
        power_up_interval_secs: 1000,
        ..GameConfig::default()
    }
}

fn world_with(config: GameConfig, cupid: Cupid) -> GameWorld {
    let mut world = GameWorld::with_seed(config, 7);
    world.cupid = cupid;
    world
}

fn run_ticks(world: &mut GameWorld, ticks: u64) {
    for _ in 0..ticks {
        world.tick();
    }
}

fn count(world: &GameWorld, kind: HumanKind) -> usize {
    world.humans.iter().filter(|h| h.kind == kind).count()
}

#[test]
fn test_surviving_the_round_wins() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 100));

    run_ticks(&mut world, 60 * TICKS_PER_SECOND - 1);
    assert_eq!(world.outcome(), None);

    world.tick();
    assert_eq!(world.outcome(), Some(Outcome::Won));
    assert_eq!(world.status().elapsed_secs, 60);

    // A finished world stays finished
    assert!(!world.shoot());
    run_ticks(&mut world, TICKS_PER_SECOND);
    assert_eq!(world.clock().elapsed_secs(), 60);
}

#[test]
fn test_losing_all_strength_loses() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 30));
    world
        .humans
        .push(Human::new(12, 10, HumanKind::Lackey, 1, false));

    world.tick();
    assert!(!world.cupid.is_alive());

    world.tick();
    assert_eq!(world.outcome(), Some(Outcome::Lost));
}

#[test]
fn test_waves_arrive_every_five_seconds() {
    let config = GameConfig {
        wave_size: 3,
        ..quiet_config()
    };
    let mut world = world_with(config, Cupid::new(10, 10, 100));

    run_ticks(&mut world, 5 * TICKS_PER_SECOND - 1);
    assert!(world.humans.is_empty());

    world.tick();
    assert_eq!(count(&world, HumanKind::Normal), 3);
    // Waves always land in the right half
    assert!(world.humans.iter().all(|h| h.x >= world.field().width / 2));
}

#[test]
fn test_boss_then_lackeys() {
    let config = GameConfig {
        boss_at_secs: 30,
        ..quiet_config()
    };
    // Top row, well clear of the boss' rows
    let mut world = world_with(config, Cupid::new(10, 0, 100));

    run_ticks(&mut world, 30 * TICKS_PER_SECOND);
    assert_eq!(count(&world, HumanKind::Boss), 1);
    assert!(world.has_boss());
    assert!(world.status().frenzy);

    run_ticks(&mut world, 5 * TICKS_PER_SECOND - 1);
    assert_eq!(count(&world, HumanKind::Lackey), 0);

    world.tick();
    assert_eq!(count(&world, HumanKind::Lackey), 3);
    assert_eq!(count(&world, HumanKind::Boss), 1);
}

#[test]
fn test_power_up_disappears_when_ignored() {
    let config = GameConfig {
        power_up_interval_secs: 10,
        ..quiet_config()
    };
    // Far right, power-ups only appear in the left half
    let mut world = world_with(config, Cupid::new(91, 0, 100));

    run_ticks(&mut world, 10 * TICKS_PER_SECOND);
    assert_eq!(world.power_ups.len(), 1);

    run_ticks(&mut world, 4 * TICKS_PER_SECOND);
    assert_eq!(world.power_ups.len(), 1);

    run_ticks(&mut world, TICKS_PER_SECOND);
    assert!(world.power_ups.is_empty());
    assert_eq!(world.effects().total_collected(), 0);
}

#[test]
fn test_snowflake_stops_the_round_clock() {
    let config = GameConfig {
        wave_size: 3,
        ..quiet_config()
    };
    let mut world = world_with(config, Cupid::new(10, 10, 100));
    world
        .power_ups
        .push(PowerUp::new(10, 10, PowerUpKind::Snowflake, 300));

    world.tick();
    assert!(world.is_frozen());
    assert_eq!(world.clock().round_ticks(), 1);

    run_ticks(&mut world, 3 * TICKS_PER_SECOND);
    assert!(!world.is_frozen());
    assert_eq!(world.clock().round_ticks(), 1);

    // The first wave is late by exactly the frozen time
    run_ticks(&mut world, 5 * TICKS_PER_SECOND - 2);
    assert!(world.humans.is_empty());
    world.tick();
    assert_eq!(count(&world, HumanKind::Normal), 3);
}

#[test]
fn test_heart_doubles_arrow_strength() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 100));
    world
        .power_ups
        .push(PowerUp::new(10, 10, PowerUpKind::Heart, 300));

    let report = world.tick();
    assert_eq!(report.power_ups_collected, 1);
    assert_eq!(world.cupid.strength, 200);
    assert_eq!(world.effects().collected(PowerUpKind::Heart), 1);

    assert!(world.shoot());
    assert_eq!(world.arrows[0].damage, 200);
}

#[test]
fn test_autopilot_fires_without_input() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 100));
    world
        .power_ups
        .push(PowerUp::new(10, 10, PowerUpKind::Autopilot, 300));

    let mut fired = 0;
    for _ in 0..4 * TICKS_PER_SECOND {
        fired += world.tick().arrows_fired;
    }

    assert!(fired > 0);
    assert!(!world.effects().is_active(PowerUpKind::Autopilot));

    // Nothing more once the window has closed
    let after: u32 = (0..TICKS_PER_SECOND).map(|_| world.tick().arrows_fired).sum();
    assert_eq!(after, 0);
}

#[test]
fn test_shooting_a_wave_scores() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 100));
    for x in [30, 50, 70] {
        world
            .humans
            .push(Human::new(x, 10, HumanKind::Normal, 1, false));
    }

    for _ in 0..3 {
        world.shoot();
        run_ticks(&mut world, TICKS_PER_SECOND);
    }

    assert!(world.humans.is_empty());
    assert_eq!(world.status().score, 3);
}

#[test]
fn test_boss_falling_in_love_ends_frenzy() {
    let config = GameConfig {
        boss_at_secs: 30,
        ..quiet_config()
    };
    let mut world = world_with(config, Cupid::new(10, 0, 100));

    run_ticks(&mut world, 30 * TICKS_PER_SECOND);
    assert!(world.has_boss());

    // Line up with the boss and hit it hard enough to end it in one arrow
    world.cupid = Cupid::new(10, 11, 5000);
    assert!(world.shoot());
    run_ticks(&mut world, TICKS_PER_SECOND);

    assert_eq!(count(&world, HumanKind::Boss), 0);
    assert!(!world.has_boss());
    assert!(!world.status().frenzy);
    assert_eq!(world.status().score, 1);

    // No lackeys once the boss is gone
    run_ticks(&mut world, 6 * TICKS_PER_SECOND);
    assert_eq!(count(&world, HumanKind::Lackey), 0);
}

#[test]
fn test_dolphin_speeds_cupid_up_until_it_wears_off() {
    let mut world = world_with(quiet_config(), Cupid::new(10, 10, 100));
    world
        .power_ups
        .push(PowerUp::new(10, 10, PowerUpKind::Dolphin, 300));

    world.tick();
    assert!(world.cupid.fast);

    // One cell every tick while fast
    world.steer(1, 0);
    run_ticks(&mut world, 30);
    assert_eq!(world.cupid.x, 40);

    world.steer(0, 0);
    run_ticks(&mut world, 8 * TICKS_PER_SECOND);
    assert!(!world.cupid.fast);
    assert!(!world.effects().is_active(PowerUpKind::Dolphin));

    // Back to one cell every other tick
    world.steer(-1, 0);
    run_ticks(&mut world, 20);
    assert_eq!(world.cupid.x, 30);
}
