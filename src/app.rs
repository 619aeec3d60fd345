use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::clock::TICKS_PER_SECOND;
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::world::GameWorld;

/// Upper bound on simulation steps per frame so a stalled terminal
/// cannot trigger a burst of catch-up ticks.
const MAX_TICKS_PER_FRAME: u32 = 5;

const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND);

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    config: GameConfig,
    world: GameWorld,
    /// Frames info
    frame_count: u64,
    last_frame_time: Instant,
    fps: u32,
    /// Unsimulated time carried between frames
    lag: Duration,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`] showing the title screen.
    pub fn new(config: GameConfig, reports_release: bool) -> Self {
        let audio_manager = match AudioManager::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("No audio output available: {err}");
                None
            }
        };

        Self {
            running: true,
            game_state: GameState::Title,
            world: GameWorld::new(config.clone()),
            config,
            frame_count: 0,
            last_frame_time: Instant::now(),
            fps: 0,
            lag: Duration::ZERO,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            self.frame_count += 1;

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    world: &self.world,
                    area: frame.area(),
                    frame_count: self.frame_count,
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(&self.game_state)?;
            let actions = self.input_manager.get_actions(&self.game_state);
            self.process_actions(&actions);

            self.advance(frame_time);

            // Small sleep to prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    /// Runs the ticks owed for `frame_time`. Returns how many ran.
    fn advance(&mut self, frame_time: Duration) -> u32 {
        if self.game_state != GameState::Playing {
            // Time spent on menus or paused never reaches the simulation
            self.lag = Duration::ZERO;
            return 0;
        }

        self.lag += frame_time;
        let mut steps = 0;
        while self.lag >= TICK_DURATION && steps < MAX_TICKS_PER_FRAME {
            self.lag -= TICK_DURATION;
            self.update_game();
            steps += 1;
            if self.game_state != GameState::Playing {
                break;
            }
        }
        if steps == MAX_TICKS_PER_FRAME {
            self.lag = Duration::ZERO;
        }

        // A tap has to move Cupid at least once before it is let go
        if steps > 0 {
            self.input_manager.release_taps();
        }
        steps
    }

    /// Process input actions and update game state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction]) {
        let mut dx = 0;
        let mut dy = 0;

        for action in actions {
            match action {
                InputAction::Quit => {
                    log::info!("Quit requested");
                    self.running = false;
                }
                InputAction::NewGame | InputAction::Restart => {
                    self.start_round();
                }
                InputAction::ShowHelp => {
                    self.game_state = GameState::HowToPlay;
                }
                InputAction::ShowAbout => {
                    self.game_state = GameState::About;
                }
                InputAction::Back => {
                    self.game_state = GameState::Title;
                }
                InputAction::Pause => {
                    log::debug!("Paused at {}s", self.world.clock().elapsed_secs());
                    self.game_state = GameState::Paused;
                }
                InputAction::Resume => {
                    self.game_state = GameState::Playing;
                }
                InputAction::MainMenu => {
                    self.world = GameWorld::new(self.config.clone());
                    self.game_state = GameState::Title;
                }
                InputAction::MoveLeft => dx -= 1,
                InputAction::MoveRight => dx += 1,
                InputAction::MoveUp => dy -= 1,
                InputAction::MoveDown => dy += 1,
                InputAction::Shoot => {
                    if self.game_state == GameState::Playing && self.world.shoot() {
                        self.play_arrow_sound();
                    }
                }
            }
        }

        if self.game_state == GameState::Playing {
            self.world.steer(dx, dy);
        }
    }

    fn start_round(&mut self) {
        log::info!("Starting a new round");
        self.world = GameWorld::new(self.config.clone());
        self.game_state = GameState::Playing;
        self.lag = Duration::ZERO;
    }

    /// Advances the world by one tick
    fn update_game(&mut self) {
        let report = self.world.tick();

        // Autopilot arrows get the same sound as manual ones
        if report.arrows_fired > 0 {
            self.play_arrow_sound();
        }

        if let Some(outcome) = self.world.outcome() {
            self.game_state = GameState::GameOver(outcome);
        }
    }

    fn play_arrow_sound(&self) {
        if let Some(audio) = &self.audio_manager {
            audio.play_arrow_sound();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Outcome;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app() -> App {
        App::new(GameConfig::default(), true)
    }

    #[test]
    fn test_menu_flow() {
        let mut app = app();
        assert_eq!(app.game_state(), GameState::Title);

        app.process_actions(&[InputAction::ShowHelp]);
        assert_eq!(app.game_state(), GameState::HowToPlay);
        app.process_actions(&[InputAction::Back]);
        assert_eq!(app.game_state(), GameState::Title);

        app.process_actions(&[InputAction::ShowAbout]);
        assert_eq!(app.game_state(), GameState::About);
        app.process_actions(&[InputAction::Back]);
        assert_eq!(app.game_state(), GameState::Title);

        app.process_actions(&[InputAction::NewGame]);
        assert_eq!(app.game_state(), GameState::Playing);
        app.process_actions(&[InputAction::Pause]);
        assert_eq!(app.game_state(), GameState::Paused);
        app.process_actions(&[InputAction::Resume]);
        assert_eq!(app.game_state(), GameState::Playing);
    }

    #[test]
    fn test_opposite_moves_cancel() {
        let mut app = app();
        app.process_actions(&[InputAction::NewGame]);
        app.process_actions(&[InputAction::MoveLeft, InputAction::MoveRight, InputAction::MoveUp]);
        assert_eq!(app.world().cupid.dx, 0);
        assert_eq!(app.world().cupid.dy, -1);

        // Releasing every key stops Cupid
        app.process_actions(&[]);
        assert_eq!(app.world().cupid.dy, 0);
    }

    #[test]
    fn test_shoot_only_while_playing() {
        let mut app = app();
        app.process_actions(&[InputAction::Shoot]);
        assert!(app.world().arrows.is_empty());

        app.process_actions(&[InputAction::NewGame, InputAction::Shoot]);
        assert_eq!(app.world().arrows.len(), 1);
    }

    #[test]
    fn test_game_over_follows_world_outcome() {
        let mut app = app();
        app.process_actions(&[InputAction::NewGame]);
        app.world.cupid.strength = 0;
        app.update_game();
        assert_eq!(app.game_state(), GameState::GameOver(Outcome::Lost));

        app.process_actions(&[InputAction::Restart]);
        assert_eq!(app.game_state(), GameState::Playing);
        assert_eq!(app.world().outcome(), None);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.process_actions(&[InputAction::Quit]);
        assert!(!app.running);
    }

    #[test]
    fn test_tap_moves_cupid_after_tickless_frame() {
        let mut app = App::new(GameConfig::default(), false);
        app.process_actions(&[InputAction::NewGame]);
        app.world.cupid.x = 10;
        let press = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        app.input_manager
            .handle_key_event(press, &GameState::Playing);

        // Frame 1: the tap arrives, but too little time passed for a tick
        let actions = app.input_manager.get_actions(&app.game_state);
        app.process_actions(&actions);
        assert_eq!(app.advance(Duration::ZERO), 0);

        // Frame 2: no new events, one tick is due
        let actions = app.input_manager.get_actions(&app.game_state);
        app.process_actions(&actions);
        assert_eq!(app.advance(TICK_DURATION), 1);
        assert_eq!(app.world().cupid.x, 11);

        // The tick used the tap, so the next frame stands still
        let actions = app.input_manager.get_actions(&app.game_state);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_no_ticks_outside_play() {
        let mut app = app();
        assert_eq!(app.advance(TICK_DURATION * 3), 0);
        app.process_actions(&[InputAction::NewGame, InputAction::Pause]);
        assert_eq!(app.advance(TICK_DURATION * 3), 0);
        assert_eq!(app.world().clock().ticks(), 0);
    }
}
