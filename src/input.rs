use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GameState;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Shoot,
    NewGame,
    ShowHelp,
    ShowAbout,
    Back,
    Pause,
    Resume,
    Restart,
    MainMenu,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Without release events held keys would never let go, so they only
    /// last until a simulation tick has used them.
    reports_release: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        match key_event.kind {
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
            // Press and auto-repeat
            _ => {
                self.handle_key_press(key_event, game_state);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Quit works on every screen
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let action = match (game_state, key_event.code) {
            (GameState::Title, KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N')) => {
                Some(InputAction::NewGame)
            }
            (GameState::Title, KeyCode::Char('h') | KeyCode::Char('H')) => {
                Some(InputAction::ShowHelp)
            }
            (GameState::Title, KeyCode::Char('a') | KeyCode::Char('A')) => {
                Some(InputAction::ShowAbout)
            }
            (
                GameState::HowToPlay | GameState::About,
                KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace | KeyCode::Enter,
            ) => Some(InputAction::Back),
            (GameState::Playing, KeyCode::Char('p') | KeyCode::Char('P')) => {
                Some(InputAction::Pause)
            }
            (GameState::Playing, KeyCode::Char(' ')) => Some(InputAction::Shoot),
            (GameState::Paused, KeyCode::Char('p') | KeyCode::Char('P')) => {
                Some(InputAction::Resume)
            }
            (
                GameState::Paused | GameState::GameOver(_),
                KeyCode::Char('m') | KeyCode::Char('M'),
            ) => Some(InputAction::MainMenu),
            (GameState::GameOver(_), KeyCode::Char('r') | KeyCode::Char('R')) => {
                Some(InputAction::Restart)
            }
            _ => None,
        };
        if let Some(action) = action {
            self.oneshot_actions.push(action);
            return;
        }

        // Movement keys are only tracked while playing
        if *game_state == GameState::Playing {
            match key_event.code {
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    self.key_state.up = true;
                    self.key_state.down = false;
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    self.key_state.down = true;
                    self.key_state.up = false;
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.key_state.left = true;
                    self.key_state.right = false;
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.key_state.right = true;
                    self.key_state.left = false;
                }
                _ => {}
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = false;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = false;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            _ => {}
        }
    }

    /// Lets go of taps once a tick has moved Cupid with them. Does nothing
    /// when the terminal reports key releases.
    pub fn release_taps(&mut self) {
        if !self.reports_release {
            self.key_state = KeyState::default();
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: &GameState) -> Vec<InputAction> {
        let mut actions = Vec::new();

        actions.extend_from_slice(&self.oneshot_actions);

        if *game_state == GameState::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.up {
                actions.push(InputAction::MoveUp);
            }
            if self.key_state.down {
                actions.push(InputAction::MoveDown);
            }
        }

        actions
    }
}
