/// Screens of the application. Only `Playing` advances the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Title,
    HowToPlay,
    About,
    Playing,
    Paused,
    GameOver(Outcome),
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cupid was still standing when time ran out
    Won,
    /// Cupid lost all his strength
    Lost,
}
