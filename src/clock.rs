/// Simulation rate. Every duration in the game is a whole number of ticks.
pub const TICKS_PER_SECOND: u64 = 60;

/// Converts whole seconds into ticks.
pub fn secs_to_ticks(secs: u32) -> u64 {
    secs as u64 * TICKS_PER_SECOND
}

/// Two tick counters: `ticks` always runs while the game is playing and
/// times effect windows, `round_ticks` is the round clock shown on the HUD
/// and stops while time is frozen.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    ticks: u64,
    round_ticks: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick. Returns the round second that was just reached,
    /// if any.
    pub fn advance(&mut self, frozen: bool) -> Option<u32> {
        self.ticks += 1;
        if frozen {
            return None;
        }
        self.round_ticks += 1;
        if self.round_ticks.is_multiple_of(TICKS_PER_SECOND) {
            Some((self.round_ticks / TICKS_PER_SECOND) as u32)
        } else {
            None
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn round_ticks(&self) -> u64 {
        self.round_ticks
    }

    pub fn elapsed_secs(&self) -> u32 {
        (self.round_ticks / TICKS_PER_SECOND) as u32
    }
}
