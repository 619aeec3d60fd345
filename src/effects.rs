use crate::clock::TICKS_PER_SECOND;
use crate::entities::PowerUpKind;

/// Timed power-up windows and how many of each kind Cupid has picked up.
#[derive(Debug, Clone, Default)]
pub struct EffectTracker {
    /// (kind, tick at which it wears off)
    windows: Vec<(PowerUpKind, u64)>,
    collected: [u32; PowerUpKind::ALL.len()],
}

impl EffectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a window, or restarts it if the kind is already active.
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, duration_ticks: u64) {
        let ends_at = now + duration_ticks;
        match self.windows.iter_mut().find(|(k, _)| *k == kind) {
            Some(window) => window.1 = ends_at,
            None => self.windows.push((kind, ends_at)),
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.windows.iter().any(|(k, _)| *k == kind)
    }

    /// Whole seconds left, rounded up, or `None` if not active.
    pub fn remaining_secs(&self, kind: PowerUpKind, now: u64) -> Option<u32> {
        self.windows
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, ends_at)| ends_at.saturating_sub(now).div_ceil(TICKS_PER_SECOND) as u32)
    }

    /// Drops every window that has ended by `now` and returns their kinds.
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut worn_off = Vec::new();
        self.windows.retain(|&(kind, ends_at)| {
            if ends_at <= now {
                worn_off.push(kind);
                false
            } else {
                true
            }
        });
        worn_off
    }

    pub fn record_collected(&mut self, kind: PowerUpKind) {
        self.collected[kind.index()] += 1;
    }

    pub fn collected(&self, kind: PowerUpKind) -> u32 {
        self.collected[kind.index()]
    }

    pub fn total_collected(&self) -> u32 {
        self.collected.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_expires_at_end_tick() {
        let mut effects = EffectTracker::new();
        effects.activate(PowerUpKind::Wings, 100, 300);
        assert!(effects.is_active(PowerUpKind::Wings));

        assert!(effects.expire(399).is_empty());
        assert_eq!(effects.expire(400), vec![PowerUpKind::Wings]);
        assert!(!effects.is_active(PowerUpKind::Wings));
    }

    #[test]
    fn test_reactivation_restarts_window() {
        let mut effects = EffectTracker::new();
        effects.activate(PowerUpKind::Dolphin, 0, 480);
        effects.activate(PowerUpKind::Dolphin, 240, 480);

        assert!(effects.expire(480).is_empty());
        assert_eq!(effects.expire(720), vec![PowerUpKind::Dolphin]);
    }

    #[test]
    fn test_windows_are_independent() {
        let mut effects = EffectTracker::new();
        effects.activate(PowerUpKind::Autopilot, 0, 180);
        effects.activate(PowerUpKind::Wings, 0, 300);

        assert_eq!(effects.expire(180), vec![PowerUpKind::Autopilot]);
        assert!(effects.is_active(PowerUpKind::Wings));
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        let mut effects = EffectTracker::new();
        effects.activate(PowerUpKind::Snowflake, 0, 3 * TICKS_PER_SECOND);
        assert_eq!(effects.remaining_secs(PowerUpKind::Snowflake, 0), Some(3));
        assert_eq!(effects.remaining_secs(PowerUpKind::Snowflake, 1), Some(3));
        assert_eq!(
            effects.remaining_secs(PowerUpKind::Snowflake, TICKS_PER_SECOND),
            Some(2)
        );
        assert_eq!(effects.remaining_secs(PowerUpKind::Wings, 0), None);
    }

    #[test]
    fn test_collected_counts() {
        let mut effects = EffectTracker::new();
        effects.record_collected(PowerUpKind::Heart);
        effects.record_collected(PowerUpKind::Heart);
        effects.record_collected(PowerUpKind::Snowflake);
        assert_eq!(effects.collected(PowerUpKind::Heart), 2);
        assert_eq!(effects.collected(PowerUpKind::Snowflake), 1);
        assert_eq!(effects.collected(PowerUpKind::Wings), 0);
        assert_eq!(effects.total_collected(), 3);
    }
}
