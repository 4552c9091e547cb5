//! Level curve.
//!
//! Level `L` starts at `Σ_{i=1}^{L-1} (base + (i - 1) · increment)` XP, so
//! each level costs `increment` more than the previous one.

use myark_core::config::LevelConfig;

/// The XP thresholds for every level up to the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    base: u64,
    increment: u64,
    max_level: u32,
}

impl LevelCurve {
    /// Build a curve; `max_level` is at least 1.
    pub fn new(base: u64, increment: u64, max_level: u32) -> Self {
        Self {
            base,
            increment,
            max_level: max_level.max(1),
        }
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Minimum XP for `level`. Levels below 1 are treated as 1.
    pub fn threshold(&self, level: u32) -> u64 {
        let steps = u64::from(level.max(1) - 1);
        // Σ base + increment · Σ (i - 1) for i in 1..=steps
        let triangular = steps.saturating_mul(steps.saturating_sub(1)) / 2;
        self.base
            .saturating_mul(steps)
            .saturating_add(self.increment.saturating_mul(triangular))
    }

    /// Highest level whose threshold is met, capped at `max_level`.
    pub fn level_for(&self, xp: u64) -> u32 {
        let mut level = 1;
        while level < self.max_level && xp >= self.threshold(level + 1) {
            level += 1;
        }
        level
    }

    /// XP still needed for the next level; 0 at the cap.
    pub fn xp_to_next_level(&self, xp: u64) -> u64 {
        let level = self.level_for(xp);
        if level >= self.max_level {
            return 0;
        }
        self.threshold(level + 1).saturating_sub(xp)
    }

    /// Percent of the way through the current level, rounded; 100 at the cap.
    pub fn progress_to_next_level(&self, xp: u64) -> u32 {
        let level = self.level_for(xp);
        if level >= self.max_level {
            return 100;
        }
        let start = self.threshold(level);
        let span = self.threshold(level + 1).saturating_sub(start);
        if span == 0 {
            return 100;
        }
        let pct = (xp.saturating_sub(start) as f64 / span as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }
}

impl From<&LevelConfig> for LevelCurve {
    fn from(config: &LevelConfig) -> Self {
        Self::new(config.base_xp, config.increment, config.max_level)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::from(&LevelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let curve = LevelCurve::default();
        assert_eq!(curve.threshold(1), 0);
        assert_eq!(curve.threshold(2), 100);
        assert_eq!(curve.threshold(3), 250);
        assert_eq!(curve.threshold(4), 450);
        assert_eq!(curve.threshold(10), 900 + 50 * 36);
    }

    #[test]
    fn test_level_for_boundaries() {
        let curve = LevelCurve::default();
        assert_eq!(curve.level_for(0), 1);
        assert_eq!(curve.level_for(99), 1);
        assert_eq!(curve.level_for(100), 2);
        assert_eq!(curve.level_for(249), 2);
        assert_eq!(curve.level_for(250), 3);
        assert_eq!(curve.level_for(u64::MAX), 50);
    }

    #[test]
    fn test_level_is_monotonic() {
        let curve = LevelCurve::default();
        let mut previous = 1;
        for xp in (0..200_000).step_by(37) {
            let level = curve.level_for(xp);
            assert!(level >= previous, "level dropped at {xp} XP");
            previous = level;
        }
    }

    #[test]
    fn test_progress() {
        let curve = LevelCurve::default();
        assert_eq!(curve.xp_to_next_level(40), 60);
        assert_eq!(curve.progress_to_next_level(40), 40);
        assert_eq!(curve.progress_to_next_level(175), 50);

        let capped = LevelCurve::new(100, 50, 2);
        assert_eq!(capped.xp_to_next_level(5_000), 0);
        assert_eq!(capped.progress_to_next_level(5_000), 100);
    }
}
