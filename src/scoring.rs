//! Reference scoring collaborator
//!
//! Score and level arithmetic live outside the core rules: the session only
//! ever hands a collaborator the number of lines a lock event cleared. This
//! module is the stock implementation of that collaborator - a pure counter
//! a driver can register as its [`ScoreSink`], plus the drop-interval curve
//! the level implies.

use crate::core::session::ScoreSink;

/// Points per completed line
pub const LINE_POINTS: u32 = 10;

/// Extra points per additional line in a multi-line clear
pub const MULTI_LINE_BONUS: u32 = 25;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1, and how much each level shaves off
pub const BASE_DROP_INTERVAL_MS: u32 = 500;
pub const SPEED_STEP_MS: u32 = 35;
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Running score, line and level counters for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    lines: u32,
    level: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Gravity interval the driver should clock ticks at for the current
    /// level, shrinking per level down to a floor
    pub fn drop_interval_ms(&self) -> u32 {
        let reduction = SPEED_STEP_MS.saturating_mul(self.level.saturating_sub(1));
        BASE_DROP_INTERVAL_MS
            .saturating_sub(reduction)
            .max(MIN_DROP_INTERVAL_MS)
    }

    fn single_line_completed(&mut self) {
        self.score += LINE_POINTS;
        self.lines += 1;
        if self.lines % LINES_PER_LEVEL == 0 {
            self.level += 1;
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSink for ScoreBoard {
    fn on_lines_cleared(&mut self, count: u32) {
        for _ in 0..count {
            self.single_line_completed();
        }
        // Multi-line clears earn a flat bonus per additional line.
        if count > 1 {
            self.score += MULTI_LINE_BONUS * (count - 1);
        }
    }
}
