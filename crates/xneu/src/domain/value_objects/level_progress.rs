//! LevelProgress - Position of a user within the level schedule

use serde::{Deserialize, Serialize};

/// Level derived from total XP, with progress inside that level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since reaching `level`
    pub current_xp: u64,
    /// XP cost of completing `level`
    pub needed_xp: u64,
}

impl LevelProgress {
    /// XP still missing before the next level
    pub fn remaining_xp(&self) -> u64 {
        self.needed_xp.saturating_sub(self.current_xp)
    }
}

impl std::fmt::Display for LevelProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level {} ({}/{} XP)",
            self.level, self.current_xp, self.needed_xp
        )
    }
}
