//! Leveling - Geometric XP cost schedule
//!
//! Level `n` costs `floor(100 * 1.5^(n-1))` XP. Each cost is rounded on its own,
//! never cumulatively: 100, 150, 225, 337, 506, ...

use crate::domain::value_objects::LevelProgress;

const BASE_LEVEL_COST: f64 = 100.0;
const LEVEL_COST_GROWTH: f64 = 1.5;

/// XP needed to complete `level` (levels start at 1)
pub fn xp_cost(level: u32) -> u64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    // `as` saturates for values beyond u64::MAX
    (BASE_LEVEL_COST * LEVEL_COST_GROWTH.powi(exponent)).floor() as u64
}

/// Derive the level reached with `total_xp` and the progress within it.
///
/// Pure: the same input always yields the same result. The loop runs once per
/// completed level, and costs grow geometrically, so it stays short even for
/// `u64::MAX`.
pub fn level_from_xp(total_xp: u64) -> LevelProgress {
    let mut level: u32 = 1;
    let mut accumulated: u64 = 0;

    loop {
        let cost = xp_cost(level);
        match accumulated.checked_add(cost) {
            Some(next) if next <= total_xp => {
                accumulated = next;
                level += 1;
            }
            _ => break,
        }
    }

    LevelProgress {
        level,
        current_xp: total_xp - accumulated,
        needed_xp: xp_cost(level),
    }
}

/// Total XP required to reach `level` from zero
pub fn xp_to_reach(level: u32) -> u64 {
    (1..level).fold(0u64, |sum, l| sum.saturating_add(xp_cost(l)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(level: u32, current_xp: u64, needed_xp: u64) -> LevelProgress {
        LevelProgress {
            level,
            current_xp,
            needed_xp,
        }
    }

    #[test]
    fn test_cost_schedule() {
        assert_eq!(xp_cost(1), 100);
        assert_eq!(xp_cost(2), 150);
        assert_eq!(xp_cost(3), 225);
        assert_eq!(xp_cost(4), 337);
        assert_eq!(xp_cost(5), 506);
        assert_eq!(xp_cost(10), 3844);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_from_xp(0), progress(1, 0, 100));
        assert_eq!(level_from_xp(99), progress(1, 99, 100));
        assert_eq!(level_from_xp(100), progress(2, 0, 150));
        assert_eq!(level_from_xp(249), progress(2, 149, 150));
        assert_eq!(level_from_xp(250), progress(3, 0, 225));
        assert_eq!(level_from_xp(365), progress(3, 115, 225));
    }

    #[test]
    fn test_milestone_thresholds() {
        assert_eq!(xp_to_reach(5), 812);
        assert_eq!(level_from_xp(811).level, 4);
        assert_eq!(level_from_xp(812).level, 5);
        assert_eq!(xp_to_reach(10), 7486);
        assert_eq!(level_from_xp(7485).level, 9);
        assert_eq!(level_from_xp(7486).level, 10);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut previous = level_from_xp(0).level;
        for xp in 1..20_000u64 {
            let level = level_from_xp(xp).level;
            assert!(level >= previous, "level dropped at {} XP", xp);
            previous = level;
        }
    }

    #[test]
    fn test_progress_is_consistent() {
        for xp in [0u64, 1, 99, 100, 812, 5_000, 123_456] {
            let p = level_from_xp(xp);
            assert!(p.current_xp < p.needed_xp);
            assert_eq!(xp_to_reach(p.level) + p.current_xp, xp);
        }
    }

    #[test]
    fn test_terminates_on_huge_input() {
        let p = level_from_xp(u64::MAX);
        assert!(p.level > 90);
        assert!(p.level < 120);
    }
}
