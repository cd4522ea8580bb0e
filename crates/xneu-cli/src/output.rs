//! Terminal rendering

use colored::Colorize;

use xneu::{all_badges, LevelProgress};
use xneu_gamification::ProgressSnapshot;

const BAR_WIDTH: usize = 20;

/// `[#######.............]` style bar for progress inside a level
pub fn progress_bar(progress: &LevelProgress) -> String {
    let filled = if progress.needed_xp == 0 {
        0
    } else {
        ((progress.current_xp as u128 * BAR_WIDTH as u128) / progress.needed_xp as u128) as usize
    };
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn print_snapshot(snapshot: &ProgressSnapshot) {
    println!("{} {}", "User".bold(), snapshot.user_id.to_string().cyan());
    println!(
        "  {} {}  {} {}/{} XP",
        format!("Level {}", snapshot.progress.level).green().bold(),
        progress_bar(&snapshot.progress),
        "·".dimmed(),
        snapshot.progress.current_xp,
        snapshot.progress.needed_xp
    );
    println!("  Total XP: {}", snapshot.xp);

    let checked = if snapshot.checked_in_today {
        "checked in today".green().to_string()
    } else {
        "not checked in today".yellow().to_string()
    };
    println!("  Streak: {} day(s) ({})", snapshot.streak, checked);

    if let Some(at) = snapshot.last_checkin_at {
        println!("  Last check-in: {}", at.to_rfc3339().dimmed());
    }

    if snapshot.badges.is_empty() {
        println!("  Badges: {}", "none yet".dimmed());
    } else {
        println!("  Badges:");
        for badge in &snapshot.badges {
            println!(
                "    {} {} {}",
                badge.emoji,
                badge.name,
                format!("({}, {})", badge.id, badge.earned_at.format("%Y-%m-%d")).dimmed()
            );
        }
    }
}

pub fn print_catalog() {
    println!("{}", "Badges:".bold());
    for badge in all_badges() {
        let bonus = if badge.xp > 0 {
            format!("+{} XP", badge.xp).green().to_string()
        } else {
            "cosmetic".dimmed().to_string()
        };
        println!(
            "  {} {:<16} {:<16} {}",
            badge.emoji,
            badge.id.to_string().cyan(),
            badge.name,
            bonus
        );
        println!("     {}", badge.description.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xneu::level_from_xp;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(&level_from_xp(0)), format!("[{}]", ".".repeat(20)));
        // 365 XP: 115 of 225 into level 3
        assert_eq!(
            progress_bar(&level_from_xp(365)),
            format!("[{}{}]", "#".repeat(10), ".".repeat(10))
        );
    }
}
