//! Final score and achievements reported when a session ends.

use crate::event::GameCompleted;
use crate::state::BattleSession;

/// Score: `exp + gold` on a win, `exp` on a loss.
pub fn final_score(session: &BattleSession, victory: bool) -> u32 {
    let player = &session.player;
    if victory {
        player.exp.saturating_add(player.gold)
    } else {
        player.exp
    }
}

pub fn achievements(session: &BattleSession, victory: bool) -> Vec<String> {
    let player = &session.player;
    if victory {
        vec![
            "Math Master".to_string(),
            format!("Reached Level {}", player.level),
            "Defeated All Enemies".to_string(),
            format!("Earned {} Gold", player.gold),
        ]
    } else {
        vec![
            format!("Reached Level {}", player.level),
            format!("Defeated {} enemies", session.battles_won()),
        ]
    }
}

pub fn summarize(session: &BattleSession, victory: bool) -> GameCompleted {
    GameCompleted {
        victory,
        final_score: final_score(session, victory),
        achievements: achievements(session, victory),
    }
}
