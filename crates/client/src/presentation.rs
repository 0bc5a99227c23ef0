//! Turns runtime events into terminal output.

use std::fmt::Write as _;

use game_core::{BattleEvent, EnemySnapshot, PlayerSnapshot};
use runtime::{Event, PersistenceEvent};

use crate::config::OutputFormat;

/// Renders one event, or `None` when it has nothing to show.
pub fn render(event: &Event, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(error) => {
                tracing::error!("cannot encode event as JSON: {error}");
                None
            }
        },
        OutputFormat::Text => render_text(event),
    }
}

fn render_text(event: &Event) -> Option<String> {
    match event {
        Event::Battle(event) => Some(battle_text(event)),
        Event::Persistence(event) => persistence_text(event),
        Event::Command(rejected) => Some(format!("Not now: {}", rejected.reason)),
    }
}

fn battle_text(event: &BattleEvent) -> String {
    match event {
        BattleEvent::ChallengeOpened(opened) => format!(
            "\n{} attacks! [{}] Solve: {} = ?",
            opened.enemy.name,
            opened.problem.difficulty_label(),
            opened.problem.question
        ),
        BattleEvent::HudUpdate(hud) => hud_line(&hud.player, hud.enemy.as_ref()),
        BattleEvent::CombatResult(result) => result.message.clone(),
        BattleEvent::EnemyAttacked(attack) => format!(
            "{} strikes you for {} damage!",
            attack.enemy_name, attack.damage
        ),
        BattleEvent::EnemyDefeated(defeated) => {
            let boss = if defeated.is_boss { "Boss " } else { "" };
            format!(
                "{boss}{} defeated! +{} EXP, +{} gold",
                defeated.name, defeated.exp, defeated.gold
            )
        }
        BattleEvent::LevelUp(level_up) => format!(
            "LEVEL UP! You reached level {} (+{} HP, +{} ATK, +{} DEF)",
            level_up.new_level,
            level_up.hp_increase,
            level_up.attack_increase,
            level_up.defense_increase
        ),
        BattleEvent::PlayerDefeated(defeated) => format!(
            "You have fallen at level {} after {} victories. Score: {}",
            defeated.level, defeated.battles_won, defeated.final_score
        ),
        BattleEvent::ShopOpened(shop) => {
            let mut text = format!("\n=== SHOP === (you have {} gold)", shop.gold);
            for item in &shop.items {
                let _ = write!(
                    text,
                    "\n  {:<16} {:<16} {:>4}g  {}",
                    item.id, item.name, item.cost, item.description
                );
            }
            text.push_str("\nType `buy <item>` or `close`.");
            text
        }
        BattleEvent::ItemPurchased(purchased) => format!("Bought {}.", purchased.item_name),
        BattleEvent::PurchaseRejected(rejected) => {
            format!("Cannot buy {}: {}", rejected.item_id, rejected.reason)
        }
        BattleEvent::GameCompleted(completed) => {
            let title = if completed.victory {
                "VICTORY!"
            } else {
                "GAME OVER"
            };
            let mut text = format!("\n*** {title} ***\nFinal score: {}", completed.final_score);
            for achievement in &completed.achievements {
                let _ = write!(text, "\n  - {achievement}");
            }
            text
        }
    }
}

fn hud_line(player: &PlayerSnapshot, enemy: Option<&EnemySnapshot>) -> String {
    let mut line = format!(
        "{} Lv{}  HP {}/{}  ATK {}  DEF {}  EXP {}/{}  Gold {}",
        player.name,
        player.level,
        player.hp,
        player.max_hp,
        player.attack,
        player.defense,
        player.exp,
        player.exp_to_next,
        player.gold
    );
    if let Some(enemy) = enemy {
        let boss = if enemy.is_boss { " (boss)" } else { "" };
        let _ = write!(line, "  |  {}{boss} HP {}/{}", enemy.name, enemy.hp, enemy.max_hp);
    }
    line
}

fn persistence_text(event: &PersistenceEvent) -> Option<String> {
    match event {
        PersistenceEvent::Restored {
            slot,
            battle_number,
            level,
        } => Some(format!(
            "Resumed save '{slot}' at battle {battle_number} (level {level})."
        )),
        PersistenceEvent::RestoreFailed { slot, reason } => Some(format!(
            "Could not load save '{slot}' ({reason}). Starting a new game."
        )),
        PersistenceEvent::Saved { .. } => None,
        PersistenceEvent::SaveFailed { reason, .. } => {
            Some(format!("Warning: autosave failed: {reason}"))
        }
    }
}
