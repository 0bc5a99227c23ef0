//! Experience, rewards and level-ups.

use crate::config::{LevelUpGains, LevelUpHeal};
use crate::state::{Player, Rewards};

/// Stat deltas of a single level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub new_level: u32,
    pub hp_increase: u32,
    pub attack_increase: u32,
    pub defense_increase: u32,
}

/// Credits the exp and gold of a defeated enemy.
pub fn apply_rewards(player: &mut Player, rewards: Rewards) {
    player.exp = player.exp.saturating_add(rewards.exp);
    player.gold = player.gold.saturating_add(rewards.gold);
}

/// Next threshold: `floor(exp_to_next × 1.5)`.
pub fn next_threshold(exp_to_next: u32) -> u32 {
    exp_to_next.saturating_add(exp_to_next / 2).max(1)
}

/// Performs one level-up if `exp >= exp_to_next`; otherwise does nothing.
pub fn try_level_up(
    player: &mut Player,
    gains: &LevelUpGains,
    heal: LevelUpHeal,
) -> Option<LevelUp> {
    if player.exp < player.exp_to_next {
        return None;
    }

    player.level += 1;
    player.exp -= player.exp_to_next;
    player.exp_to_next = next_threshold(player.exp_to_next);

    let stats = &mut player.stats;
    stats.max_hp = stats.max_hp.saturating_add(gains.hp);
    stats.hp = match heal {
        LevelUpHeal::HealByIncrease => stats.hp.saturating_add(gains.hp).min(stats.max_hp),
        LevelUpHeal::FullRestore => stats.max_hp,
    };
    stats.attack = stats.attack.saturating_add(gains.attack);
    stats.defense = stats.defense.saturating_add(gains.defense);

    Some(LevelUp {
        new_level: player.level,
        hp_increase: gains.hp,
        attack_increase: gains.attack,
        defense_increase: gains.defense,
    })
}

/// Levels up as many times as the banked exp allows.
pub fn level_ups(player: &mut Player, gains: &LevelUpGains, heal: LevelUpHeal) -> Vec<LevelUp> {
    std::iter::from_fn(|| try_level_up(player, gains, heal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(exp: u32, exp_to_next: u32) -> Player {
        Player {
            exp,
            exp_to_next,
            ..Player::default()
        }
    }

    #[test]
    fn kill_pushes_player_over_threshold() {
        let mut hero = player(90, 100);
        apply_rewards(&mut hero, Rewards::new(20, 0));

        let ups = level_ups(&mut hero, &LevelUpGains::default(), LevelUpHeal::HealByIncrease);

        assert_eq!(ups.len(), 1);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.exp, 10);
        assert_eq!(hero.exp_to_next, 150);
        assert_eq!(
            ups[0],
            LevelUp {
                new_level: 2,
                hp_increase: 20,
                attack_increase: 3,
                defense_increase: 2
            }
        );
    }

    #[test]
    fn never_fires_below_threshold() {
        let mut hero = player(99, 100);
        let before = hero.clone();

        assert_eq!(
            try_level_up(&mut hero, &LevelUpGains::default(), LevelUpHeal::FullRestore),
            None
        );
        assert_eq!(hero, before);
    }

    #[test]
    fn heal_by_increase_keeps_missing_hp() {
        let mut hero = player(100, 100);
        hero.stats.hp = 40;

        try_level_up(&mut hero, &LevelUpGains::default(), LevelUpHeal::HealByIncrease);

        assert_eq!(hero.stats.max_hp, 120);
        assert_eq!(hero.stats.hp, 60);
        assert_eq!(hero.stats.attack, 18);
        assert_eq!(hero.stats.defense, 10);
    }

    #[test]
    fn full_restore_fills_new_max() {
        let mut hero = player(100, 100);
        hero.stats.hp = 40;

        try_level_up(&mut hero, &LevelUpGains::default(), LevelUpHeal::FullRestore);

        assert_eq!(hero.stats.hp, 120);
    }

    #[test]
    fn large_rewards_chain_level_ups() {
        let mut hero = player(0, 100);
        apply_rewards(&mut hero, Rewards::new(300, 300));

        let ups = level_ups(&mut hero, &LevelUpGains::default(), LevelUpHeal::HealByIncrease);

        // 300 -> 200 (threshold 150) -> 50 (threshold 225)
        assert_eq!(ups.len(), 2);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.exp, 50);
        assert_eq!(hero.exp_to_next, 225);
        assert_eq!(hero.gold, 350);
    }

    #[test]
    fn threshold_grows_by_half_rounded_down() {
        assert_eq!(next_threshold(100), 150);
        assert_eq!(next_threshold(225), 337);
    }
}
