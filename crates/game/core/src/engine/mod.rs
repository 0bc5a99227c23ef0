//! Battle state machine.
//!
//! [`BattleEngine`] is the single owner of a [`BattleSession`]. It advances
//! only when the host feeds it a [`Command`] or a [`Wake`] that it requested
//! earlier, and it reports every observable change through its [`Presenter`].
//! Nothing in here sleeps, blocks or performs I/O.
//!
//! ```text
//! start ─► PlayerTurn ──wake──► WaitingAnswer ──answer──► EnemyTurn ──wake──► PlayerTurn
//!                                     │                        └──► Defeat
//!                                     └──► Victory ──wake──► Shopping ──close──► next battle | Won
//!                                                   └──────────────────────────► next battle | Won
//! ```

mod errors;
pub mod outcome;

pub use errors::CommandError;

use crate::combat::{resolve_enemy_attack, resolve_player_attack};
use crate::config::GameConfig;
use crate::encounter::EncounterTable;
use crate::env::{Dice, RngOracle, Scheduler, Wake, WakePhase};
use crate::error::ErrorContext;
use crate::event::{
    BattleEvent, ChallengeOpened, Command, CombatResult, EnemyAttacked, EnemyDefeated,
    EnemySnapshot, HudUpdate, ItemPurchased, PlayerDefeated, PlayerSnapshot, Presenter,
    PurchaseRejected, ShopOpened,
};
use crate::problem::{MathProblem, generate};
use crate::progression::{apply_rewards, level_ups};
use crate::shop::{PurchaseError, ShopCatalog};
use crate::snapshot::{SaveSnapshot, SnapshotError};
use crate::state::{BattleSession, BattleState, Enemy, Player};

/// Static content the engine reads but never mutates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub encounters: EncounterTable,
    pub shop: ShopCatalog,
}

impl Catalogs {
    pub fn new(encounters: EncounterTable, shop: ShopCatalog) -> Self {
        Self { encounters, shop }
    }
}

/// Turn-based battle engine.
///
/// Randomness, pacing and presentation are injected so the whole session is
/// reproducible from `(game_seed, commands, wakes)`.
pub struct BattleEngine<R, P, S> {
    session: BattleSession,
    config: GameConfig,
    catalogs: Catalogs,
    rng: R,
    game_seed: u64,
    nonce: u64,
    presenter: P,
    scheduler: S,
    problem: Option<MathProblem>,
    epoch: u64,
    started: bool,
    completed: bool,
}

impl<R, P, S> BattleEngine<R, P, S>
where
    R: RngOracle,
    P: Presenter,
    S: Scheduler,
{
    /// Creates an engine with a fresh player built from the configured template.
    pub fn new(
        config: GameConfig,
        catalogs: Catalogs,
        game_seed: u64,
        rng: R,
        presenter: P,
        scheduler: S,
    ) -> Self {
        let player = Player::from_template(&config.starting_player);
        let session = BattleSession::new(player, config.max_battles);
        Self {
            session,
            config,
            catalogs,
            rng,
            game_seed,
            nonce: 0,
            presenter,
            scheduler,
            problem: None,
            epoch: 0,
            started: false,
            completed: false,
        }
    }

    /// Replaces the session with a saved one, positioned at the start of its
    /// current battle. The engine must be started again afterwards.
    ///
    /// Snapshots of a defeated hero are rejected. On error the current session
    /// is left untouched.
    pub fn restore(&mut self, snapshot: SaveSnapshot) -> Result<(), SnapshotError> {
        let session = snapshot.into_session()?;
        self.nonce = u64::from(session.stats.problems_attempted);
        self.session = session;
        self.problem = None;
        self.epoch += 1;
        self.started = false;
        self.completed = false;
        Ok(())
    }

    /// Begins the current battle. Call once, after any `restore`.
    pub fn start(&mut self) -> Result<(), CommandError> {
        if self.started {
            return Err(CommandError::AlreadyStarted {
                context: self.context(),
            });
        }
        self.started = true;

        if self.session.battle_number > self.session.max_battles {
            self.session.state = BattleState::Won;
            self.complete(true);
            return Ok(());
        }

        self.begin_battle();
        Ok(())
    }

    /// Applies a player command.
    ///
    /// Commands that the current state does not accept are rejected without
    /// touching the session.
    pub fn handle_command(&mut self, command: Command) -> Result<(), CommandError> {
        match (self.session.state, command) {
            (BattleState::WaitingAnswer, Command::SubmitAnswer { value }) => {
                self.submit_answer(value)
            }
            (BattleState::Shopping, Command::PurchaseItem { id }) => self.purchase(id),
            (BattleState::Shopping, Command::CloseShop) => {
                self.advance();
                Ok(())
            }
            (_, command) => Err(CommandError::invalid(command.name(), self.context())),
        }
    }

    /// Resumes a phase the engine scheduled earlier.
    ///
    /// Returns `Ok(false)` for stale wakes: an older epoch, a duplicate, or a
    /// phase that no longer matches the current state.
    pub fn handle_wake(&mut self, wake: Wake) -> Result<bool, CommandError> {
        if !self.started || wake.epoch != self.epoch {
            return Ok(false);
        }

        match (self.session.state, wake.phase) {
            (BattleState::PlayerTurn, WakePhase::TurnStart) => self.open_challenge()?,
            (BattleState::EnemyTurn, WakePhase::EnemyAttack) => self.enemy_attack()?,
            (BattleState::Victory, WakePhase::AfterVictory) => self.leave_victory(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot::from(&self.session)
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn state(&self) -> BattleState {
        self.session.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Problem awaiting an answer, if any.
    pub fn current_problem(&self) -> Option<&MathProblem> {
        self.problem.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once `game-completed` has been emitted.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ===== transitions =====

    fn begin_battle(&mut self) {
        let enemy = self
            .catalogs
            .encounters
            .next_encounter(self.session.battle_number);
        self.session.enemy = Some(enemy);
        self.session.state = BattleState::PlayerTurn;
        self.emit_hud();
        self.schedule(WakePhase::TurnStart, self.config.delays.turn_start_ms);
    }

    fn open_challenge(&mut self) -> Result<(), CommandError> {
        let enemy = match self.session.enemy.as_ref() {
            Some(enemy) => EnemySnapshot::from(enemy),
            None => return Err(self.inconsistent("player turn without an enemy")),
        };

        let mut dice = Dice::new(&self.rng, self.game_seed, self.nonce);
        let problem = generate(self.session.player.level, &mut dice);
        self.nonce += 1;

        self.session.state = BattleState::WaitingAnswer;
        self.problem = Some(problem.clone());
        self.emit(BattleEvent::ChallengeOpened(ChallengeOpened { problem, enemy }));
        Ok(())
    }

    fn submit_answer(&mut self, value: i32) -> Result<(), CommandError> {
        let Some(problem) = self.problem.take() else {
            return Err(self.inconsistent("waiting for an answer without a problem"));
        };
        let Some(enemy) = self.session.enemy.as_mut() else {
            return Err(self.inconsistent("waiting for an answer without an enemy"));
        };

        let attack = resolve_player_attack(&self.session.player, enemy, &problem, value);
        enemy.stats.take_damage(attack.damage);
        let defeated = enemy.is_defeated().then(|| enemy.clone());
        self.session
            .stats
            .record_answer(attack.correct, problem.difficulty);

        let message = if attack.correct {
            format!("Correct! You dealt {} damage!", attack.damage)
        } else {
            format!("Wrong! The answer was {}", problem.answer)
        };
        self.emit(BattleEvent::CombatResult(CombatResult {
            success: attack.correct,
            damage: attack.damage,
            message,
        }));
        self.emit_hud();

        match defeated {
            Some(enemy) => self.claim_victory(enemy),
            None => {
                self.session.state = BattleState::EnemyTurn;
                self.schedule(WakePhase::EnemyAttack, self.config.delays.answer_result_ms);
            }
        }
        Ok(())
    }

    fn claim_victory(&mut self, enemy: Enemy) {
        let player = &mut self.session.player;
        apply_rewards(player, enemy.rewards);
        let gained = level_ups(
            player,
            &self.config.level_up_gains,
            self.config.level_up_heal,
        );
        self.session.stats.record_kill(enemy.is_boss);

        self.emit(BattleEvent::EnemyDefeated(EnemyDefeated {
            name: enemy.stats.name,
            exp: enemy.rewards.exp,
            gold: enemy.rewards.gold,
            is_boss: enemy.is_boss,
        }));
        if !gained.is_empty() {
            for level_up in gained {
                self.emit(BattleEvent::LevelUp(level_up));
            }
            self.emit_hud();
        }

        self.session.state = BattleState::Victory;
        self.schedule(WakePhase::AfterVictory, self.config.delays.victory_ms);
    }

    fn enemy_attack(&mut self) -> Result<(), CommandError> {
        let Some(enemy) = self.session.enemy.as_ref() else {
            return Err(self.inconsistent("enemy turn without an enemy"));
        };
        let attack = resolve_enemy_attack(enemy, &self.session.player);
        let enemy_name = enemy.name().to_string();
        self.session.player.stats.take_damage(attack.damage);

        self.emit(BattleEvent::EnemyAttacked(EnemyAttacked {
            damage: attack.damage,
            enemy_name,
        }));
        self.emit_hud();

        if self.session.player.is_defeated() {
            self.session.state = BattleState::Defeat;
            let player = &self.session.player;
            let defeated = PlayerDefeated {
                final_score: outcome::final_score(&self.session, false),
                level: player.level,
                battles_won: self.session.battles_won(),
            };
            self.emit(BattleEvent::PlayerDefeated(defeated));
            self.complete(false);
        } else {
            self.session.state = BattleState::PlayerTurn;
            self.schedule(WakePhase::TurnStart, self.config.delays.enemy_attack_ms);
        }
        Ok(())
    }

    fn leave_victory(&mut self) {
        let battle_number = self.session.battle_number;
        let defeated_boss = self
            .session
            .enemy
            .as_ref()
            .is_some_and(|enemy| enemy.is_boss);

        if self.config.shop.is_offered(battle_number, defeated_boss) {
            self.session.state = BattleState::Shopping;
            self.emit(BattleEvent::ShopOpened(ShopOpened {
                items: self.catalogs.shop.items().to_vec(),
                gold: self.session.player.gold,
            }));
        } else {
            self.advance();
        }
    }

    fn purchase(&mut self, id: String) -> Result<(), CommandError> {
        let result = self
            .catalogs
            .shop
            .purchase(&self.session.player, &id)
            .map(|(player, item)| {
                let event = ItemPurchased {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    effect: item.effect,
                };
                (player, event)
            });

        match result {
            Ok((player, event)) => {
                self.session.player = player;
                self.emit(BattleEvent::ItemPurchased(event));
                self.emit_hud();
                Ok(())
            }
            Err(PurchaseError::UnknownItem { id }) => Err(CommandError::UnknownItem {
                id,
                context: self.context(),
            }),
            Err(reason) => {
                self.emit(BattleEvent::PurchaseRejected(PurchaseRejected {
                    item_id: id,
                    reason,
                    gold: self.session.player.gold,
                }));
                Ok(())
            }
        }
    }

    /// Moves past a won battle: the next encounter, or the final win.
    fn advance(&mut self) {
        self.session.battle_number += 1;
        if self.session.battle_number > self.session.max_battles {
            self.session.state = BattleState::Won;
            self.complete(true);
        } else {
            self.begin_battle();
        }
    }

    /// Emits `game-completed`. Later calls are no-ops.
    fn complete(&mut self, victory: bool) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.problem = None;
        // Invalidate anything still pending in the scheduler.
        self.epoch += 1;
        let summary = outcome::summarize(&self.session, victory);
        self.emit(BattleEvent::GameCompleted(summary));
    }

    // ===== helpers =====

    fn schedule(&mut self, phase: WakePhase, delay_ms: u64) {
        self.epoch += 1;
        self.scheduler.schedule(delay_ms, Wake::new(phase, self.epoch));
    }

    fn emit(&mut self, event: BattleEvent) {
        self.presenter.present(event);
    }

    fn emit_hud(&mut self) {
        let hud = HudUpdate {
            player: PlayerSnapshot::from(&self.session.player),
            enemy: self.session.enemy.as_ref().map(EnemySnapshot::from),
        };
        self.emit(BattleEvent::HudUpdate(hud));
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.session.battle_number).with_state(self.session.state)
    }

    fn inconsistent(&self, message: &'static str) -> CommandError {
        CommandError::inconsistent(self.context(), message)
    }
}
