//! End-to-end sessions driven through the runtime handle.
//!
//! Content is tuned so outcomes do not depend on the seed: slimes fall to any
//! correct answer and never hurt, the ogre flattens the hero in one hit.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, oneshot};
use tokio::time::timeout;

use game_core::{
    BattleEvent, BattleSession, BattleState, Catalogs, CommandError, EncounterTable,
    EnemyArchetype, GameConfig, MathProblem, PhaseDelays, Player, Rewards, SaveSnapshot,
    ShopCatalog, ShopPolicy,
};
use runtime::{
    CompletionReport, Event, InMemorySaveRepository, PersistenceEvent, Runtime, RuntimeConfig,
    RuntimeError, SaveRecord, SaveRepository, Topic,
};

const WAIT: Duration = Duration::from_secs(5);

fn runtime_config(pace_scale: f64) -> RuntimeConfig {
    RuntimeConfig {
        game_seed: Some(7),
        pace_scale,
        ..RuntimeConfig::default()
    }
}

fn rules(max_battles: u32, shop_every: u32) -> GameConfig {
    let mut rules = GameConfig::new()
        .with_max_battles(max_battles)
        .with_delays(PhaseDelays::instant());
    rules.shop = ShopPolicy {
        after_boss: false,
        every: shop_every,
    };
    rules
}

fn catalogs_of(archetype: EnemyArchetype) -> Catalogs {
    Catalogs::new(
        EncounterTable::new(vec![archetype.clone()], vec![archetype]).unwrap(),
        ShopCatalog::builtin(),
    )
}

fn slimes() -> Catalogs {
    catalogs_of(EnemyArchetype::new("Slime", 1, 0, 0, Rewards::new(10, 20)))
}

fn ogres() -> Catalogs {
    catalogs_of(EnemyArchetype::new("Ogre", 500, 250, 0, Rewards::new(1, 1)))
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("event bus closed")
}

async fn wait_for<T>(
    rx: &mut broadcast::Receiver<Event>,
    mut pick: impl FnMut(BattleEvent) -> Option<T>,
) -> T {
    loop {
        if let Event::Battle(event) = next_event(rx).await
            && let Some(found) = pick(event)
        {
            return found;
        }
    }
}

async fn next_problem(rx: &mut broadcast::Receiver<Event>) -> MathProblem {
    wait_for(rx, |event| match event {
        BattleEvent::ChallengeOpened(opened) => Some(opened.problem),
        _ => None,
    })
    .await
}

#[tokio::test]
async fn winning_session_saves_and_reports_once() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let (report_tx, report_rx) = oneshot::channel::<CompletionReport>();

    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(2, 0))
        .catalogs(slimes())
        .repository(repository.clone())
        .on_complete(move |report| {
            let _ = report_tx.send(report);
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.start().await.unwrap();
    for _ in 0..2 {
        let problem = next_problem(&mut battle).await;
        handle.submit_answer(problem.answer).await.unwrap();
    }

    let completed = wait_for(&mut battle, |event| match event {
        BattleEvent::GameCompleted(completed) => Some(completed),
        _ => None,
    })
    .await;
    let report = timeout(WAIT, report_rx).await.unwrap().unwrap();
    let snapshot = handle.snapshot().await.unwrap();

    assert!(completed.victory);
    assert!(report.victory);
    assert_eq!(report.final_score, completed.final_score);
    assert_eq!(report.achievements, completed.achievements);
    assert_eq!(report.achievements[0], "Math Master");
    assert_eq!(
        report.final_score,
        snapshot.player.exp + snapshot.player.gold
    );

    let record = repository.load("default").unwrap().unwrap();
    assert_eq!(record.snapshot, snapshot);
    assert_eq!(record.snapshot.battle_number, 3);
    assert_eq!(record.snapshot.stats.enemies_defeated, 2);

    // Nothing is accepted after the game is over.
    assert!(matches!(
        handle.submit_answer(1).await,
        Err(RuntimeError::Rejected(CommandError::InvalidCommand { .. }))
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn defeat_reports_loss_and_next_start_is_a_new_game() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let (report_tx, report_rx) = oneshot::channel::<CompletionReport>();

    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(3, 0))
        .catalogs(ogres())
        .repository(repository.clone())
        .on_complete(move |report| {
            let _ = report_tx.send(report);
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.start().await.unwrap();
    let problem = next_problem(&mut battle).await;
    handle.submit_answer(problem.answer + 1).await.unwrap();

    let defeated = wait_for(&mut battle, |event| match event {
        BattleEvent::PlayerDefeated(defeated) => Some(defeated),
        _ => None,
    })
    .await;
    let report = timeout(WAIT, report_rx).await.unwrap().unwrap();

    assert_eq!(defeated.battles_won, 0);
    assert_eq!(defeated.level, 1);
    assert!(!report.victory);
    assert_eq!(report.achievements, vec!["Reached Level 1", "Defeated 0 enemies"]);
    assert_eq!(handle.session().await.unwrap().state, BattleState::Defeat);

    let saved = repository.load("default").unwrap().unwrap();
    assert_eq!(saved.snapshot.player.stats.hp, 0);
    runtime.shutdown().await.unwrap();

    // A finished save is not resumed.
    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(3, 0))
        .catalogs(ogres())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle.start().await.unwrap();

    let session = handle.session().await.unwrap();
    assert_eq!(session.battle_number, 1);
    assert_eq!(session.player.stats.hp, session.player.stats.max_hp);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shop_purchase_and_close_advance_to_next_battle() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(2, 1))
        .catalogs(slimes())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);
    let mut persistence = handle.subscribe(Topic::Persistence);

    handle.start().await.unwrap();
    let problem = next_problem(&mut battle).await;
    handle.submit_answer(problem.answer).await.unwrap();

    let shop = wait_for(&mut battle, |event| match event {
        BattleEvent::ShopOpened(shop) => Some(shop),
        _ => None,
    })
    .await;
    assert_eq!(shop.gold, 70);
    assert!(shop.items.iter().any(|item| item.id == "health_potion"));

    assert!(matches!(
        handle.purchase_item("excalibur").await,
        Err(RuntimeError::Rejected(CommandError::UnknownItem { .. }))
    ));

    handle.purchase_item("health_potion").await.unwrap();
    let purchased = wait_for(&mut battle, |event| match event {
        BattleEvent::ItemPurchased(purchased) => Some(purchased),
        _ => None,
    })
    .await;
    assert_eq!(purchased.item_id, "health_potion");

    // Not enough gold is an event, not an error.
    handle.purchase_item("legendary_sword").await.unwrap();
    let rejected = wait_for(&mut battle, |event| match event {
        BattleEvent::PurchaseRejected(rejected) => Some(rejected),
        _ => None,
    })
    .await;
    assert_eq!(rejected.gold, 50);

    handle.close_shop().await.unwrap();
    let problem = next_problem(&mut battle).await;
    assert_eq!(handle.session().await.unwrap().battle_number, 2);

    // Autosaves: after the first kill, then after leaving the shop. Both
    // point at the battle that comes next.
    let mut saved_battles = Vec::new();
    while saved_battles.len() < 2 {
        if let Event::Persistence(PersistenceEvent::Saved { battle_number, .. }) =
            next_event(&mut persistence).await
        {
            saved_battles.push(battle_number);
        }
    }
    assert_eq!(saved_battles, vec![2, 2]);

    handle.submit_answer(problem.answer).await.unwrap();
    wait_for(&mut battle, |event| match event {
        BattleEvent::GameCompleted(completed) => Some(completed.victory),
        _ => None,
    })
    .await;
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn valid_save_is_restored_at_battle_start() {
    let mut session = BattleSession::new(Player::default(), 5);
    session.battle_number = 3;
    session.player.level = 2;
    session.stats.enemies_defeated = 2;
    let snapshot = SaveSnapshot::from(&session);
    let repository = Arc::new(InMemorySaveRepository::with_record(
        "alice",
        SaveRecord::new(snapshot.clone(), 120).unwrap(),
    ));

    let config = RuntimeConfig {
        session_id: Some("alice".to_string()),
        ..runtime_config(0.0)
    };
    let runtime = Runtime::builder()
        .config(config)
        .game_config(rules(5, 0))
        .catalogs(slimes())
        .repository(repository)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut persistence = handle.subscribe(Topic::Persistence);

    handle.start().await.unwrap();

    match next_event(&mut persistence).await {
        Event::Persistence(PersistenceEvent::Restored {
            slot,
            battle_number,
            level,
        }) => {
            assert_eq!(slot, "alice");
            assert_eq!(battle_number, 3);
            assert_eq!(level, 2);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(handle.snapshot().await.unwrap(), snapshot);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn tampered_save_falls_back_to_new_game() {
    let mut session = BattleSession::new(Player::default(), 10);
    session.battle_number = 6;
    let mut record = SaveRecord::new(SaveSnapshot::from(&session), 0).unwrap();
    record.checksum = "00".repeat(32);
    let repository = Arc::new(InMemorySaveRepository::with_record("default", record));

    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(10, 0))
        .catalogs(slimes())
        .repository(repository)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut persistence = handle.subscribe(Topic::Persistence);

    handle.start().await.unwrap();

    match next_event(&mut persistence).await {
        Event::Persistence(PersistenceEvent::RestoreFailed { slot, reason }) => {
            assert_eq!(slot, "default");
            assert!(reason.contains("checksum"), "{reason}");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    let session = handle.session().await.unwrap();
    assert_eq!(session.battle_number, 1);
    assert!(session.is_new_game());
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn wrong_state_command_is_rejected_without_side_effects() {
    // Real pacing: the first challenge is still a second away.
    let runtime = Runtime::builder()
        .config(runtime_config(1.0))
        .game_config(GameConfig::new().with_max_battles(2))
        .catalogs(slimes())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut commands = handle.subscribe(Topic::Command);

    handle.start().await.unwrap();
    let before = handle.session().await.unwrap();

    let result = handle.submit_answer(2).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Rejected(CommandError::InvalidCommand { .. }))
    ));
    assert!(matches!(
        handle.start().await,
        Err(RuntimeError::Rejected(CommandError::AlreadyStarted { .. }))
    ));

    match next_event(&mut commands).await {
        Event::Command(rejected) => {
            assert_eq!(rejected.command, "submit-answer");
            assert_eq!(rejected.code, "INVALID_COMMAND");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(handle.session().await.unwrap(), before);
    assert_eq!(before.state, BattleState::PlayerTurn);

    // Shutdown with a timer still pending.
    runtime.shutdown().await.unwrap();
    assert!(matches!(
        handle.close_shop().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test]
async fn quitting_during_victory_resumes_at_the_next_battle() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let mut slow_victory = rules(3, 0);
    slow_victory.delays.victory_ms = 60_000;

    let runtime = Runtime::builder()
        .config(runtime_config(1.0))
        .game_config(slow_victory)
        .catalogs(slimes())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.start().await.unwrap();
    let problem = next_problem(&mut battle).await;
    handle.submit_answer(problem.answer).await.unwrap();
    assert_eq!(handle.session().await.unwrap().state, BattleState::Victory);
    runtime.shutdown().await.unwrap();

    let saved = repository.load("default").unwrap().unwrap().snapshot;
    assert_eq!(saved.battle_number, 2);
    assert_eq!(saved.stats.enemies_defeated, 1);

    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(3, 0))
        .catalogs(slimes())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.start().await.unwrap();
    let resumed = handle.session().await.unwrap();
    assert_eq!(resumed.battle_number, 2);
    assert_eq!(resumed.stats.enemies_defeated, 1);
    assert_eq!(resumed.player.exp, 10);
    assert_eq!(resumed.player.gold, 70);

    let problem = next_problem(&mut battle).await;
    handle.submit_answer(problem.answer).await.unwrap();
    next_problem(&mut battle).await;

    let session = handle.session().await.unwrap();
    assert_eq!(session.battle_number, 3);
    assert_eq!(session.stats.enemies_defeated, 2);
    assert_eq!(session.battles_won(), session.stats.enemies_defeated);
    assert_eq!(session.player.exp, 20);
    assert_eq!(session.player.gold, 90);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn quitting_in_the_shop_keeps_purchases() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let runtime = Runtime::builder()
        .config(runtime_config(0.0))
        .game_config(rules(3, 1))
        .catalogs(slimes())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.start().await.unwrap();
    let problem = next_problem(&mut battle).await;
    handle.submit_answer(problem.answer).await.unwrap();
    wait_for(&mut battle, |event| match event {
        BattleEvent::ShopOpened(shop) => Some(shop),
        _ => None,
    })
    .await;

    handle.purchase_item("health_potion").await.unwrap();
    runtime.shutdown().await.unwrap();

    let saved = repository.load("default").unwrap().unwrap().snapshot;
    assert_eq!(saved.player.gold, 50);
    assert_eq!(saved.battle_number, 2);
}
