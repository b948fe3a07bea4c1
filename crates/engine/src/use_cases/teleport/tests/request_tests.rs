use std::sync::Arc;
use std::time::Duration;

use wildwarp_domain::{BlockPos, Capability, Location, MessageKey, Position, WorldName};

use super::{priced_zone, AFTER_COMPLETION, BEFORE_COMPLETION};
use crate::infrastructure::ports::{MockWalletPort, WalletError};
use crate::test_fixtures::{eventually, Harness, HarnessOptions, ScriptedWorld};
use crate::use_cases::teleport::TeleportError;

#[tokio::test(start_paused = true)]
async fn successful_teleport_runs_cosmetics_before_the_search() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);

    let started = h.orchestrator.request(player).await.unwrap();
    assert_eq!(started.effective_delay, Duration::from_secs(17));
    assert_eq!(started.charged, 0.0);
    assert!(h.orchestrator.is_teleporting(player));

    tokio::time::sleep(BEFORE_COMPLETION).await;
    assert_eq!(h.random.draws(), 0, "search started before the timeline finished");
    assert_eq!(h.players.location(player), Some(h.spawn_point()));

    tokio::time::sleep(Duration::from_secs(1)).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    let location = h.players.location(player).unwrap();
    assert_eq!(location.world, WorldName::from("world"));
    assert_eq!(location.position.y, 64.0);
    assert!(!h.orchestrator.is_teleporting(player));
    assert_eq!(h.random.draws(), 2);

    let chat = h.messages.chat_keys_for(player);
    assert_eq!(chat.first(), Some(&MessageKey::TeleportStarted));
    assert_eq!(chat.last(), Some(&MessageKey::TeleportSuccess));
}

#[tokio::test(start_paused = true)]
async fn second_request_during_cooldown_reports_time_left() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    h.clock.advance(chrono::Duration::seconds(5));
    let result = h.orchestrator.request(player).await;

    assert!(matches!(result, Err(TeleportError::Cooldown { remaining_secs: 25 })));
    let notice = h.messages.find(player, MessageKey::Cooldown).pop().unwrap();
    assert_eq!(notice.placeholder("time"), Some("25"));
    assert!(!h.orchestrator.is_teleporting(player));
}

#[tokio::test(start_paused = true)]
async fn bypass_capability_skips_the_cooldown() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);
    h.players.grant(player, Capability::BypassCooldown);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    assert!(h.orchestrator.request(player).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn second_request_while_teleporting_is_rejected() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);

    h.orchestrator.request(player).await.unwrap();
    let second = h.orchestrator.request(player).await;

    assert!(matches!(second, Err(TeleportError::AlreadyTeleporting)));
    assert_eq!(h.messages.count(player, MessageKey::AlreadyTeleporting), 1);
    assert_eq!(h.app.stores.sessions.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_admit_one_session() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);

    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let orchestrator = h.orchestrator.clone();
            tokio::spawn(async move { orchestrator.request(player).await.is_ok() })
        })
        .collect();
    let admitted = futures_util::future::join_all(attempts)
        .await
        .into_iter()
        .filter(|r| *r.as_ref().unwrap())
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(h.app.stores.sessions.len(), 1);
}

#[tokio::test]
async fn insufficient_funds_never_debits() {
    let mut wallet = MockWalletPort::new();
    wallet.expect_is_enabled().return_const(true);
    wallet.expect_has_funds().returning(|_, _| Ok(false));
    wallet
        .expect_format()
        .returning(|amount| format!("${amount:.2}"));
    wallet.expect_debit().never();
    wallet.expect_credit().never();
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        wallet: Some(Arc::new(wallet)),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);

    let result = h.orchestrator.request(player).await;

    assert!(matches!(
        result,
        Err(TeleportError::InsufficientFunds { ref price }) if price == "$100.00"
    ));
    assert!(!h.orchestrator.is_teleporting(player));
    let notice = h.messages.find(player, MessageKey::NotEnoughMoney).pop().unwrap();
    assert_eq!(notice.placeholder("price"), Some("$100.00"));
}

#[tokio::test]
async fn balance_below_price_leaves_the_account_untouched() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 50.0);

    let result = h.orchestrator.request(player).await;

    assert!(matches!(result, Err(TeleportError::InsufficientFunds { .. })));
    assert_eq!(h.wallet.balance(player), 50.0);
    assert!(h.app.stores.sessions.is_empty());
}

#[tokio::test]
async fn failed_debit_leaves_no_session() {
    let mut wallet = MockWalletPort::new();
    wallet.expect_is_enabled().return_const(true);
    wallet.expect_has_funds().returning(|_, _| Ok(true));
    wallet
        .expect_debit()
        .times(1)
        .returning(|_, _| Err(WalletError::Unavailable("ledger offline".into())));
    wallet.expect_credit().never();
    wallet.expect_format().returning(|amount| format!("${amount:.2}"));
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        wallet: Some(Arc::new(wallet)),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);

    let result = h.orchestrator.request(player).await;

    assert!(matches!(result, Err(TeleportError::DebitFailed(_))));
    assert!(!h.orchestrator.is_teleporting(player));
    assert_eq!(h.messages.count(player, MessageKey::TeleportStarted), 0);
}

#[tokio::test(start_paused = true)]
async fn price_is_debited_up_front_and_consumed_on_success() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 150.0);

    let started = h.orchestrator.request(player).await.unwrap();
    assert_eq!(started.charged, 100.0);
    assert_eq!(h.wallet.balance(player), 50.0);
    let withdrawn = h.messages.find(player, MessageKey::MoneyWithdrawn).pop().unwrap();
    assert_eq!(withdrawn.placeholder("price"), Some("$100.00"));

    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    assert_eq!(h.wallet.balance(player), 50.0);
    assert_eq!(h.messages.count(player, MessageKey::MoneyRefunded), 0);
}

#[tokio::test]
async fn disabled_wallet_makes_teleports_free() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        wallet_enabled: false,
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);

    let started = h.orchestrator.request(player).await.unwrap();
    assert_eq!(started.charged, 0.0);
    assert_eq!(h.messages.count(player, MessageKey::MoneyWithdrawn), 0);
}

#[tokio::test]
async fn disabled_or_missing_zone_is_rejected() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(0.0).with_enabled(false),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);
    let result = h.orchestrator.request(player).await;
    assert!(matches!(result, Err(TeleportError::ZoneDisabled(_))));
    assert_eq!(h.messages.count(player, MessageKey::WorldDisabled), 1);

    let nether = h.players.join(
        "Alex",
        Location::new("world_nether", Position::new(0.5, 40.0, 0.5)),
    );
    let result = h.orchestrator.request(nether).await;
    assert!(matches!(result, Err(TeleportError::ZoneNotConfigured(_))));
    assert_eq!(h.messages.count(nether, MessageKey::WorldNotConfigured), 1);
}

#[tokio::test]
async fn offline_player_is_rejected_silently() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);
    h.players.disconnect(player);

    let result = h.orchestrator.request(player).await;

    assert!(matches!(result, Err(TeleportError::PlayerOffline)));
    assert!(h.messages.messages_for(player).is_empty());
}

#[tokio::test(start_paused = true)]
async fn configured_delay_longer_than_the_timeline_is_honoured() {
    let zone = priced_zone(0.0).with_delay_secs(30).unwrap();
    let h = Harness::with(HarnessOptions {
        zone,
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);

    let started = h.orchestrator.request(player).await.unwrap();
    assert_eq!(started.effective_delay, Duration::from_secs(30));
    let notice = h.messages.find(player, MessageKey::TeleportStarted).pop().unwrap();
    assert_eq!(notice.placeholder("delay"), Some("30"));

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(h.random.draws(), 0);

    tokio::time::sleep(Duration::from_secs(6)).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;
}

#[tokio::test(start_paused = true)]
async fn never_safe_world_closes_the_session_without_refund() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        world: ScriptedWorld::lava("world"),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 150.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::UnsafeLocation) == 1).await;

    assert!(!h.orchestrator.is_teleporting(player));
    assert_eq!(h.random.draws(), 60);
    assert_eq!(h.wallet.balance(player), 50.0);
    assert_eq!(h.messages.count(player, MessageKey::MoneyRefunded), 0);
    assert_eq!(h.players.location(player), Some(h.spawn_point()));
}

#[tokio::test(start_paused = true)]
async fn fresh_cached_location_skips_the_search() {
    let h = Harness::new();
    let world = WorldName::from("world");
    h.app.stores.cache.push(&world, BlockPos::new(150, 64, 0));
    let player = h.join("Steve", 0.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    assert_eq!(
        h.players.location(player).map(|l| l.position),
        Some(Position::standing_on(BlockPos::new(150, 64, 0)))
    );
    assert_eq!(h.random.draws(), 0);
    assert_eq!(h.app.stores.cache.len(&world), 0);
}

#[tokio::test(start_paused = true)]
async fn stale_or_unsafe_cached_locations_are_discarded() {
    let h = Harness::new();
    let world = WorldName::from("world");
    h.app.stores.cache.push(&world, BlockPos::new(150, 64, 0));
    tokio::time::sleep(Duration::from_secs(290)).await;
    h.app.stores.cache.push(&world, BlockPos::new(150, 10, 0));
    let player = h.join("Steve", 0.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::TeleportSuccess) == 1).await;

    assert_eq!(h.random.draws(), 2);
    assert_eq!(h.app.stores.cache.len(&world), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_relocation_refunds() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 150.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(BEFORE_COMPLETION).await;
    // The host never reports the disconnect, so the relocation itself fails.
    h.players.disconnect(player);
    tokio::time::sleep(Duration::from_secs(1)).await;
    eventually(|| h.messages.count(player, MessageKey::MoneyRefunded) == 1).await;

    assert_eq!(h.wallet.balance(player), 150.0);
    assert_eq!(h.messages.count(player, MessageKey::TeleportSuccess), 0);
    assert!(!h.orchestrator.is_teleporting(player));
    assert!(h.app.stores.cooldowns.last(player).is_none());
}

#[tokio::test(start_paused = true)]
async fn post_teleport_effects_follow_success() {
    let h = Harness::with(HarnessOptions {
        world: ScriptedWorld::flat("world").with_biome("PLAINS"),
        post_teleport: crate::infrastructure::config::PostTeleportConfig {
            show_location: true,
            hunger: 2,
            ..Default::default()
        },
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 0.0);

    h.orchestrator.request(player).await.unwrap();
    tokio::time::sleep(AFTER_COMPLETION).await;
    eventually(|| h.messages.count(player, MessageKey::LocationInfo) == 1).await;

    let info = h.messages.find(player, MessageKey::LocationInfo).pop().unwrap();
    assert_eq!(info.placeholder("biome"), Some("PLAINS"));
    assert_eq!(info.placeholder("y"), Some("64"));
    assert_eq!(h.players.vitals(player).map(|(food, _)| food), Some(18));
}
