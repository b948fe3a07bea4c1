use wildwarp_domain::{Capability, MessageKey, WorldName};

use super::priced_zone;
use crate::test_fixtures::{Harness, HarnessOptions, ScriptedWorld};
use crate::use_cases::teleport::TeleportError;

#[tokio::test]
async fn console_force_skips_cosmetics_and_cost_but_sets_the_cooldown() {
    let h = Harness::with(HarnessOptions {
        zone: priced_zone(100.0),
        ..HarnessOptions::default()
    });
    let player = h.join("Steve", 150.0);
    let world = WorldName::from("world");

    let location = h.orchestrator.force_teleport(None, player, &world).await.unwrap();

    assert_eq!(h.players.location(player), Some(location));
    assert_eq!(h.wallet.balance(player), 150.0);
    assert_eq!(h.messages.chat_keys_for(player), vec![MessageKey::TeleportSuccess]);
    assert!(!h.orchestrator.is_teleporting(player));
    assert!(matches!(
        h.orchestrator.request(player).await,
        Err(TeleportError::Cooldown { .. })
    ));
}

#[tokio::test]
async fn privileged_player_can_move_others_and_is_told() {
    let h = Harness::new();
    let admin = h.join("Admin", 0.0);
    let target = h.join("Steve", 0.0);
    h.players.grant(admin, Capability::TeleportOthers);

    h.orchestrator
        .force_teleport(Some(admin), target, &WorldName::from("world"))
        .await
        .unwrap();

    let notice = h.messages.find(admin, MessageKey::PlayerTeleported).pop().unwrap();
    assert_eq!(notice.placeholder("player"), Some("Steve"));
    assert_eq!(notice.placeholder("world"), Some("world"));
}

#[tokio::test]
async fn protected_target_is_refused() {
    let h = Harness::new();
    let admin = h.join("Admin", 0.0);
    let target = h.join("Steve", 0.0);
    h.players.grant(admin, Capability::TeleportOthers);
    h.players.grant(target, Capability::ProtectedFromOthers);

    let result = h
        .orchestrator
        .force_teleport(Some(admin), target, &WorldName::from("world"))
        .await;

    assert!(matches!(result, Err(TeleportError::TargetProtected(ref name)) if name == "Steve"));
    assert_eq!(h.messages.count(admin, MessageKey::PlayerProtected), 1);
    assert_eq!(h.players.location(target), Some(h.spawn_point()));
}

#[tokio::test]
async fn unprivileged_issuer_cannot_move_others() {
    let h = Harness::new();
    let issuer = h.join("Alex", 0.0);
    let target = h.join("Steve", 0.0);

    let result = h
        .orchestrator
        .force_teleport(Some(issuer), target, &WorldName::from("world"))
        .await;

    assert!(matches!(result, Err(TeleportError::NotPermitted)));
}

#[tokio::test(start_paused = true)]
async fn force_respects_single_flight() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);
    h.orchestrator.request(player).await.unwrap();

    let result = h
        .orchestrator
        .force_teleport(None, player, &WorldName::from("world"))
        .await;

    assert!(matches!(result, Err(TeleportError::AlreadyTeleporting)));
}

#[tokio::test]
async fn force_into_an_unconfigured_world_is_rejected() {
    let h = Harness::new();
    let player = h.join("Steve", 0.0);

    let result = h
        .orchestrator
        .force_teleport(None, player, &WorldName::from("world_the_end"))
        .await;

    assert!(matches!(result, Err(TeleportError::ZoneNotConfigured(_))));
    assert!(!h.orchestrator.is_teleporting(player));
}

#[tokio::test]
async fn random_location_does_not_touch_sessions() {
    let h = Harness::with(HarnessOptions {
        world: ScriptedWorld::flat("world"),
        ..HarnessOptions::default()
    });

    let location = h
        .orchestrator
        .random_location(&WorldName::from("world"))
        .await
        .unwrap();

    assert_eq!(location.position.y, 64.0);
    assert!(h.app.stores.sessions.is_empty());
}

#[tokio::test]
async fn random_location_in_a_never_safe_world_fails() {
    let h = Harness::with(HarnessOptions {
        world: ScriptedWorld::lava("world"),
        ..HarnessOptions::default()
    });

    let result = h.orchestrator.random_location(&WorldName::from("world")).await;

    assert!(matches!(result, Err(TeleportError::Search(_))));
}
