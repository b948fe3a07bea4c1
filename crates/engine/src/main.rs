//! WildWarp Engine - Main entry point.
//!
//! Runs the engine against the in-memory adapters and generated terrain: a
//! couple of demo players request teleports while the cache warmer and the
//! player event loop run in the background, until Ctrl+C or SIGTERM. SIGHUP
//! reloads the zones.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildwarp_domain::{Location, Position, WorldName};
use wildwarp_engine::api::{PlayerEvent, EVENT_CHANNEL_BUFFER};
use wildwarp_engine::app::{App, Ports};
use wildwarp_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::AppConfig,
    messenger::TracingMessenger,
    players::InMemoryPlayers,
    terrain::GeneratedTerrain,
    wallet::InMemoryWallet,
    zones::{ZoneDirectory, ZoneSource},
};

const DEMO_WORLDS: [&str; 3] = ["world", "world_nether", "world_the_end"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildwarp_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WildWarp Engine");

    let config = AppConfig::from_env()?;
    let zone_source = zone_source(&config);
    let zones = Arc::new(ZoneDirectory::new(zone_source.load()?));
    let seed: u64 = std::env::var("WILDWARP_DEMO_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let players = Arc::new(InMemoryPlayers::new());
    let wallet = Arc::new(InMemoryWallet::new(true));
    let app = Arc::new(App::new(
        &config,
        zones.clone(),
        Ports {
            wallet: wallet.clone(),
            world: Arc::new(GeneratedTerrain::vanilla(seed)),
            players: players.clone(),
            messages: Arc::new(TracingMessenger::new()),
            clock: Arc::new(SystemClock::new()),
            random: Arc::new(SystemRandom::new()),
        },
    ));

    let cancel_token = CancellationToken::new();
    setup_shutdown_signal(cancel_token.clone());
    setup_reload_signal(zones, zone_source, cancel_token.clone());

    // Background workers
    let warmer = tokio::spawn(app.use_cases.teleport.warmer.clone().run_worker(
        config.cache.warm_interval,
        config.cache.initial_delay,
        cancel_token.clone(),
    ));
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
    let event_loop = tokio::spawn(app.events.clone().run(events_rx, cancel_token.clone()));

    tokio::select! {
        _ = cancel_token.cancelled() => {}
        _ = run_demo(&app, &players, &wallet, &events_tx) => {
            tracing::info!("Demo finished, waiting for shutdown signal");
            cancel_token.cancelled().await;
        }
    }

    let cancelled = app.orchestrator().shutdown().await;
    tracing::info!(cancelled, "Sessions torn down");
    for (name, handle) in [("cache warmer", warmer), ("event loop", event_loop)] {
        if let Err(e) = handle.await {
            tracing::error!(worker = name, error = %e, "Worker task failed");
        }
    }

    tracing::info!("WildWarp Engine stopped");
    Ok(())
}

/// Zones from `WILDWARP_ZONES_FILE`, or the global defaults for the demo worlds.
fn zone_source(config: &AppConfig) -> ZoneSource {
    match &config.zones_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using zone file");
            ZoneSource::File {
                path: path.clone(),
                defaults: config.zone_defaults.clone(),
            }
        }
        None => ZoneSource::Defaults {
            worlds: DEMO_WORLDS.iter().map(|name| WorldName::from(*name)).collect(),
            defaults: config.zone_defaults.clone(),
        },
    }
}

/// One player teleports normally, another walks off mid-countdown.
async fn run_demo(
    app: &App,
    players: &InMemoryPlayers,
    wallet: &InMemoryWallet,
    events: &mpsc::Sender<PlayerEvent>,
) {
    let spawn = Location::new("world", Position::new(0.5, 70.0, 0.5));
    let steve = players.join("Steve", spawn.clone());
    let alex = players.join("Alex", spawn.clone());
    wallet.deposit(steve, 1_000.0);
    wallet.deposit(alex, 1_000.0);

    let orchestrator = app.orchestrator();
    for player in [steve, alex] {
        if let Err(e) = orchestrator.request(player).await {
            tracing::warn!(player_id = %player, error = %e, "Demo request rejected");
        }
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    let walked = Location::new("world", Position::new(4.5, 70.0, 0.5));
    players.move_to(alex, walked.clone());
    if events
        .send(PlayerEvent::Moved {
            player: alex,
            to: walked,
        })
        .await
        .is_err()
    {
        tracing::warn!("Player event loop is gone");
    }

    while orchestrator.is_teleporting(steve) {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    tracing::info!(
        player_id = %steve,
        location = ?players.location(steve),
        balance = wallet.balance(steve),
        "Demo teleport finished"
    );
}

/// Set up graceful shutdown signal handling (SIGTERM, SIGINT/Ctrl+C).
fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }

        cancel_token.cancel();
    });
}

/// Reload the zones on SIGHUP. A failed reload keeps the current zones.
fn setup_reload_signal(
    zones: Arc<ZoneDirectory>,
    source: ZoneSource,
    cancel_token: CancellationToken,
) {
    #[cfg(unix)]
    tokio::spawn(async move {
        let mut hangup =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup()) {
                Ok(signal) => signal,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGHUP handler");
                    return;
                }
            };

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    match zones.reload_from(&source) {
                        Ok(worlds) => tracing::info!(worlds, "Zones reloaded"),
                        Err(e) => {
                            tracing::warn!(error = %e, "Zone reload failed, keeping current zones");
                        }
                    }
                }
            }
        }
    });

    #[cfg(not(unix))]
    drop((zones, source, cancel_token));
}
