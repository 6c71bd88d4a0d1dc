mod config;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncBufReadExt;
use tracing::{debug, info, warn};

use config::ServerConfig;
use mobtune_ai::GoalRegistry;
use mobtune_game::ai::rules::{build_state, RuleError, TuneConfig, TuneState};
use mobtune_game::cleanup::CleanupConfig;
use mobtune_game::game_world::GameWorld;
use mobtune_game::maintenance::MaintenanceConfig;
use mobtune_game::session::SessionRegistry;

const CONFIG_PATH: &str = "mobtune.toml";

fn tune_config(config: &ServerConfig) -> TuneConfig {
    TuneConfig {
        enabled: config.tuning.enabled,
        remove_kinds: config.tuning.remove_goals.clone(),
        protect_kinds: config.tuning.protect_goals.clone(),
        remove_name_fragments: config.tuning.remove_goal_names.clone(),
    }
}

/// Build the goal registry (vanilla kinds plus pack definitions) and the
/// tuning state from the loaded config.
fn build_tuning(config: &ServerConfig) -> Result<TuneState, RuleError> {
    let mut registry = GoalRegistry::new();
    let packs_dir = Path::new(&config.packs.directory);
    if packs_dir.is_dir() {
        match mobtune_pack::load_into(packs_dir, &mut registry) {
            Ok(n) => info!("Registered {n} goal kinds from {}", packs_dir.display()),
            Err(e) => warn!("Goal pack load failed: {e}"),
        }
    }
    build_state(&tune_config(config), &registry)
}

#[tokio::main]
async fn main() {
    let config = match ServerConfig::load(CONFIG_PATH) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "mobtune v{} starting (session '{}')",
        env!("CARGO_PKG_VERSION"),
        config.server.name
    );

    let state = match build_tuning(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid tuning config: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Tuning {} with {} rule(s)",
        if state.enabled { "enabled" } else { "disabled" },
        state.chain.len()
    );

    let mut game = GameWorld::with_configs(
        state,
        CleanupConfig {
            sweep_interval: config.cleanup.sweep_interval,
            expiry_jitter: config.cleanup.expiry_jitter,
        },
        MaintenanceConfig {
            maintenance_interval: config.maintenance.interval,
        },
    );

    let mut sessions = SessionRegistry::new();
    sessions.insert(&config.server.name, game.tune_state());

    for mob_type in &config.server.seed_mobs {
        let (_, runtime_id) = game.spawn_mob(mob_type);
        debug!("Seeded {mob_type} (runtime id {runtime_id})");
    }

    // Console REPL: read lines from stdin
    let (console_tx, mut console_rx) = tokio::sync::mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                game.tick();
                for event in game.drain_events() {
                    debug!("{event:?}");
                }
            }
            Some(line) = console_rx.recv() => {
                match line.as_str() {
                    "stop" | "exit" => break,
                    "stats" => {
                        let (mobs, goals) = game.population();
                        info!(
                            "tick {}: {mobs} mobs, {goals} goals, {} cached session(s)",
                            game.current_tick(),
                            sessions.len()
                        );
                    }
                    "reload" => match ServerConfig::load(CONFIG_PATH) {
                        Ok(new_config) => match build_tuning(&new_config) {
                            Ok(new_state) => {
                                game.set_tune_state(Arc::new(new_state));
                                sessions.insert(&new_config.server.name, game.tune_state());
                                info!("Tuning rules reloaded");
                            }
                            Err(e) => warn!("Reload rejected, keeping old rules: {e}"),
                        },
                        Err(e) => warn!("Reload rejected, keeping old rules: {e}"),
                    },
                    other => warn!("Unknown command: {other}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    sessions.teardown_all();
    info!("Server shut down.");
}
