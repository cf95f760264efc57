use anyhow::{Context, Result};
use roster_memory::config::{load_config, load_offset_map, validate_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = load_config().context("loading roster-memory.toml")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Roster-Memory v{}", env!("CARGO_PKG_VERSION"));

    let offsets = load_offset_map(&mut config).context("loading offset map")?;
    validate_config(&config).context("validating configuration")?;
    info!(
        "Offset map: {} categories, {} fields",
        offsets.categories.len(),
        offsets.field_count()
    );

    run(config, offsets).await
}

#[cfg(windows)]
async fn run(
    config: roster_memory::Config,
    offsets: roster_memory::OffsetMap,
) -> Result<()> {
    use roster_memory::{RosterSession, SharedRoster, WindowsProcessLocator};

    let session = RosterSession::attach(&WindowsProcessLocator::new(), config, offsets)
        .context("attaching to the game process")?;
    let roster = SharedRoster::new(session);
    let snapshot = roster.refresh().await?;

    if snapshot.is_empty() {
        info!("No players found; is a roster loaded in game?");
        return Ok(());
    }

    info!(
        "Loaded {} players and {} teams{}",
        snapshot.players.len(),
        snapshot.team_labels.len(),
        if snapshot.derived_teams {
            " (derived from player records)"
        } else {
            ""
        }
    );
    for (_, label) in &snapshot.team_labels {
        info!("  {:<32} {:>3} players", label, snapshot.players_by_team(label).len());
    }
    Ok(())
}

#[cfg(not(windows))]
async fn run(
    _config: roster_memory::Config,
    _offsets: roster_memory::OffsetMap,
) -> Result<()> {
    anyhow::bail!("Roster-Memory can only attach to the game on Windows")
}
