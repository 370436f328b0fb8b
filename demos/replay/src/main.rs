//! Headless replay of a jittery transport into driftline interpolation.
//!
//! A background thread plays the role of the replication transport: it sends positions and yaws
//! for a few remote entities walking in circles, with random delays between updates.
//! The main thread runs the bevy app frame by frame and periodically logs the rendered state.
//!
//! Run with `RUST_LOG=debug` for more details.
mod transport;

use core::time::Duration;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, anyhow};
use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_time::Time;
use bevy_transform::components::Transform;
use clap::{Parser, ValueEnum};
use driftline::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::transport::TransportSettings;

/// CLI options for the replay demo
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of remote entities
    #[arg(long, default_value_t = 4)]
    entities: u64,
    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: usize,
    /// Duration of a frame, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Interval between two transport updates, in milliseconds
    #[arg(long, default_value_t = 50)]
    send_interval_ms: u64,
    /// Maximum random delay added to every transport update, in milliseconds
    #[arg(long, default_value_t = 30)]
    jitter_ms: u64,
    #[arg(long, value_enum, default_value_t = Mode::Historical)]
    mode: Mode,
    /// JSON file containing an `InterpolationConfig`
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    Direct,
    Historical,
}

impl From<Mode> for InterpolationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Direct => InterpolationMode::Direct,
            Mode::Historical => InterpolationMode::Historical,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<InterpolationConfig> {
    let Some(path) = path else {
        return Ok(InterpolationConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid interpolation config in {}", path.display()))
}

fn log_entities(app: &mut App, frame: usize) {
    let mut query = app
        .world_mut()
        .query::<(Entity, &RemoteId, &RemoteEntityState, &Transform)>();
    for (entity, remote, state, transform) in query.iter(app.world()) {
        info!(
            frame,
            ?entity,
            remote = remote.0,
            backlog = state.backlog(),
            lerp_rate = state.position.lerp_rate(),
            locomotion = ?state.locomotion(),
            translation = ?transform.translation,
            yaw = state.yaw.rendered().degrees(),
            "rendered"
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let frame_duration = Duration::from_millis(cli.frame_ms);
    info!(?cli, ?config, "starting replay");

    let (sender, receiver) = driftline::crossbeam::channel();
    let mut app = App::new();
    app.insert_resource(Time::<()>::default());
    app.add_plugins(DriftlinePlugins::new(config).with_receiver(receiver));
    app.finish();
    app.cleanup();

    for id in 0..cli.entities {
        let (position, yaw) = transport::waypoint(id, 0.0);
        let state = RemoteEntityState::new(cli.mode.into(), position, yaw, 0.0);
        let transform = state.rendered_transform();
        app.world_mut().spawn((RemoteId(id), state, transform));
    }

    let stop = Arc::new(AtomicBool::new(false));
    let transport = transport::spawn(
        TransportSettings {
            entities: cli.entities,
            send_interval: Duration::from_millis(cli.send_interval_ms),
            jitter: Duration::from_millis(cli.jitter_ms),
        },
        sender,
        stop.clone(),
    );

    for frame in 0..cli.frames {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(frame_duration);
        app.update();
        if frame % 60 == 0 {
            log_entities(&mut app, frame);
        }
        thread::sleep(frame_duration);
    }
    log_entities(&mut app, cli.frames);

    stop.store(true, Ordering::Relaxed);
    let sent = transport
        .join()
        .map_err(|_| anyhow!("transport thread panicked"))??;
    info!(sent, "replay finished");
    Ok(())
}
