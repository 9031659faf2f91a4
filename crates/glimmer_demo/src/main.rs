//! # glimmer_demo — Loopback broadcast demo
//!
//! Runs a scripted scenario against an in-process [`GameServer`] with one
//! loopback client per observer, then reports what each client's world
//! mirror ended up showing.
//!
//! ## Run Sequence
//!
//! 1. Load the scenario file (JSON, see `scenarios/campfire.json`).
//! 2. Build the authoritative world and connect the observers.
//! 3. Apply the steps, broadcasting attach/detach frames as they go.
//! 4. Shut the server down and report each peer's final state.

mod loopback;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use glimmer_server::{Capabilities, GameServer};
use glimmer_world::{CreatureId, WorldState};
use loopback::ClientPeer;
use scenario::{Scenario, Step};

#[derive(Parser)]
#[command(
    name = "glimmer_demo",
    about = "Scripted effect broadcast over a loopback server"
)]
struct Args {
    /// Path to the scenario JSON file
    #[arg(
        short,
        long,
        default_value = "crates/glimmer_demo/scenarios/campfire.json"
    )]
    scenario: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    info!(file = %args.scenario.display(), "loading scenario");
    let scenario = scenario::load(&args.scenario)?;
    info!(
        creatures = scenario.creatures.len(),
        tiles = scenario.tiles.len(),
        observers = scenario.observers.len(),
        steps = scenario.steps.len(),
        "scenario loaded"
    );

    let mut server = GameServer::with_world(build_world(&scenario));

    // One loopback peer per observer, each with its own mirror of the
    // starting world.
    let mut tasks = Vec::new();
    for observer in &scenario.observers {
        let capabilities = Capabilities {
            attached_effects: observer.attached_effects,
        };
        let peer = ClientPeer::connect(
            &mut server,
            observer.name.clone(),
            observer.position,
            capabilities,
            build_world(&scenario),
        );
        info!(
            peer = %observer.name,
            position = %observer.position,
            attached_effects = observer.attached_effects,
            "observer connected"
        );
        tasks.push(tokio::spawn(peer.run()));
    }
    info!(connections = server.roster().len(), "roster ready");

    for step in scenario.steps {
        run_step(&mut server, step);
    }

    // Dropping the server closes every outbound queue, which ends the
    // peers' pump loops.
    drop(server);

    for task in tasks {
        let peer = task.await?;
        peer.report();
    }

    info!("scenario complete");
    Ok(())
}

/// Build the scenario's starting world.
fn build_world(scenario: &Scenario) -> WorldState {
    let mut world = WorldState::new();
    for spawn in &scenario.creatures {
        world.add_creature(CreatureId(spawn.id), spawn.position);
    }
    for position in &scenario.tiles {
        world.load_tile(*position);
    }
    world
}

fn run_step(server: &mut GameServer, step: Step) {
    match step {
        Step::AttachCreature { creature, effect } => {
            let sent = server.attach_particle_effect(CreatureId(creature), &effect);
            info!(creature, effect = %effect, sent, "attach creature effect");
        }
        Step::DetachCreature { creature, effect } => {
            let sent = server.detach_particle_effect(CreatureId(creature), &effect);
            info!(creature, effect = %effect, sent, "detach creature effect");
        }
        Step::AttachPosition { effect, position } => {
            let sent = server.send_attach_particle_effect(&effect, position);
            info!(effect = %effect, position = %position, sent, "attach position effect");
        }
        Step::DetachPosition { effect, position } => {
            let sent = server.send_detach_particle_effect(&effect, position);
            info!(effect = %effect, position = %position, sent, "detach position effect");
        }
        Step::MoveCreature { creature, position } => {
            if let Err(error) = server.world_mut().move_creature(CreatureId(creature), position) {
                warn!(creature, %error, "move ignored");
            } else {
                info!(creature, position = %position, "creature moved");
            }
        }
    }
}
