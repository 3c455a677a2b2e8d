//! replanter - headless driver for the Replanter enchantment
//!
//! Builds a small farm, replays an action script against it and reports what grew.

mod config;
mod script;

use anyhow::Result;
use clap::Parser;
use config::ReplanterConfig;
use replanter_core::{ItemType, SimTick};
use replanter_testkit::{EventRecord, JsonlSink};
use replanter_world::{
    farming_blocks, Agent, BlockPos, BlockWorld, ChunkPos, CropRegistry, CropType, FeedbackLog,
    ReplantSession, Voxel, BLOCK_DIRT, BLOCK_SOUL_SAND,
};
use script::{ActionScript, ScriptAction};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Height of the farm surface in the demo world.
const GROUND_Y: i32 = 64;
const FIELD_WIDTH: i32 = 4;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the Replanter enchantment", long_about = None)]
struct Args {
    /// TOML configuration (defaults to config/replanter.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON action script; the built-in demo runs when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Record every action, feedback and tick outcome as JSONL
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Log at info level unless RUST_LOG overrides it
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,
}

/// Optional JSONL recording of a run.
struct Recorder {
    sink: Option<JsonlSink>,
}

impl Recorder {
    fn open(path: Option<&Path>) -> Result<Self> {
        let sink = path.map(JsonlSink::create).transpose()?;
        Ok(Self { sink })
    }

    fn record<T: Serialize>(&mut self, tick: SimTick, kind: &str, payload: &T) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&EventRecord::new(tick, kind, payload)?)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        match self.sink.as_mut() {
            Some(sink) => {
                sink.flush()?;
                Ok(sink.written())
            }
            None => Ok(0),
        }
    }
}

#[derive(Debug, Default)]
struct RunTotals {
    actions: usize,
    handled: usize,
    applied: usize,
    failed: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting replanter v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let config = ReplanterConfig::load_from_path(&config_path);
    if args.write_config {
        config.save_to_path(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }
    let mut script = match &args.script {
        Some(path) => ActionScript::from_path(path)?,
        None => ActionScript::demo()?,
    };
    if let Some(last) = script.last_tick() {
        info!(last_tick = last.0, "action script loaded");
    }
    let mut recorder = Recorder::open(args.event_log.as_deref())?;

    let mut session = ReplantSession::new(demo_world()?, config.toggles());
    let mut agent = Agent::player(1);
    let mut feedback = FeedbackLog::new();
    let mut totals = RunTotals::default();

    while !script.is_finished() {
        let tick = session.current_tick();
        for action in script.drain_ready(tick) {
            let (handled, payload) = apply_action(&mut session, &mut agent, &action, &mut feedback);
            totals.actions += 1;
            totals.handled += usize::from(handled);
            recorder.record(tick, action.kind(), &payload)?;
            for event in feedback.take() {
                recorder.record(tick, "feedback", &event)?;
            }
        }

        let report = session.tick();
        totals.applied += report.applied;
        totals.failed += report.failed;
        recorder.record(
            session.current_tick(),
            "tick",
            &json!({ "applied": report.applied, "failed": report.failed }),
        )?;
    }

    let written = recorder.finish()?;
    if let Some(path) = &args.event_log {
        info!(records = written, path = %path.display(), "event log written");
    }

    let changed = session.world_mut().take_dirty_chunks();
    print_summary(&session, &agent, &totals, &changed);
    Ok(())
}

/// Flat dirt pad with a farmland row, a soul sand row, and a row of ripe carrots.
fn demo_world() -> Result<BlockWorld> {
    let mut world = BlockWorld::new();
    world.ensure_chunk(ChunkPos::new(0, 0));

    for x in 0..FIELD_WIDTH {
        for z in 0..=4 {
            world.set_block(BlockPos::new(x, GROUND_Y, z), Voxel::of(BLOCK_DIRT))?;
        }
        world.set_block(
            BlockPos::new(x, GROUND_Y, 0),
            Voxel::of(farming_blocks::FARMLAND),
        )?;
        world.set_block(BlockPos::new(x, GROUND_Y, 2), Voxel::of(BLOCK_SOUL_SAND))?;
        world.set_block(
            BlockPos::new(x, GROUND_Y, 4),
            Voxel::of(farming_blocks::FARMLAND_WET),
        )?;
    }
    for x in 0..2 {
        world.set_block(
            BlockPos::new(x, GROUND_Y + 1, 4),
            Voxel::of(farming_blocks::CARROTS_7),
        )?;
    }
    Ok(world)
}

/// Run one script action. Returns whether an event was handled, plus its record payload.
fn apply_action(
    session: &mut ReplantSession,
    agent: &mut Agent,
    action: &ScriptAction,
    feedback: &mut FeedbackLog,
) -> (bool, Value) {
    match action {
        ScriptAction::Interact { pos, hand, action } => {
            let handled = session.interact(agent, *hand, *action, Some(*pos), feedback);
            (
                handled,
                json!({ "pos": pos, "hand": hand, "action": action, "handled": handled }),
            )
        }
        ScriptAction::Break { pos } => {
            let handled = session.break_block(agent, *pos, feedback);
            if handled.is_none() {
                warn!(%pos, "nothing to break");
            }
            (
                handled.unwrap_or(false),
                json!({ "pos": pos, "handled": handled }),
            )
        }
        ScriptAction::Give { stack } => {
            let leftover = agent.inventory.add_item(stack.clone());
            if let Some(rest) = &leftover {
                warn!(count = rest.count, item = ?rest.item_type, "inventory full");
            }
            (false, json!({ "stack": stack, "leftover": leftover }))
        }
        ScriptAction::Offhand { stack } => {
            agent.inventory.set_off_hand(stack.clone());
            (false, json!({ "stack": stack }))
        }
    }
}

fn print_summary(
    session: &ReplantSession,
    agent: &Agent,
    totals: &RunTotals,
    changed: &[ChunkPos],
) {
    println!(
        "ran {} actions over {} ticks: {} handled, {} mutations applied, {} failed",
        totals.actions,
        session.current_tick().0,
        totals.handled,
        totals.applied,
        totals.failed
    );

    let changed: Vec<String> = changed.iter().map(ToString::to_string).collect();
    println!("changed chunks: {}", changed.join(" "));

    println!("field:");
    for z in [0, 2, 4] {
        for x in 0..FIELD_WIDTH {
            let pos = BlockPos::new(x, GROUND_Y + 1, z);
            let Some(voxel) = session.world().block(pos) else {
                continue;
            };
            match CropType::from_block_id(voxel.id) {
                Some((crop, stage)) => println!("  {pos}: {crop:?} stage {stage}"),
                None if voxel.is_air() => println!("  {pos}: empty"),
                None => println!("  {pos}: block {}", voxel.id),
            }
        }
    }

    println!("seeds left:");
    for pair in CropRegistry::standard().pairs() {
        let count = agent.inventory.count_item(ItemType::Seed(pair.seed));
        if count > 0 {
            println!("  {}: {count}", pair.seed.key());
        }
    }
}
