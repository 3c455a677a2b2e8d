//! Recorded runs are deterministic and survive a JSONL round trip.

use std::time::{SystemTime, UNIX_EPOCH};

use replanter_core::{
    Enchantment, EnchantmentType, ItemStack, ItemType, SeedKind, SimTick, ToolMaterial, ToolType,
};
use replanter_testkit::{read_jsonl, EventRecord, JsonlSink};
use replanter_world::{
    farming_blocks, Action, Agent, BlockPos, BlockWorld, ChunkPos, FeedbackEvent, FeedbackLog,
    Hand, ReplantSession, ReplantToggles, Voxel,
};
use serde_json::json;

fn record_run() -> Vec<EventRecord> {
    let mut world = BlockWorld::new();
    world.ensure_chunk(ChunkPos::new(0, 0));
    world.ensure_chunk(ChunkPos::new(1, 0));
    // A row of farmland crossing a chunk border
    let ground: Vec<BlockPos> = (12..20).map(|x| BlockPos::new(x, 64, 4)).collect();
    for &pos in &ground {
        world
            .set_block(pos, Voxel::of(farming_blocks::FARMLAND))
            .unwrap();
    }

    let mut session = ReplantSession::new(world, ReplantToggles::default());
    let mut agent = Agent::player(7);
    agent.inventory.set(
        0,
        Some(
            ItemStack::new(ItemType::Tool(ToolType::Hoe, ToolMaterial::Gold), 1)
                .with_enchantment(Enchantment::new(EnchantmentType::Replanter, 1)),
        ),
    );
    agent
        .inventory
        .add_item(ItemStack::new(ItemType::Seed(SeedKind::Carrot), 5));

    let mut log = FeedbackLog::new();
    let mut records = Vec::new();
    for &pos in &ground {
        let handled = session.interact(
            &mut agent,
            Hand::Main,
            Action::RightClickBlock,
            Some(pos),
            &mut log,
        );
        let tick = session.current_tick();
        records.push(
            EventRecord::new(tick, "interact", &json!({ "pos": pos, "handled": handled }))
                .unwrap(),
        );
        for event in log.take() {
            records.push(EventRecord::new(tick, "feedback", &event).unwrap());
        }
        let report = session.tick();
        records.push(
            EventRecord::new(
                session.current_tick(),
                "tick",
                &json!({ "applied": report.applied, "failed": report.failed }),
            )
            .unwrap(),
        );
    }
    records
}

#[test]
fn identical_runs_record_identical_logs() {
    let first = record_run();
    let second = record_run();
    assert_eq!(first, second);

    // Five carrots, eight clicks: five plantings, each with a sound and a swing
    let planted = first
        .iter()
        .filter(|r| r.kind == "tick" && r.payload["applied"] == 1)
        .count();
    assert_eq!(planted, 5);
    assert_eq!(first.iter().filter(|r| r.kind == "feedback").count(), 10);
    assert_eq!(first.last().map(|r| r.tick), Some(SimTick(8)));
}

#[test]
fn recorded_log_roundtrips_through_jsonl() {
    let records = record_run();
    let path = std::env::temp_dir().join(format!(
        "replanter-worldtest-{}.jsonl",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let mut sink = JsonlSink::create(&path).expect("sink create");
    for record in &records {
        sink.write(record).expect("write succeeds");
    }
    sink.flush().expect("flush succeeds");

    let loaded = read_jsonl(&path).expect("log readable");
    assert_eq!(loaded, records);

    let feedback: FeedbackEvent =
        serde_json::from_value(loaded[1].payload.clone()).expect("feedback payload");
    assert!(matches!(feedback, FeedbackEvent::Sound { .. }));
    let _ = std::fs::remove_file(&path);
}
