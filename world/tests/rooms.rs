use std::time::Duration;

use glam::Vec2;
use storm_castle_core::{
    Command, Event, NotificationKind, RoomPhase, StatKind, StatRegistry, UnitKind, WaveSpawn,
};
use storm_castle_world::{apply, drain_notifications, query, World};

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    run(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
    )
}

fn start_battle() -> World {
    let mut world = World::new();
    for _ in 0..5 {
        let _ = run(
            &mut world,
            Command::AdjustDraft {
                kind: UnitKind::Ranger,
                delta: 1,
            },
        );
    }
    let _ = run(&mut world, Command::StartRun);
    world
}

/// Empties the room and lets the tick that notices it start the countdown.
fn empty_room(world: &mut World) -> Vec<Event> {
    let _ = run(world, Command::ScriptWave { spawns: Vec::new() });
    tick(world, 16)
}

fn transitioned(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::NextRoomReady { .. }))
}

#[test]
fn transition_fires_after_exactly_one_second() {
    let mut world = start_battle();
    let events = empty_room(&mut world);
    assert!(events.contains(&Event::RoomCleared { rooms_cleared: 1 }));
    assert_eq!(
        query::room_phase(&world),
        RoomPhase::Clearing {
            elapsed: Duration::ZERO
        }
    );

    assert!(transitioned(&tick(&mut world, 1_000)));
    assert_eq!(query::room_phase(&world), RoomPhase::Populated);
    assert_eq!(query::rooms_cleared(&world), 1);
}

#[test]
fn split_frames_accumulate_past_the_threshold() {
    let mut world = start_battle();
    let _ = empty_room(&mut world);

    assert!(!transitioned(&tick(&mut world, 600)));
    assert_eq!(
        query::room_phase(&world),
        RoomPhase::Clearing {
            elapsed: Duration::from_millis(600)
        }
    );
    assert!(transitioned(&tick(&mut world, 600)));
}

#[test]
fn countdown_one_millisecond_short_keeps_waiting() {
    let mut world = start_battle();
    let _ = empty_room(&mut world);

    assert!(!transitioned(&tick(&mut world, 500)));
    assert!(!transitioned(&tick(&mut world, 499)));
    assert_eq!(
        query::room_phase(&world),
        RoomPhase::Clearing {
            elapsed: Duration::from_millis(999)
        }
    );
    assert!(query::enemies(&world).is_empty());
}

#[test]
fn fifteen_rooms_follow_the_progression_schedule() {
    let mut world = start_battle();
    let _ = drain_notifications(&mut world);
    let mut escalations = 0;
    let mut grants = 0;
    let mut warnings = 0;
    let mut joined = 0;

    for room in 1..=15 {
        let mut events = empty_room(&mut world);
        assert!(events.contains(&Event::RoomCleared {
            rooms_cleared: room
        }));
        events.extend(tick(&mut world, 1_000));
        assert!(transitioned(&events), "room {room} never transitioned");

        escalations += events
            .iter()
            .filter(|event| matches!(event, Event::DifficultyEscalated { .. }))
            .count();
        grants += events
            .iter()
            .filter(|event| matches!(event, Event::UnitGranted { .. }))
            .count();

        for notification in drain_notifications(&mut world) {
            match notification.kind {
                NotificationKind::EnemiesStrengthened => {
                    assert_eq!(room % 3, 0);
                    assert_eq!(notification.message, "Enemies are getting stronger...");
                    warnings += 1;
                }
                NotificationKind::UnitJoined(kind) => {
                    assert_eq!(room % 5, 0);
                    assert_eq!(
                        notification.message,
                        format!("A {} has joined your party", kind.name())
                    );
                    joined += 1;
                }
                NotificationKind::ChestOpened(_) => panic!("no chest was destroyed"),
            }
        }
    }

    assert_eq!((escalations, warnings), (5, 5));
    assert_eq!((grants, joined), (3, 3));
    let bounds = query::wave_bounds(&world);
    assert_eq!((bounds.lower(), bounds.upper()), (4, 6));
    assert_eq!(query::units_granted(&world), 8);
    assert_eq!(query::roster(&world).total(), 8);

    let defaults = StatRegistry::new();
    let registry = query::registry(&world);
    let enemy_gain: u32 = UnitKind::ENEMIES
        .into_iter()
        .flat_map(|kind| StatKind::ALL.map(|stat| (kind, stat)))
        .map(|(kind, stat)| registry.get(kind).value(stat) - defaults.get(kind).value(stat))
        .sum();
    assert_eq!(enemy_gain, 5);
    for kind in UnitKind::PLAYABLE {
        assert_eq!(registry.get(kind), defaults.get(kind));
    }
}

#[test]
fn next_wave_respects_widened_bounds() {
    let mut world = start_battle();
    let _ = empty_room(&mut world);
    let events = tick(&mut world, 1_000);

    let spawned = events
        .iter()
        .find_map(|event| match event {
            Event::WaveSpawned { enemies, .. } => Some(*enemies),
            _ => None,
        })
        .expect("next wave spawned");
    assert!((1..=3).contains(&spawned));
    assert_eq!(query::enemies(&world).len() as u32, spawned);
    for enemy in query::enemies(&world) {
        assert!(UnitKind::ENEMIES.contains(&enemy.kind));
    }
}

#[test]
fn debug_waves_wait_for_the_transition_to_finish() {
    let mut world = start_battle();
    for _ in 0..4 {
        let _ = empty_room(&mut world);
        let _ = tick(&mut world, 1_000);
    }
    let events = empty_room(&mut world);
    assert!(events.contains(&Event::RoomCleared { rooms_cleared: 5 }));
    let _ = tick(&mut world, 400);

    let regenerated = run(&mut world, Command::RegenerateRoom);
    let scripted = run(
        &mut world,
        Command::ScriptWave {
            spawns: vec![WaveSpawn::Enemy {
                kind: UnitKind::Zombie,
                at: Vec2::new(700.0, 500.0),
            }],
        },
    );
    assert!(regenerated.is_empty());
    assert!(scripted.is_empty());
    assert!(query::enemies(&world).is_empty());
    assert_eq!(
        query::room_phase(&world),
        RoomPhase::Clearing {
            elapsed: Duration::from_millis(400)
        }
    );

    let events = tick(&mut world, 600);
    assert!(transitioned(&events));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::UnitGranted { .. }))
            .count(),
        1
    );
    assert_eq!(query::units_granted(&world), 6);
    assert_eq!(query::rooms_cleared(&world), 5);
}

#[test]
fn regenerating_a_room_keeps_the_bounds() {
    let mut world = start_battle();
    let before = query::wave_bounds(&world);
    let events = run(&mut world, Command::RegenerateRoom);

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::WaveSpawned { enemies: 1, .. })));
    assert_eq!(query::wave_bounds(&world), before);
    assert_eq!(query::rooms_cleared(&world), 0);
}
