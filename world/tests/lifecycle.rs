use std::time::Duration;

use glam::Vec2;
use storm_castle_core::{
    Command, Event, PlacementError, Roster, ScreenState, StatRegistry, UnitKind, WaveSpawn,
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

fn draft(world: &mut World, kind: UnitKind, count: u32) {
    for _ in 0..count {
        let _ = run(world, Command::AdjustDraft { kind, delta: 1 });
    }
}

fn place_at(world: &mut World, x: f32, y: f32) -> Vec<Event> {
    run(
        world,
        Command::PlaceUnit {
            at: Vec2::new(x, y),
        },
    )
}

fn rejection(events: &[Event]) -> Option<PlacementError> {
    match events {
        [Event::PlacementRejected { reason, .. }] => Some(*reason),
        _ => None,
    }
}

#[test]
fn placement_is_rejected_outside_battle() {
    let mut world = World::new();
    assert_eq!(
        rejection(&place_at(&mut world, 300.0, 300.0)),
        Some(PlacementError::InvalidScreen)
    );
}

#[test]
fn placement_rules_reject_without_clamping() {
    let mut world = World::new();
    draft(&mut world, UnitKind::Warrior, 5);
    let _ = run(&mut world, Command::StartRun);
    let _ = run(
        &mut world,
        Command::ScriptWave {
            spawns: vec![WaveSpawn::Enemy {
                kind: UnitKind::Skeleton,
                at: Vec2::new(400.0, 300.0),
            }],
        },
    );

    assert_eq!(
        rejection(&place_at(&mut world, 300.0, 74.0)),
        Some(PlacementError::InHeaderBand)
    );
    assert_eq!(
        rejection(&place_at(&mut world, 420.0, 310.0)),
        Some(PlacementError::Occupied)
    );
    let _ = run(
        &mut world,
        Command::SelectClass {
            kind: UnitKind::Ranger,
        },
    );
    assert_eq!(
        rejection(&place_at(&mut world, 100.0, 300.0)),
        Some(PlacementError::RosterEmpty)
    );
    assert_eq!(query::roster(&world), Roster::from_counts(5, 0, 0));
    assert!(query::players(&world).is_empty());

    let _ = run(
        &mut world,
        Command::SelectClass {
            kind: UnitKind::Warrior,
        },
    );
    let events = place_at(&mut world, 300.0, 75.0);
    assert!(matches!(
        events.as_slice(),
        [Event::UnitPlaced {
            kind: UnitKind::Warrior,
            ..
        }]
    ));
    assert_eq!(query::roster(&world).count(UnitKind::Warrior), 4);
    assert_eq!(query::players(&world).len(), 1);
}

#[test]
fn losing_every_unit_ends_the_run_and_title_restores_defaults() {
    let mut world = World::new();
    draft(&mut world, UnitKind::Mage, 5);
    let _ = run(&mut world, Command::StartRun);

    for _ in 0..3 {
        let _ = run(&mut world, Command::ScriptWave { spawns: Vec::new() });
        let _ = tick(&mut world, 16);
        let _ = tick(&mut world, 1_000);
    }
    assert_ne!(query::registry(&world), &StatRegistry::new());
    let _ = drain_notifications(&mut world);

    let columns = [100.0, 250.0, 400.0, 550.0, 700.0];
    let _ = run(
        &mut world,
        Command::ScriptWave {
            spawns: columns
                .iter()
                .map(|&x| WaveSpawn::Enemy {
                    kind: UnitKind::Skeleton,
                    at: Vec2::new(x, 340.0),
                })
                .collect(),
        },
    );
    let _ = run(
        &mut world,
        Command::SelectClass {
            kind: UnitKind::Mage,
        },
    );
    for x in columns {
        let events = place_at(&mut world, x, 300.0);
        assert!(matches!(events.as_slice(), [Event::UnitPlaced { .. }]));
    }
    assert_eq!(query::roster(&world).total(), 0);

    let mut game_over = Vec::new();
    for _ in 0..100 {
        let events = tick(&mut world, 50);
        if events
            .iter()
            .any(|event| matches!(event, Event::GameOver { .. }))
        {
            game_over = events;
            break;
        }
    }
    assert!(game_over.contains(&Event::GameOver { rooms_cleared: 3 }));
    assert!(game_over.contains(&Event::ScreenChanged {
        screen: ScreenState::GameOver
    }));
    assert_eq!(query::screen(&world), ScreenState::GameOver);
    assert!(query::players(&world).is_empty());
    assert!(query::enemies(&world).is_empty());

    let events = tick(&mut world, 5_000);
    assert_eq!(
        events,
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(5_000)
        }]
    );

    let events = run(&mut world, Command::ReturnToTitle);
    assert_eq!(
        events,
        vec![Event::ScreenChanged {
            screen: ScreenState::Draft
        }]
    );
    assert_eq!(query::registry(&world), &StatRegistry::new());
    assert_eq!(query::rooms_cleared(&world), 0);
    assert_eq!(query::selected_class(&world), UnitKind::Warrior);
    assert_eq!(query::pending_notifications(&world), 0);

    draft(&mut world, UnitKind::Warrior, 5);
    let _ = run(&mut world, Command::StartRun);
    let bounds = query::wave_bounds(&world);
    assert_eq!((bounds.lower(), bounds.upper()), (1, 1));
    assert_eq!(query::enemies(&world).len(), 1);
}

#[test]
fn return_to_title_is_ignored_mid_battle() {
    let mut world = World::new();
    draft(&mut world, UnitKind::Warrior, 5);
    let _ = run(&mut world, Command::StartRun);

    assert!(run(&mut world, Command::ReturnToTitle).is_empty());
    assert_eq!(query::screen(&world), ScreenState::Battle);
}
